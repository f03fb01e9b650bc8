mod actor;
mod category;
mod copy;
mod customer;
mod movie;
mod payment;
mod rental;
mod session;
mod user;

pub use self::{
    actor::*, category::*, copy::*, customer::*, movie::*, payment::*, rental::*, session::*,
    user::*,
};
