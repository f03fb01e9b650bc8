mod actor;
mod category;
mod common;
mod copy;
mod customer;
mod movie;
mod payment;
mod rental;
mod report;
mod session;
mod user;

pub use self::{
    actor::*, category::*, common::*, copy::*, customer::*, movie::*, payment::*, rental::*,
    report::*, session::*, user::*,
};
