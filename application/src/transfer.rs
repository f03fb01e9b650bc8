mod auth;
mod catalog;
mod customer;
mod rental;
mod report;

pub use self::{auth::*, catalog::*, customer::*, rental::*, report::*};
