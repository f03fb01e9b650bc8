mod contact;
mod id;

pub use self::{contact::*, id::*};
use destructure::Destructure;
use serde::Serialize;
use vodca::References;

use crate::entity::{FirstName, LastName};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, References, Destructure)]
pub struct Customer {
    id: CustomerId,
    first_name: FirstName,
    last_name: LastName,
    email: Email,
    phone: Option<Phone>,
    address: Option<Address>,
    signup_date: SignupDate,
}

impl Customer {
    pub fn new(
        id: CustomerId,
        first_name: FirstName,
        last_name: LastName,
        email: Email,
        phone: Option<Phone>,
        address: Option<Address>,
        signup_date: SignupDate,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            email,
            phone,
            address,
            signup_date,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct NewCustomer {
    first_name: FirstName,
    last_name: LastName,
    email: Email,
    phone: Option<Phone>,
    address: Option<Address>,
    signup_date: SignupDate,
}

impl NewCustomer {
    pub fn new(
        first_name: FirstName,
        last_name: LastName,
        email: Email,
        phone: Option<Phone>,
        address: Option<Address>,
        signup_date: SignupDate,
    ) -> Self {
        Self {
            first_name,
            last_name,
            email,
            phone,
            address,
            signup_date,
        }
    }
}
