use time::Date;

use kernel::prelude::entity::{Customer, DestructCustomer};

#[derive(Debug, Clone)]
pub struct CustomerDto {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub signup_date: Date,
}

impl From<Customer> for CustomerDto {
    fn from(value: Customer) -> Self {
        let DestructCustomer {
            id,
            first_name,
            last_name,
            email,
            phone,
            address,
            signup_date,
        } = value.into_destruct();
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone: phone.map(Into::into),
            address: address.map(Into::into),
            signup_date: signup_date.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreateCustomerDto {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}
