use serde::Deserialize;

use application::transfer::CreateCustomerDto;

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    first_name: String,
    last_name: String,
    email: String,
    phone: Option<String>,
    address: Option<String>,
}

impl From<CreateCustomerRequest> for CreateCustomerDto {
    fn from(value: CreateCustomerRequest) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            phone: value.phone,
            address: value.address,
        }
    }
}

pub struct Transformer;

impl Intake<CreateCustomerRequest> for Transformer {
    type To = CreateCustomerDto;
    fn emit(&self, input: CreateCustomerRequest) -> Self::To {
        input.into()
    }
}
