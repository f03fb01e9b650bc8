use error_stack::Report;
use serde::Deserialize;

use application::transfer::{CreateRentalDto, RecordPaymentDto, RentalCustomerDto};
use kernel::KernelError;

use crate::controller::{Intake, TryIntake};
use crate::route::CreateCustomerRequest;

/// Names either a customer on file or one to register with the rental, never both.
#[derive(Debug, Deserialize)]
pub struct CreateRentalRequest {
    movie_id: i64,
    customer_id: Option<i64>,
    customer: Option<CreateCustomerRequest>,
}

#[derive(Debug, Deserialize)]
pub struct RecordPaymentRequest {
    amount: f64,
}

pub struct Transformer;

impl TryIntake<CreateRentalRequest> for Transformer {
    type To = CreateRentalDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: CreateRentalRequest) -> Result<Self::To, Self::Error> {
        let customer = match (input.customer_id, input.customer) {
            (Some(id), None) => RentalCustomerDto::Existing(id),
            (None, Some(customer)) => RentalCustomerDto::New(customer.into()),
            (Some(_), Some(_)) => {
                return Err(Report::new(KernelError::Validation)
                    .attach_printable("Give either customer_id or customer, not both"))
            }
            (None, None) => {
                return Err(Report::new(KernelError::Validation)
                    .attach_printable("A customer_id or a new customer is required"))
            }
        };
        Ok(CreateRentalDto {
            customer,
            movie_id: input.movie_id,
        })
    }
}

impl Intake<(i64, RecordPaymentRequest)> for Transformer {
    type To = RecordPaymentDto;
    fn emit(&self, (rental_id, req): (i64, RecordPaymentRequest)) -> Self::To {
        RecordPaymentDto {
            rental_id,
            amount: req.amount,
        }
    }
}
