use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use time::Date;

use application::transfer::CustomerDto;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    phone: Option<String>,
    address: Option<String>,
    signup_date: Date,
}

impl From<CustomerDto> for CustomerResponse {
    fn from(value: CustomerDto) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            phone: value.phone,
            address: value.address,
            signup_date: value.signup_date,
        }
    }
}

/// A customer that was just registered.
pub struct Created(pub CustomerDto);

pub struct Presenter;

impl Exhaust<CustomerDto> for Presenter {
    type To = Json<CustomerResponse>;
    fn emit(&self, output: CustomerDto) -> Self::To {
        Json(output.into())
    }
}

impl Exhaust<Created> for Presenter {
    type To = Response;
    fn emit(&self, output: Created) -> Self::To {
        (StatusCode::CREATED, Json(CustomerResponse::from(output.0))).into_response()
    }
}

impl Exhaust<Vec<CustomerDto>> for Presenter {
    type To = Json<Vec<CustomerResponse>>;
    fn emit(&self, output: Vec<CustomerDto>) -> Self::To {
        Json(output.into_iter().map(Into::into).collect())
    }
}
