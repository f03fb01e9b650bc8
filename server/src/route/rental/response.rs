use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use time::OffsetDateTime;

use application::transfer::{OpenRentalDto, PaymentDto, RentalDto};

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct RentalResponse {
    id: i64,
    customer_id: i64,
    copy_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    rented_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    due_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    returned_at: Option<OffsetDateTime>,
    status: String,
}

impl From<RentalDto> for RentalResponse {
    fn from(value: RentalDto) -> Self {
        Self {
            id: value.id,
            customer_id: value.customer_id,
            copy_id: value.copy_id,
            rented_at: value.rented_at,
            due_at: value.due_at,
            returned_at: value.returned_at,
            status: value.status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OpenRentalResponse {
    rental_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    rented_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    due_at: OffsetDateTime,
    customer_id: i64,
    customer_name: String,
    copy_id: i64,
    movie_id: i64,
    title: String,
}

#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    id: i64,
    rental_id: i64,
    amount: f64,
    #[serde(with = "time::serde::rfc3339")]
    paid_at: OffsetDateTime,
}

impl From<PaymentDto> for PaymentResponse {
    fn from(value: PaymentDto) -> Self {
        Self {
            id: value.id,
            rental_id: value.rental_id,
            amount: value.amount,
            paid_at: value.paid_at,
        }
    }
}

/// Wraps results that created a row so they answer with `201 Created`.
pub struct Created<T>(pub T);

pub struct Presenter;

impl Exhaust<RentalDto> for Presenter {
    type To = Json<RentalResponse>;
    fn emit(&self, output: RentalDto) -> Self::To {
        Json(output.into())
    }
}

impl Exhaust<Created<RentalDto>> for Presenter {
    type To = Response;
    fn emit(&self, output: Created<RentalDto>) -> Self::To {
        (StatusCode::CREATED, Json(RentalResponse::from(output.0))).into_response()
    }
}

impl Exhaust<Vec<OpenRentalDto>> for Presenter {
    type To = Json<Vec<OpenRentalResponse>>;
    fn emit(&self, output: Vec<OpenRentalDto>) -> Self::To {
        Json(
            output
                .into_iter()
                .map(|rental| OpenRentalResponse {
                    rental_id: rental.rental_id,
                    rented_at: rental.rented_at,
                    due_at: rental.due_at,
                    customer_id: rental.customer_id,
                    customer_name: rental.customer_name,
                    copy_id: rental.copy_id,
                    movie_id: rental.movie_id,
                    title: rental.title,
                })
                .collect(),
        )
    }
}

impl Exhaust<Created<PaymentDto>> for Presenter {
    type To = Response;
    fn emit(&self, output: Created<PaymentDto>) -> Self::To {
        (StatusCode::CREATED, Json(PaymentResponse::from(output.0))).into_response()
    }
}

impl Exhaust<Vec<PaymentDto>> for Presenter {
    type To = Json<Vec<PaymentResponse>>;
    fn emit(&self, output: Vec<PaymentDto>) -> Self::To {
        Json(output.into_iter().map(Into::into).collect())
    }
}
