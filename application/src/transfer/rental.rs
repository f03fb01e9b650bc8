use time::OffsetDateTime;

use kernel::prelude::entity::{
    DestructPayment, DestructRental, DestructRentalOverview, Payment, Rental, RentalOverview,
};

use crate::transfer::CreateCustomerDto;

/// Who a rental is for: someone already on file, or a customer to register on the spot.
#[derive(Debug, Clone)]
pub enum RentalCustomerDto {
    Existing(i64),
    New(CreateCustomerDto),
}

#[derive(Debug, Clone)]
pub struct CreateRentalDto {
    pub customer: RentalCustomerDto,
    pub movie_id: i64,
}

pub struct ReturnRentalDto {
    pub rental_id: i64,
}

#[derive(Debug, Clone)]
pub struct RentalDto {
    pub id: i64,
    pub customer_id: i64,
    pub copy_id: i64,
    pub rented_at: OffsetDateTime,
    pub due_at: OffsetDateTime,
    pub returned_at: Option<OffsetDateTime>,
    pub status: String,
}

impl From<Rental> for RentalDto {
    fn from(value: Rental) -> Self {
        let DestructRental {
            id,
            customer_id,
            copy_id,
            rented_at,
            due_at,
            returned_at,
            status,
        } = value.into_destruct();
        Self {
            id: id.into(),
            customer_id: customer_id.into(),
            copy_id: copy_id.into(),
            rented_at: rented_at.into(),
            due_at: due_at.into(),
            returned_at: returned_at.map(Into::into),
            status: status.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpenRentalDto {
    pub rental_id: i64,
    pub rented_at: OffsetDateTime,
    pub due_at: OffsetDateTime,
    pub customer_id: i64,
    pub customer_name: String,
    pub copy_id: i64,
    pub movie_id: i64,
    pub title: String,
}

impl From<RentalOverview> for OpenRentalDto {
    fn from(value: RentalOverview) -> Self {
        let DestructRentalOverview {
            rental_id,
            rented_at,
            due_at,
            customer_id,
            first_name,
            last_name,
            copy_id,
            movie_id,
            title,
        } = value.into_destruct();
        let first_name: String = first_name.into();
        let last_name: String = last_name.into();
        Self {
            rental_id: rental_id.into(),
            rented_at: rented_at.into(),
            due_at: due_at.into(),
            customer_id: customer_id.into(),
            customer_name: format!("{first_name} {last_name}"),
            copy_id: copy_id.into(),
            movie_id: movie_id.into(),
            title: title.into(),
        }
    }
}

pub struct RecordPaymentDto {
    pub rental_id: i64,
    pub amount: f64,
}

#[derive(Debug, Clone)]
pub struct PaymentDto {
    pub id: i64,
    pub rental_id: i64,
    pub amount: f64,
    pub paid_at: OffsetDateTime,
}

impl From<Payment> for PaymentDto {
    fn from(value: Payment) -> Self {
        let DestructPayment {
            id,
            rental_id,
            amount,
            paid_at,
        } = value.into_destruct();
        Self {
            id: id.into(),
            rental_id: rental_id.into(),
            amount: amount.into(),
            paid_at: *paid_at.as_ref(),
        }
    }
}
