use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln, References};

use crate::entity::{CreatedAt, RentalId};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, Fromln, AsRefln)]
pub struct PaymentId(i64);

impl PaymentId {
    pub fn new(id: impl Into<i64>) -> Self {
        Self(id.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Fromln, AsRefln)]
pub struct PaymentAmount(f64);

impl PaymentAmount {
    pub fn new(amount: impl Into<f64>) -> Self {
        Self(amount.into())
    }
}

/// Append-only record of money received for a rental.
#[derive(Debug, Clone, PartialEq, Serialize, References, Destructure)]
pub struct Payment {
    id: PaymentId,
    rental_id: RentalId,
    amount: PaymentAmount,
    paid_at: CreatedAt<Payment>,
}

impl Payment {
    pub fn new(
        id: PaymentId,
        rental_id: RentalId,
        amount: PaymentAmount,
        paid_at: CreatedAt<Payment>,
    ) -> Self {
        Self {
            id,
            rental_id,
            amount,
            paid_at,
        }
    }
}
