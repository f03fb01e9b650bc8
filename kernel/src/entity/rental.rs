mod id;
mod overview;
mod period;
mod status;

pub use self::{id::*, overview::*, period::*, status::*};
use destructure::Destructure;
use serde::Serialize;
use vodca::References;

use crate::entity::{CopyId, CustomerId};

/// A customer's hold on one inventory copy.
///
/// Created `OPEN`, moved to `RETURNED` exactly once, never deleted.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, References, Destructure)]
pub struct Rental {
    id: RentalId,
    customer_id: CustomerId,
    copy_id: CopyId,
    rented_at: RentedAt,
    due_at: DueAt,
    returned_at: Option<ReturnedAt>,
    status: RentalStatus,
}

impl Rental {
    pub fn new(
        id: RentalId,
        customer_id: CustomerId,
        copy_id: CopyId,
        rented_at: RentedAt,
        due_at: DueAt,
        returned_at: Option<ReturnedAt>,
        status: RentalStatus,
    ) -> Self {
        Self {
            id,
            customer_id,
            copy_id,
            rented_at,
            due_at,
            returned_at,
            status,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == RentalStatus::Open
    }
}

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct NewRental {
    customer_id: CustomerId,
    copy_id: CopyId,
    rented_at: RentedAt,
    due_at: DueAt,
}

impl NewRental {
    /// Opens a rental starting at `rented_at`, due after [`RENTAL_PERIOD`].
    pub fn open(customer_id: CustomerId, copy_id: CopyId, rented_at: RentedAt) -> Self {
        let due_at = DueAt::after(&rented_at);
        Self {
            customer_id,
            copy_id,
            rented_at,
            due_at,
        }
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn new_rental_is_due_five_days_later() {
        let rented_at = RentedAt::new(datetime!(2025-11-01 10:00 UTC));
        let rental = NewRental::open(CustomerId::new(1), CopyId::new(1), rented_at);
        assert_eq!(
            rental.due_at(),
            &DueAt::new(datetime!(2025-11-06 10:00 UTC))
        );
    }
}
