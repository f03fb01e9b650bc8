use destructure::Destructure;
use serde::Serialize;
use vodca::References;

use crate::entity::{
    CopyId, CustomerId, DueAt, FirstName, LastName, MovieId, MovieTitle, RentalId, RentedAt,
};

/// An open rental joined with who holds it and what they hold.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, References, Destructure)]
pub struct RentalOverview {
    rental_id: RentalId,
    rented_at: RentedAt,
    due_at: DueAt,
    customer_id: CustomerId,
    first_name: FirstName,
    last_name: LastName,
    copy_id: CopyId,
    movie_id: MovieId,
    title: MovieTitle,
}

impl RentalOverview {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        rental_id: RentalId,
        rented_at: RentedAt,
        due_at: DueAt,
        customer_id: CustomerId,
        first_name: FirstName,
        last_name: LastName,
        copy_id: CopyId,
        movie_id: MovieId,
        title: MovieTitle,
    ) -> Self {
        Self {
            rental_id,
            rented_at,
            due_at,
            customer_id,
            first_name,
            last_name,
            copy_id,
            movie_id,
            title,
        }
    }
}
