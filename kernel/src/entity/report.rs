use serde::Serialize;

use crate::entity::{MovieId, MovieTitle};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopularMovie {
    pub movie_id: MovieId,
    pub title: MovieTitle,
    pub rental_count: i64,
}

/// Point-in-time aggregates. Averages over an empty set are `0.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RentalStatistics {
    pub movie_count: i64,
    pub customer_count: i64,
    pub rental_count: i64,
    pub open_rental_count: i64,
    pub average_rental_days: f64,
    pub average_rental_rate: f64,
    pub average_rentals_per_customer: f64,
    pub average_movie_rating: f64,
    pub average_copies_per_movie: f64,
    pub average_payment_amount: f64,
}
