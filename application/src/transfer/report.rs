use kernel::prelude::entity::{PopularMovie, RentalStatistics};

#[derive(Debug, Clone)]
pub struct PopularMovieDto {
    pub movie_id: i64,
    pub title: String,
    pub rental_count: i64,
}

impl From<PopularMovie> for PopularMovieDto {
    fn from(value: PopularMovie) -> Self {
        Self {
            movie_id: value.movie_id.into(),
            title: value.title.into(),
            rental_count: value.rental_count,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatisticsDto {
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

impl From<RentalStatistics> for StatisticsDto {
    fn from(value: RentalStatistics) -> Self {
        Self {
            movie_count: value.movie_count,
            customer_count: value.customer_count,
            rental_count: value.rental_count,
            open_rental_count: value.open_rental_count,
            average_rental_days: value.average_rental_days,
            average_rental_rate: value.average_rental_rate,
            average_rentals_per_customer: value.average_rentals_per_customer,
            average_movie_rating: value.average_movie_rating,
            average_copies_per_movie: value.average_copies_per_movie,
            average_payment_amount: value.average_payment_amount,
        }
    }
}
