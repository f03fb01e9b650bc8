use axum::Json;
use serde::Serialize;

use application::transfer::{PopularMovieDto, StatisticsDto};

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct PopularMovieResponse {
    movie_id: i64,
    title: String,
    rental_count: i64,
}

#[derive(Debug, Serialize)]
pub struct StatisticsResponse {
    movie_count: i64,
    customer_count: i64,
    rental_count: i64,
    open_rental_count: i64,
    average_rental_days: f64,
    average_rental_rate: f64,
    average_rentals_per_customer: f64,
    average_movie_rating: f64,
    average_copies_per_movie: f64,
    average_payment_amount: f64,
}

pub struct Presenter;

impl Exhaust<Vec<PopularMovieDto>> for Presenter {
    type To = Json<Vec<PopularMovieResponse>>;
    fn emit(&self, output: Vec<PopularMovieDto>) -> Self::To {
        Json(
            output
                .into_iter()
                .map(|movie| PopularMovieResponse {
                    movie_id: movie.movie_id,
                    title: movie.title,
                    rental_count: movie.rental_count,
                })
                .collect(),
        )
    }
}

impl Exhaust<StatisticsDto> for Presenter {
    type To = Json<StatisticsResponse>;
    fn emit(&self, output: StatisticsDto) -> Self::To {
        Json(StatisticsResponse {
            movie_count: output.movie_count,
            customer_count: output.customer_count,
            rental_count: output.rental_count,
            open_rental_count: output.open_rental_count,
            average_rental_days: output.average_rental_days,
            average_rental_rate: output.average_rental_rate,
            average_rentals_per_customer: output.average_rentals_per_customer,
            average_movie_rating: output.average_movie_rating,
            average_copies_per_movie: output.average_copies_per_movie,
            average_payment_amount: output.average_payment_amount,
        })
    }
}
