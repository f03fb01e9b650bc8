use destructure::Destructure;
use serde::Serialize;
use vodca::References;

use crate::entity::{
    Actor, Category, Movie, MovieId, MovieRating, MovieTitle, MpaaRating, ReleaseYear,
};

/// One row of a catalog listing.
#[derive(Debug, Clone, PartialEq, Serialize, References, Destructure)]
pub struct MovieSummary {
    id: MovieId,
    title: MovieTitle,
    release_year: Option<ReleaseYear>,
    mpaa_rating: Option<MpaaRating>,
    rating: Option<MovieRating>,
    categories: String,
}

impl MovieSummary {
    pub fn new(
        id: MovieId,
        title: MovieTitle,
        release_year: Option<ReleaseYear>,
        mpaa_rating: Option<MpaaRating>,
        rating: Option<MovieRating>,
        categories: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title,
            release_year,
            mpaa_rating,
            rating,
            categories: categories.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize)]
pub struct Availability {
    pub total: i64,
    pub available: i64,
}

impl Availability {
    pub fn new(total: i64, available: i64) -> Self {
        Self { total, available }
    }

    pub fn rented(&self) -> i64 {
        self.total - self.available
    }
}

#[derive(Debug, Clone, PartialEq, References, Destructure)]
pub struct MovieDetail {
    movie: Movie,
    categories: Vec<Category>,
    actors: Vec<Actor>,
    availability: Availability,
}

impl MovieDetail {
    pub fn new(
        movie: Movie,
        categories: Vec<Category>,
        actors: Vec<Actor>,
        availability: Availability,
    ) -> Self {
        Self {
            movie,
            categories,
            actors,
            availability,
        }
    }
}
