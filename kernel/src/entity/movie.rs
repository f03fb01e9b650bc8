mod description;
mod detail;
mod filter;
mod id;
mod price;
mod rating;
mod release;
mod title;

pub use self::{
    description::*, detail::*, filter::*, id::*, price::*, rating::*, release::*, title::*,
};
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, PartialEq, References, Destructure)]
pub struct Movie {
    id: MovieId,
    title: MovieTitle,
    release_year: Option<ReleaseYear>,
    mpaa_rating: Option<MpaaRating>,
    length: Option<LengthMinutes>,
    rating: Option<MovieRating>,
    description: Option<MovieDescription>,
    rental_rate: RentalRate,
    late_fee: LateFee,
}

impl Movie {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: MovieId,
        title: MovieTitle,
        release_year: Option<ReleaseYear>,
        mpaa_rating: Option<MpaaRating>,
        length: Option<LengthMinutes>,
        rating: Option<MovieRating>,
        description: Option<MovieDescription>,
        rental_rate: RentalRate,
        late_fee: LateFee,
    ) -> Self {
        Self {
            id,
            title,
            release_year,
            mpaa_rating,
            length,
            rating,
            description,
            rental_rate,
            late_fee,
        }
    }
}

/// A movie that has not been stored yet. The store assigns its [`MovieId`].
#[derive(Debug, Clone, PartialEq, References, Destructure)]
pub struct NewMovie {
    title: MovieTitle,
    release_year: Option<ReleaseYear>,
    mpaa_rating: Option<MpaaRating>,
    length: Option<LengthMinutes>,
    rating: Option<MovieRating>,
    description: Option<MovieDescription>,
    rental_rate: RentalRate,
    late_fee: LateFee,
}

impl NewMovie {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: MovieTitle,
        release_year: Option<ReleaseYear>,
        mpaa_rating: Option<MpaaRating>,
        length: Option<LengthMinutes>,
        rating: Option<MovieRating>,
        description: Option<MovieDescription>,
        rental_rate: RentalRate,
        late_fee: LateFee,
    ) -> Self {
        Self {
            title,
            release_year,
            mpaa_rating,
            length,
            rating,
            description,
            rental_rate,
            late_fee,
        }
    }
}
