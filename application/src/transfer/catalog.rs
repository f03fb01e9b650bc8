use kernel::prelude::entity::{
    Actor, Category, DestructActor, DestructCategory, DestructMovie, DestructMovieDetail,
    DestructMovieSummary, Movie, MovieDetail, MovieSummary,
};

/// Raw listing parameters. Every field is optional.
#[derive(Debug, Clone, Default)]
pub struct MovieQueryDto {
    pub keyword: Option<String>,
    pub category_id: Option<i64>,
    pub release_year: Option<i32>,
    pub min_rating: Option<f64>,
    pub sort: Option<String>,
    pub direction: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MovieSummaryDto {
    pub id: i64,
    pub title: String,
    pub release_year: Option<i32>,
    pub mpaa_rating: Option<String>,
    pub rating: Option<f64>,
    pub categories: String,
}

impl From<MovieSummary> for MovieSummaryDto {
    fn from(value: MovieSummary) -> Self {
        let DestructMovieSummary {
            id,
            title,
            release_year,
            mpaa_rating,
            rating,
            categories,
        } = value.into_destruct();
        Self {
            id: id.into(),
            title: title.into(),
            release_year: release_year.map(Into::into),
            mpaa_rating: mpaa_rating.map(Into::into),
            rating: rating.map(Into::into),
            categories,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MovieDto {
    pub id: i64,
    pub title: String,
    pub release_year: Option<i32>,
    pub mpaa_rating: Option<String>,
    pub length_minutes: Option<i32>,
    pub rating: Option<f64>,
    pub description: Option<String>,
    pub rental_rate: f64,
    pub late_fee: f64,
}

impl From<Movie> for MovieDto {
    fn from(value: Movie) -> Self {
        let DestructMovie {
            id,
            title,
            release_year,
            mpaa_rating,
            length,
            rating,
            description,
            rental_rate,
            late_fee,
        } = value.into_destruct();
        Self {
            id: id.into(),
            title: title.into(),
            release_year: release_year.map(Into::into),
            mpaa_rating: mpaa_rating.map(Into::into),
            length_minutes: length.map(Into::into),
            rating: rating.map(Into::into),
            description: description.map(Into::into),
            rental_rate: rental_rate.into(),
            late_fee: late_fee.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MovieDetailDto {
    pub movie: MovieDto,
    pub categories: Vec<CategoryDto>,
    pub actors: Vec<ActorDto>,
    pub total_copies: i64,
    pub available_copies: i64,
}

impl From<MovieDetail> for MovieDetailDto {
    fn from(value: MovieDetail) -> Self {
        let DestructMovieDetail {
            movie,
            categories,
            actors,
            availability,
        } = value.into_destruct();
        Self {
            movie: movie.into(),
            categories: categories.into_iter().map(CategoryDto::from).collect(),
            actors: actors.into_iter().map(ActorDto::from).collect(),
            total_copies: availability.total,
            available_copies: availability.available,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CategoryDto {
    pub id: i64,
    pub name: String,
}

impl From<Category> for CategoryDto {
    fn from(value: Category) -> Self {
        let DestructCategory { id, name } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ActorDto {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl From<Actor> for ActorDto {
    fn from(value: Actor) -> Self {
        let DestructActor {
            id,
            first_name,
            last_name,
        } = value.into_destruct();
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreateMovieDto {
    pub title: String,
    pub release_year: Option<i32>,
    pub mpaa_rating: Option<String>,
    pub length_minutes: Option<i32>,
    pub rating: Option<f64>,
    pub description: Option<String>,
    pub rental_rate: Option<f64>,
    pub late_fee: Option<f64>,
    pub category_ids: Vec<i64>,
    pub actor_ids: Vec<i64>,
    pub copies: i64,
    pub store_location: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AddCopiesDto {
    pub movie_id: i64,
    pub count: i64,
    pub store_location: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateCategoryDto {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct CreateActorDto {
    pub first_name: String,
    pub last_name: String,
}
