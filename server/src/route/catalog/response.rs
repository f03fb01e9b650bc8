use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use application::transfer::{
    ActorDto, CategoryDto, MovieDetailDto, MovieDto, MovieSummaryDto,
};

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    id: i64,
}

impl IntoResponse for CreatedResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct CopiesResponse {
    copy_ids: Vec<i64>,
}

impl IntoResponse for CopiesResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct MovieSummaryResponse {
    id: i64,
    title: String,
    release_year: Option<i32>,
    mpaa_rating: Option<String>,
    rating: Option<f64>,
    categories: String,
}

#[derive(Debug, Serialize)]
pub struct MovieResponse {
    id: i64,
    title: String,
    release_year: Option<i32>,
    mpaa_rating: Option<String>,
    length_minutes: Option<i32>,
    rating: Option<f64>,
    description: Option<String>,
    rental_rate: f64,
    late_fee: f64,
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    id: i64,
    name: String,
}

#[derive(Debug, Serialize)]
pub struct ActorResponse {
    id: i64,
    first_name: String,
    last_name: String,
}

#[derive(Debug, Serialize)]
pub struct MovieDetailResponse {
    #[serde(flatten)]
    movie: MovieResponse,
    categories: Vec<CategoryResponse>,
    actors: Vec<ActorResponse>,
    total_copies: i64,
    available_copies: i64,
}

impl From<MovieDto> for MovieResponse {
    fn from(value: MovieDto) -> Self {
        Self {
            id: value.id,
            title: value.title,
            release_year: value.release_year,
            mpaa_rating: value.mpaa_rating,
            length_minutes: value.length_minutes,
            rating: value.rating,
            description: value.description,
            rental_rate: value.rental_rate,
            late_fee: value.late_fee,
        }
    }
}

impl From<CategoryDto> for CategoryResponse {
    fn from(value: CategoryDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

impl From<ActorDto> for ActorResponse {
    fn from(value: ActorDto) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
        }
    }
}

pub struct Presenter;

impl Exhaust<i64> for Presenter {
    type To = CreatedResponse;
    fn emit(&self, output: i64) -> Self::To {
        CreatedResponse { id: output }
    }
}

impl Exhaust<Vec<i64>> for Presenter {
    type To = CopiesResponse;
    fn emit(&self, output: Vec<i64>) -> Self::To {
        CopiesResponse { copy_ids: output }
    }
}

impl Exhaust<Vec<MovieSummaryDto>> for Presenter {
    type To = Json<Vec<MovieSummaryResponse>>;
    fn emit(&self, output: Vec<MovieSummaryDto>) -> Self::To {
        Json(
            output
                .into_iter()
                .map(|movie| MovieSummaryResponse {
                    id: movie.id,
                    title: movie.title,
                    release_year: movie.release_year,
                    mpaa_rating: movie.mpaa_rating,
                    rating: movie.rating,
                    categories: movie.categories,
                })
                .collect(),
        )
    }
}

impl Exhaust<MovieDetailDto> for Presenter {
    type To = Json<MovieDetailResponse>;
    fn emit(&self, output: MovieDetailDto) -> Self::To {
        Json(MovieDetailResponse {
            movie: output.movie.into(),
            categories: output.categories.into_iter().map(Into::into).collect(),
            actors: output.actors.into_iter().map(Into::into).collect(),
            total_copies: output.total_copies,
            available_copies: output.available_copies,
        })
    }
}

impl Exhaust<Vec<CategoryDto>> for Presenter {
    type To = Json<Vec<CategoryResponse>>;
    fn emit(&self, output: Vec<CategoryDto>) -> Self::To {
        Json(output.into_iter().map(Into::into).collect())
    }
}

impl Exhaust<Vec<ActorDto>> for Presenter {
    type To = Json<Vec<ActorResponse>>;
    fn emit(&self, output: Vec<ActorDto>) -> Self::To {
        Json(output.into_iter().map(Into::into).collect())
    }
}
