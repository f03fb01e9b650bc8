use serde::Deserialize;

use application::transfer::{
    AddCopiesDto, CreateActorDto, CreateCategoryDto, CreateMovieDto, MovieQueryDto,
};

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct ListMoviesRequest {
    keyword: Option<String>,
    category_id: Option<i64>,
    release_year: Option<i32>,
    min_rating: Option<f64>,
    sort: Option<String>,
    direction: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateMovieRequest {
    title: String,
    release_year: Option<i32>,
    mpaa_rating: Option<String>,
    length_minutes: Option<i32>,
    rating: Option<f64>,
    description: Option<String>,
    rental_rate: Option<f64>,
    late_fee: Option<f64>,
    #[serde(default)]
    category_ids: Vec<i64>,
    #[serde(default)]
    actor_ids: Vec<i64>,
    #[serde(default)]
    copies: i64,
    store_location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddCopiesRequest {
    count: i64,
    store_location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateActorRequest {
    first_name: String,
    last_name: String,
}

pub struct Transformer;

impl Intake<ListMoviesRequest> for Transformer {
    type To = MovieQueryDto;
    fn emit(&self, input: ListMoviesRequest) -> Self::To {
        MovieQueryDto {
            keyword: input.keyword,
            category_id: input.category_id,
            release_year: input.release_year,
            min_rating: input.min_rating,
            sort: input.sort,
            direction: input.direction,
        }
    }
}

impl Intake<CreateMovieRequest> for Transformer {
    type To = CreateMovieDto;
    fn emit(&self, input: CreateMovieRequest) -> Self::To {
        CreateMovieDto {
            title: input.title,
            release_year: input.release_year,
            mpaa_rating: input.mpaa_rating,
            length_minutes: input.length_minutes,
            rating: input.rating,
            description: input.description,
            rental_rate: input.rental_rate,
            late_fee: input.late_fee,
            category_ids: input.category_ids,
            actor_ids: input.actor_ids,
            copies: input.copies,
            store_location: input.store_location,
        }
    }
}

impl Intake<(i64, AddCopiesRequest)> for Transformer {
    type To = AddCopiesDto;
    fn emit(&self, (movie_id, req): (i64, AddCopiesRequest)) -> Self::To {
        AddCopiesDto {
            movie_id,
            count: req.count,
            store_location: req.store_location,
        }
    }
}

impl Intake<CreateCategoryRequest> for Transformer {
    type To = CreateCategoryDto;
    fn emit(&self, input: CreateCategoryRequest) -> Self::To {
        CreateCategoryDto { name: input.name }
    }
}

impl Intake<CreateActorRequest> for Transformer {
    type To = CreateActorDto;
    fn emit(&self, input: CreateActorRequest) -> Self::To {
        CreateActorDto {
            first_name: input.first_name,
            last_name: input.last_name,
        }
    }
}
