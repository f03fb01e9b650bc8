mod request;
mod response;

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use application::service::{
    AddCopiesService, CreateActorService, CreateCategoryService, CreateMovieService,
    GetActorService, GetCategoryService, GetMovieService,
};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::catalog::request::{
    AddCopiesRequest, CreateActorRequest, CreateCategoryRequest, CreateMovieRequest,
    ListMoviesRequest, Transformer,
};
use crate::route::catalog::response::Presenter;
use crate::session::CurrentSession;

pub trait CatalogRouter {
    fn route_catalog(self) -> Self;
}

impl CatalogRouter for Router<AppModule> {
    fn route_catalog(self) -> Self {
        self.route(
            "/movies",
            get(
                |State(handler): State<AppModule>, Query(req): Query<ListMoviesRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| handler.database().list_movies(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(handler): State<AppModule>,
                 session: CurrentSession,
                 Json(req): Json<CreateMovieRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| handler.database().create_movie(session.get(), dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/movies/:id",
            get(
                |State(handler): State<AppModule>, Path(id): Path<i64>| async move {
                    Controller::new(Transformer, Presenter)
                        .bypass(|| handler.database().get_movie(id))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/movies/:id/copies",
            post(
                |State(handler): State<AppModule>,
                 Path(id): Path<i64>,
                 session: CurrentSession,
                 Json(req): Json<AddCopiesRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake((id, req))
                        .handle(|dto| handler.database().add_copies(session.get(), dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/categories",
            get(|State(handler): State<AppModule>| async move {
                Controller::new(Transformer, Presenter)
                    .bypass(|| handler.database().list_categories())
                    .await
                    .map_err(ErrorStatus::from)
            })
            .post(
                |State(handler): State<AppModule>,
                 session: CurrentSession,
                 Json(req): Json<CreateCategoryRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| handler.database().create_category(session.get(), dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/actors",
            get(|State(handler): State<AppModule>| async move {
                Controller::new(Transformer, Presenter)
                    .bypass(|| handler.database().list_actors())
                    .await
                    .map_err(ErrorStatus::from)
            })
            .post(
                |State(handler): State<AppModule>,
                 session: CurrentSession,
                 Json(req): Json<CreateActorRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| handler.database().create_actor(session.get(), dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
