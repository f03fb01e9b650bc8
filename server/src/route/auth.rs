mod request;
mod response;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use uuid::Uuid;

use application::service::{authorize, LoginService, LogoutService, RegisterService};
use application::transfer::LogoutDto;
use kernel::prelude::entity::Role;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::auth::request::{LoginRequest, RegisterRequest, Transformer};
use crate::route::auth::response::Presenter;
use crate::session::CurrentSession;

pub trait AuthRouter {
    fn route_auth(self) -> Self;
}

impl AuthRouter for Router<AppModule> {
    fn route_auth(self) -> Self {
        self.route(
            "/auth/register",
            post(
                |State(handler): State<AppModule>, Json(req): Json<RegisterRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| handler.database().register(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/auth/login",
            post(
                |State(handler): State<AppModule>, Json(req): Json<LoginRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| handler.database().login(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/auth/logout",
            post(
                |State(handler): State<AppModule>, session: CurrentSession| async move {
                    let session = authorize(session.get(), Role::User).map_err(ErrorStatus::from)?;
                    let session_id = Uuid::from(*session.id());
                    Controller::new(Transformer, Presenter)
                        .bypass(|| handler.database().logout(LogoutDto { session_id }))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
