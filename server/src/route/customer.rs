mod request;
mod response;

pub(in crate::route) use self::request::CreateCustomerRequest;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use application::service::{CreateCustomerService, GetCustomerService};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::customer::request::Transformer;
use crate::route::customer::response::{Created, Presenter};
use crate::session::CurrentSession;

pub trait CustomerRouter {
    fn route_customer(self) -> Self;
}

impl CustomerRouter for Router<AppModule> {
    fn route_customer(self) -> Self {
        self.route(
            "/customers",
            get(
                |State(handler): State<AppModule>, session: CurrentSession| async move {
                    Controller::new(Transformer, Presenter)
                        .bypass(|| handler.database().list_customers(session.get()))
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(handler): State<AppModule>,
                 session: CurrentSession,
                 Json(req): Json<CreateCustomerRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| async move {
                            handler
                                .database()
                                .create_customer(session.get(), dto)
                                .await
                                .map(Created)
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/customers/:id",
            get(
                |State(handler): State<AppModule>,
                 Path(id): Path<i64>,
                 session: CurrentSession| async move {
                    Controller::new(Transformer, Presenter)
                        .bypass(|| handler.database().get_customer(session.get(), id))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
