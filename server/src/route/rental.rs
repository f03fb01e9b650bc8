mod request;
mod response;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use application::service::{
    CreateRentalService, GetRentalService, PaymentService, ReturnRentalService,
};
use application::transfer::ReturnRentalDto;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::rental::request::{CreateRentalRequest, RecordPaymentRequest, Transformer};
use crate::route::rental::response::{Created, Presenter};
use crate::session::CurrentSession;

pub trait RentalRouter {
    fn route_rental(self) -> Self;
}

impl RentalRouter for Router<AppModule> {
    fn route_rental(self) -> Self {
        self.route(
            "/rentals",
            get(
                |State(handler): State<AppModule>, session: CurrentSession| async move {
                    Controller::new(Transformer, Presenter)
                        .bypass(|| handler.database().list_open_rentals(session.get()))
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(handler): State<AppModule>,
                 session: CurrentSession,
                 Json(req): Json<CreateRentalRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .try_intake(req)
                        .map_err(ErrorStatus::from)?
                        .handle(|dto| async move {
                            handler
                                .database()
                                .create_rental(session.get(), dto)
                                .await
                                .map(Created)
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/rentals/:id/return",
            post(
                |State(handler): State<AppModule>,
                 Path(id): Path<i64>,
                 session: CurrentSession| async move {
                    Controller::new(Transformer, Presenter)
                        .bypass(|| {
                            handler
                                .database()
                                .return_rental(session.get(), ReturnRentalDto { rental_id: id })
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/rentals/:id/payments",
            get(
                |State(handler): State<AppModule>,
                 Path(id): Path<i64>,
                 session: CurrentSession| async move {
                    Controller::new(Transformer, Presenter)
                        .bypass(|| handler.database().list_payments(session.get(), id))
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(handler): State<AppModule>,
                 Path(id): Path<i64>,
                 session: CurrentSession,
                 Json(req): Json<RecordPaymentRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake((id, req))
                        .handle(|dto| async move {
                            handler
                                .database()
                                .record_payment(session.get(), dto)
                                .await
                                .map(Created)
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
