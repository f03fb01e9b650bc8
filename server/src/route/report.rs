mod response;

use axum::extract::State;
use axum::routing::get;
use axum::Router;

use application::service::GetReportService;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::report::response::Presenter;

pub trait ReportRouter {
    fn route_report(self) -> Self;
}

impl ReportRouter for Router<AppModule> {
    fn route_report(self) -> Self {
        self.route(
            "/reports/popular",
            get(|State(handler): State<AppModule>| async move {
                Controller::new((), Presenter)
                    .bypass(|| handler.database().popular_movies())
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
        .route(
            "/reports/statistics",
            get(|State(handler): State<AppModule>| async move {
                Controller::new((), Presenter)
                    .bypass(|| handler.database().statistics())
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
    }
}
