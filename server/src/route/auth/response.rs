use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use application::transfer::SessionDto;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct RegisteredResponse {
    id: i64,
}

impl IntoResponse for RegisteredResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

/// `token` goes back in `Authorization: Bearer <token>`.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    token: Uuid,
    user_id: i64,
    username: String,
    role: String,
}

pub struct Presenter;

impl Exhaust<i64> for Presenter {
    type To = RegisteredResponse;
    fn emit(&self, output: i64) -> Self::To {
        RegisteredResponse { id: output }
    }
}

impl Exhaust<SessionDto> for Presenter {
    type To = Json<SessionResponse>;
    fn emit(&self, output: SessionDto) -> Self::To {
        Json(SessionResponse {
            token: output.id,
            user_id: output.user_id,
            username: output.user_name,
            role: output.role,
        })
    }
}

impl Exhaust<()> for Presenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::NO_CONTENT
    }
}
