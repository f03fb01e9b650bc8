use std::process::{ExitCode, Termination};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use error_stack::{AttachmentKind, FrameKind, Report};
use serde::Serialize;

use kernel::KernelError;

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

#[derive(Debug)]
pub struct ErrorStatus(Report<KernelError>);

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus(e)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

fn status_of(error: &KernelError) -> (StatusCode, &'static str) {
    match error {
        KernelError::Validation => (StatusCode::BAD_REQUEST, "validation"),
        KernelError::Authentication => (StatusCode::UNAUTHORIZED, "authentication"),
        KernelError::Authorization => (StatusCode::FORBIDDEN, "authorization"),
        KernelError::NotFound => (StatusCode::NOT_FOUND, "not_found"),
        KernelError::Conflict => (StatusCode::CONFLICT, "conflict"),
        KernelError::NoAvailableCopy => (StatusCode::CONFLICT, "no_available_copy"),
        KernelError::Concurrency => (StatusCode::CONFLICT, "concurrency"),
        KernelError::Timeout => (StatusCode::REQUEST_TIMEOUT, "timeout"),
        KernelError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> Response {
        let context = self.0.current_context();
        let (status, error) = status_of(context);
        if status.is_server_error() {
            tracing::error!("{:?}", self.0);
        }
        // Internal details stay in the log.
        let message = match context {
            KernelError::Internal => context.to_string(),
            _ => self
                .0
                .frames()
                .find_map(|frame| match frame.kind() {
                    FrameKind::Attachment(AttachmentKind::Printable(printable)) => {
                        Some(printable.to_string())
                    }
                    _ => None,
                })
                .unwrap_or_else(|| context.to_string()),
        };
        (status, Json(ErrorBody { error, message })).into_response()
    }
}
