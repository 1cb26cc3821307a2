use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fieldbook_booking::BookingError;
use fieldbook_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for request validation and [`BookingError`] for
/// workflow failures. Implements [`IntoResponse`] to produce consistent JSON
/// error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `fieldbook_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A booking workflow failure.
    #[error(transparent)]
    Booking(#[from] BookingError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Booking(err) => classify_booking_error(err),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { entity, reference } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} {reference} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Gateway(msg) | CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            internal()
        }
    }
}

/// Map a booking failure to a status code. The scheduler's message is kept
/// in the body for diagnostics; system-of-record failures are sanitized.
fn classify_booking_error(err: &BookingError) -> (StatusCode, &'static str, String) {
    let status = match err {
        BookingError::InvalidWorkOrder { .. } | BookingError::NoAvailableAppointments { .. } => {
            StatusCode::NOT_FOUND
        }
        BookingError::SchedulingService { .. }
        | BookingError::MissingSlots { .. }
        | BookingError::BookingFailed { .. }
        | BookingError::IssueFailed { .. } => StatusCode::BAD_GATEWAY,
        BookingError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        BookingError::Cancelled { .. } => StatusCode::SERVICE_UNAVAILABLE,
        BookingError::Gateway(core) => return classify_core_error(core),
    };

    if status.is_server_error() {
        tracing::error!(error = %err, kind = err.kind(), "Booking workflow failed");
    }
    (status, err.kind(), err.to_string())
}
