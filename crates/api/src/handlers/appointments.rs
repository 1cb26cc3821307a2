//! Handlers for appointment slot search and booking.
//!
//! Both endpoints are keyed by the work order reference and delegate to the
//! shared [`AppointmentOrchestrator`](fieldbook_booking::AppointmentOrchestrator).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use fieldbook_core::error::CoreError;
use fieldbook_core::time::parse_timestamp;
use fieldbook_core::types::SlotTime;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /work-orders/{reference}/appointments`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointmentRequest {
    pub begin_utc: String,
    pub end_utc: String,
}

impl BookAppointmentRequest {
    /// Parse both bounds and require a non-empty window.
    fn window(&self) -> AppResult<(SlotTime, SlotTime)> {
        let begin = parse_timestamp(&self.begin_utc)?;
        let end = parse_timestamp(&self.end_utc)?;
        if begin >= end {
            return Err(AppError::Core(CoreError::Validation(
                "beginUtc must be before endUtc".to_string(),
            )));
        }
        Ok((begin, end))
    }
}

/// GET /api/v1/work-orders/{reference}/available-slots
///
/// Open slots from the first weekly window that has any.
pub async fn available_slots(
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> AppResult<impl IntoResponse> {
    let slots = state.orchestrator.find_available_slots(&reference).await?;

    tracing::info!(reference = %reference, count = slots.len(), "Available slots returned");

    Ok(Json(DataResponse { data: slots }))
}

/// POST /api/v1/work-orders/{reference}/appointments
///
/// Book the given window and issue the work order.
pub async fn book_appointment(
    State(state): State<AppState>,
    Path(reference): Path<String>,
    Json(input): Json<BookAppointmentRequest>,
) -> AppResult<impl IntoResponse> {
    let (begin, end) = input.window()?;

    let confirmed = state
        .orchestrator
        .book_appointment(&reference, begin, end)
        .await?;

    tracing::info!(
        reference = %reference,
        begin = %confirmed.begin_utc,
        end = %confirmed.end_utc,
        "Appointment booked",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: confirmed })))
}
