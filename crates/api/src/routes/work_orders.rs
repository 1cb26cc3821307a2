use axum::routing::{get, post};
use axum::Router;

use crate::handlers::appointments;
use crate::state::AppState;

/// Routes mounted at `/work-orders`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{reference}/available-slots",
            get(appointments::available_slots),
        )
        .route(
            "/{reference}/appointments",
            post(appointments::book_appointment),
        )
}
