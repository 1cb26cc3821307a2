pub mod health;
pub mod work_orders;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /work-orders/{reference}/available-slots     find open slots (GET)
/// /work-orders/{reference}/appointments        book a slot (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/work-orders", work_orders::router())
}
