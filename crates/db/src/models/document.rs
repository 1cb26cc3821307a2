use fieldbook_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A process document attached to a work order.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProcessDocument {
    pub id: DbId,
    pub doc_type: String,
    pub work_order_reference: String,
    pub visit_id: DbId,
    pub note: String,
    pub created_at: Timestamp,
}
