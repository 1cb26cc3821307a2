//! Work order entity model.

use fieldbook_core::types::{DbId, Timestamp};
use fieldbook_core::work_order::WorkOrder;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Work order has been received but no visit is booked yet.
pub const STATUS_PENDING: &str = "pending";

/// A visit is booked and the work order has been issued to the trade.
pub const STATUS_ISSUED: &str = "issued";

/// Work order was withdrawn; it can no longer be issued.
pub const STATUS_CANCELLED: &str = "cancelled";

/// A row from the `work_orders` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkOrderRow {
    pub id: DbId,
    pub reference: String,
    pub priority: String,
    pub property_reference: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub trade_tasks: Vec<String>,
    pub status: String,
    pub issued_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<WorkOrderRow> for WorkOrder {
    fn from(row: WorkOrderRow) -> Self {
        WorkOrder {
            reference: row.reference,
            priority: row.priority,
            property_reference: row.property_reference,
            contact_name: row.contact_name,
            contact_phone: row.contact_phone,
            trade_tasks: row.trade_tasks,
        }
    }
}

/// DTO for inserting a work order.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorkOrder {
    pub reference: String,
    pub priority: String,
    pub property_reference: String,
    pub contact_name: String,
    pub contact_phone: String,
    #[serde(default)]
    pub trade_tasks: Vec<String>,
}
