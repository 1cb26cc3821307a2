//! Collaborator seams for the system of record.
//!
//! The booking orchestrator only ever talks to the system of record through
//! these traits. Production wiring uses the PostgreSQL implementation from
//! the `db` crate; tests inject in-memory doubles.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::types::{DbId, SlotTime};
use crate::work_order::WorkOrder;

/// Document type attached after a booking is confirmed.
pub const DOC_TYPE_APPOINTMENT: &str = "APPOINTMENT";

/// Resolves work-order references to order details.
#[async_trait]
pub trait WorkOrderGateway: Send + Sync {
    /// Look up a work order. Returns `Ok(None)` for unknown references.
    async fn resolve(&self, reference: &str) -> Result<Option<WorkOrder>, CoreError>;
}

/// Confirmed visit details written back after a successful booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitRecord {
    pub reference: String,
    pub begin: SlotTime,
    pub end: SlotTime,
    pub order_id: String,
    pub booking_id: String,
    pub label: String,
}

/// Compensating writes applied to the system of record after booking.
#[async_trait]
pub trait SystemOfRecordGateway: Send + Sync {
    /// Record the confirmed visit and block duplicate sync triggers for the
    /// work order. Returns the internal visit id, if one was allocated.
    async fn record_visit(&self, visit: &VisitRecord) -> Result<Option<DbId>, CoreError>;

    /// Attach a process document to the work order.
    async fn attach_document(
        &self,
        doc_type: &str,
        reference: &str,
        internal_id: DbId,
        note: &str,
    ) -> Result<(), CoreError>;

    /// Mark the work order as issued. `Ok(false)` means the system of record
    /// refused the transition.
    async fn issue_work_order(&self, reference: &str) -> Result<bool, CoreError>;
}
