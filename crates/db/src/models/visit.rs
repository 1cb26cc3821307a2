//! Appointment visit and sync-block models.

use fieldbook_core::types::{DbId, SlotTime, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Reason stored on the sync block written alongside a booked visit.
pub const SYNC_BLOCK_APPOINTMENT_BOOKED: &str = "appointment_booked";

/// A confirmed visit recorded after the scheduler accepted a booking.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AppointmentVisit {
    pub id: DbId,
    pub work_order_reference: String,
    pub begin_at: SlotTime,
    pub end_at: SlotTime,
    pub scheduler_order_id: String,
    pub scheduler_booking_id: String,
    pub slot_label: String,
    pub created_at: Timestamp,
}

/// Suppresses the outbound sync trigger for a work order.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SyncBlock {
    pub id: DbId,
    pub work_order_reference: String,
    pub reason: String,
    pub created_at: Timestamp,
}
