//! Failure taxonomy for the booking workflows.

use std::time::Duration;

use fieldbook_core::error::CoreError;

/// Every way a booking workflow can fail.
///
/// Each failure aborts the remainder of the workflow; no partial results
/// are returned. Where the scheduler supplied a message it is preserved.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    /// The reference is unknown to the system of record.
    #[error("Work order {reference} not found")]
    InvalidWorkOrder { reference: String },

    /// A scheduler RPC returned a non-success status, or could not be
    /// delivered at all.
    #[error("Scheduler {operation} failed: {message}")]
    SchedulingService {
        operation: &'static str,
        message: String,
    },

    /// The scheduler's availability response omitted its slot collection.
    #[error("Scheduler returned no slot collection for work order {reference}")]
    MissingSlots { reference: String },

    /// Every search window came back without an available slot.
    #[error("No available appointments for work order {reference}")]
    NoAvailableAppointments { reference: String },

    /// `ScheduleBooking` returned a non-success status.
    #[error("Booking failed: {message}")]
    BookingFailed { message: String },

    /// The remote booking succeeded but the work order could not be issued.
    #[error("Booking confirmed but work order {reference} could not be issued")]
    IssueFailed { reference: String },

    /// A scheduler RPC did not answer within the configured bound.
    #[error("Scheduler {operation} timed out after {}s", timeout.as_secs())]
    Timeout {
        operation: &'static str,
        timeout: Duration,
    },

    /// The orchestrator was shut down while an RPC was in flight.
    #[error("Scheduler {operation} cancelled")]
    Cancelled { operation: &'static str },

    /// The work-order store or system of record failed for infrastructure
    /// reasons.
    #[error(transparent)]
    Gateway(#[from] CoreError),
}

/// Convenience alias for orchestrator return values.
pub type BookingResult<T> = Result<T, BookingError>;

impl BookingError {
    /// Stable machine-readable code for this failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidWorkOrder { .. } => "INVALID_WORK_ORDER",
            Self::SchedulingService { .. } => "SCHEDULING_SERVICE_ERROR",
            Self::MissingSlots { .. } => "MISSING_SLOTS",
            Self::NoAvailableAppointments { .. } => "NO_AVAILABLE_APPOINTMENTS",
            Self::BookingFailed { .. } => "BOOKING_FAILED",
            Self::IssueFailed { .. } => "ISSUE_FAILED",
            Self::Timeout { .. } => "SCHEDULER_TIMEOUT",
            Self::Cancelled { .. } => "CANCELLED",
            Self::Gateway(_) => "GATEWAY_ERROR",
        }
    }

    pub(crate) fn scheduler(operation: &'static str, message: impl Into<String>) -> Self {
        Self::SchedulingService {
            operation,
            message: message.into(),
        }
    }
}
