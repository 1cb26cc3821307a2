//! Committing a chosen window and propagating it to the system of record.
//!
//! The remote half ([`BookingCommitter::commit`]) runs inside the scheduler
//! session. The local half ([`BookingCommitter::propagate`]) runs after the
//! session is released. Local failures do not unwind the remote booking.

use std::sync::Arc;

use fieldbook_core::gateways::{SystemOfRecordGateway, VisitRecord, DOC_TYPE_APPOINTMENT};
use fieldbook_core::slot_label;
use fieldbook_core::time::format_utc;
use fieldbook_core::types::SlotTime;
use fieldbook_scheduler::{RemoteOrderIds, SchedulingService, SessionId};

use crate::error::{BookingError, BookingResult};
use crate::rpc::{require_success, RpcPolicy};

const SELECT_ORDER: &str = "SelectOrder";
const SCHEDULE_BOOKING: &str = "ScheduleBooking";

pub struct BookingCommitter {
    scheduler: Arc<dyn SchedulingService>,
    system_of_record: Arc<dyn SystemOfRecordGateway>,
    rpc: RpcPolicy,
}

impl BookingCommitter {
    pub fn new(
        scheduler: Arc<dyn SchedulingService>,
        system_of_record: Arc<dyn SystemOfRecordGateway>,
        rpc: RpcPolicy,
    ) -> Self {
        Self {
            scheduler,
            system_of_record,
            rpc,
        }
    }

    /// Resolve the remote order identifiers and book `[begin, end)` against them.
    pub async fn commit(
        &self,
        session: &SessionId,
        reference: &str,
        begin: SlotTime,
        end: SlotTime,
    ) -> BookingResult<RemoteOrderIds> {
        let selected = self
            .rpc
            .call(SELECT_ORDER, self.scheduler.select_order(session, reference))
            .await?;
        let ids: RemoteOrderIds = require_success(SELECT_ORDER, selected)?
            .payload
            .ok_or_else(|| {
                BookingError::scheduler(
                    SELECT_ORDER,
                    format!("no remote order for work order {reference}"),
                )
            })?
            .into();

        let booked = self
            .rpc
            .call(
                SCHEDULE_BOOKING,
                self.scheduler.schedule_booking(session, &ids, begin, end),
            )
            .await?;
        if !booked.is_success() {
            tracing::warn!(reference, message = %booked.message, "Scheduler rejected booking");
            return Err(BookingError::BookingFailed {
                message: booked.message,
            });
        }

        tracing::info!(
            reference,
            order_id = %ids.order_id,
            booking_id = %ids.booking_id,
            begin = %begin,
            end = %end,
            "Booking committed with scheduler",
        );
        Ok(ids)
    }

    /// Apply the compensating writes for a committed booking: record the
    /// visit, attach a process document, and issue the work order.
    pub async fn propagate(
        &self,
        reference: &str,
        begin: SlotTime,
        end: SlotTime,
        ids: &RemoteOrderIds,
    ) -> BookingResult<()> {
        let label = slot_label::label(begin, end);

        let visit = VisitRecord {
            reference: reference.to_string(),
            begin,
            end,
            order_id: ids.order_id.clone(),
            booking_id: ids.booking_id.clone(),
            label: label.to_string(),
        };
        let internal_id = self
            .system_of_record
            .record_visit(&visit)
            .await
            .map_err(|e| self.local_failure(reference, "record visit", e))?;
        tracing::info!(reference, label, ?internal_id, "Visit recorded");

        if let Some(internal_id) = internal_id {
            let note = document_note(label, begin, end);
            self.system_of_record
                .attach_document(DOC_TYPE_APPOINTMENT, reference, internal_id, &note)
                .await
                .map_err(|e| self.local_failure(reference, "attach document", e))?;
            tracing::info!(reference, internal_id, "Process document attached");
        }

        let issued = self
            .system_of_record
            .issue_work_order(reference)
            .await
            .map_err(|e| self.local_failure(reference, "issue work order", e))?;
        if !issued {
            tracing::error!(
                reference,
                "Work order could not be issued after booking was confirmed",
            );
            return Err(BookingError::IssueFailed {
                reference: reference.to_string(),
            });
        }

        tracing::info!(reference, "Work order issued");
        Ok(())
    }

    fn local_failure(
        &self,
        reference: &str,
        step: &'static str,
        err: fieldbook_core::error::CoreError,
    ) -> BookingError {
        tracing::error!(
            reference,
            step,
            error = %err,
            "System of record update failed after booking was confirmed",
        );
        BookingError::Gateway(err)
    }
}

/// Note stored on the process document, e.g.
/// `Appointment booked for Morning 2017-11-21T08:00:00Z-2017-11-21T10:00:00Z`.
fn document_note(label: &str, begin: SlotTime, end: SlotTime) -> String {
    let window = format!("{}-{}", format_utc(begin), format_utc(end));
    if label.is_empty() {
        format!("Appointment booked for {window}")
    } else {
        format!("Appointment booked for {label} {window}")
    }
}
