//! Multi-week search for open appointment slots.

use std::sync::Arc;

use fieldbook_core::clock::Clock;
use fieldbook_core::search_window::{search_windows, MAX_SEARCH_WEEKS};
use fieldbook_core::slot::{available_only, Slot};
use fieldbook_core::work_order::WorkOrder;
use fieldbook_scheduler::{SchedulingService, SessionId};

use crate::config::OrchestratorConfig;
use crate::error::{BookingError, BookingResult};
use crate::rpc::{require_success, RpcPolicy};

const CHECK_AVAILABILITY: &str = "CheckAvailability";

pub struct AvailabilitySearchEngine {
    scheduler: Arc<dyn SchedulingService>,
    rpc: RpcPolicy,
    clock: Arc<dyn Clock>,
    search_weeks: u32,
    window_start_hour: u32,
}

impl AvailabilitySearchEngine {
    pub fn new(
        scheduler: Arc<dyn SchedulingService>,
        rpc: RpcPolicy,
        clock: Arc<dyn Clock>,
        config: &OrchestratorConfig,
    ) -> Self {
        let search_weeks = config.search_weeks.clamp(1, MAX_SEARCH_WEEKS);
        if search_weeks != config.search_weeks {
            tracing::warn!(
                configured = config.search_weeks,
                effective = search_weeks,
                "Search weeks out of range, clamped",
            );
        }

        Self {
            scheduler,
            rpc,
            clock,
            search_weeks,
            window_start_hour: config.window_start_hour,
        }
    }

    /// Search weekly windows in order and return the available slots of the
    /// first window that has any. Later windows are not queried.
    pub async fn search(
        &self,
        work_order: &WorkOrder,
        session: &SessionId,
    ) -> BookingResult<Vec<Slot>> {
        let reference = work_order.reference.as_str();
        let windows = search_windows(self.clock.today(), self.search_weeks, self.window_start_hour);

        for (index, window) in windows.iter().enumerate() {
            let response = self
                .rpc
                .call(
                    CHECK_AVAILABILITY,
                    self.scheduler.check_availability(session, reference, window),
                )
                .await?;
            let response = require_success(CHECK_AVAILABILITY, response)?;

            let offered = response
                .payload
                .and_then(|p| p.slots)
                .ok_or_else(|| BookingError::MissingSlots {
                    reference: reference.to_string(),
                })?;

            let offered_count = offered.len();
            let available = available_only(offered.into_iter().map(Slot::from));

            tracing::info!(
                reference,
                week = index + 1,
                window_start = %window.start,
                window_end = %window.end,
                offered = offered_count,
                available = available.len(),
                "Checked scheduler availability",
            );

            if !available.is_empty() {
                return Ok(available);
            }
        }

        Err(BookingError::NoAvailableAppointments {
            reference: reference.to_string(),
        })
    }
}
