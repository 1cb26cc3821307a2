//! The two public booking workflows.

use std::sync::Arc;

use fieldbook_core::clock::Clock;
use fieldbook_core::gateways::{SystemOfRecordGateway, WorkOrderGateway};
use fieldbook_core::slot::{ConfirmedWindow, SlotView};
use fieldbook_core::types::SlotTime;
use fieldbook_core::work_order::WorkOrder;
use fieldbook_scheduler::SchedulingService;
use tokio_util::sync::CancellationToken;

use crate::availability::AvailabilitySearchEngine;
use crate::committer::BookingCommitter;
use crate::config::OrchestratorConfig;
use crate::error::{BookingError, BookingResult};
use crate::reconciler::OrderReconciler;
use crate::rpc::RpcPolicy;
use crate::session::SessionManager;

/// External systems the orchestrator is wired against.
#[derive(Clone)]
pub struct Collaborators {
    pub scheduler: Arc<dyn SchedulingService>,
    pub work_orders: Arc<dyn WorkOrderGateway>,
    pub system_of_record: Arc<dyn SystemOfRecordGateway>,
    pub clock: Arc<dyn Clock>,
}

/// Books field-service appointments against the external scheduler.
///
/// Holds no per-call state; each workflow call opens and owns its own
/// scheduler session, so one orchestrator can serve concurrent requests.
pub struct AppointmentOrchestrator {
    work_orders: Arc<dyn WorkOrderGateway>,
    sessions: SessionManager,
    reconciler: OrderReconciler,
    search: AvailabilitySearchEngine,
    committer: BookingCommitter,
    cancel: CancellationToken,
}

impl AppointmentOrchestrator {
    pub fn new(collaborators: Collaborators, config: OrchestratorConfig) -> Self {
        let cancel = CancellationToken::new();
        let rpc = RpcPolicy::new(config.rpc_timeout, cancel.clone());
        let Collaborators {
            scheduler,
            work_orders,
            system_of_record,
            clock,
        } = collaborators;

        Self {
            work_orders,
            sessions: SessionManager::new(Arc::clone(&scheduler), rpc.clone()),
            reconciler: OrderReconciler::new(Arc::clone(&scheduler), rpc.clone()),
            search: AvailabilitySearchEngine::new(Arc::clone(&scheduler), rpc.clone(), clock, &config),
            committer: BookingCommitter::new(scheduler, system_of_record, rpc),
            cancel,
        }
    }

    /// Token that aborts in-flight scheduler calls when cancelled.
    /// Sessions already opened are still closed.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Find open slots for a work order.
    ///
    /// Returns the available slots of the first weekly window that has any.
    pub async fn find_available_slots(&self, reference: &str) -> BookingResult<Vec<SlotView>> {
        let work_order = self.resolve(reference).await?.normalized();
        tracing::info!(reference = %work_order.reference, "Searching for available slots");

        let session = self.sessions.open().await?;
        let outcome = async {
            self.reconciler.ensure_order(&work_order, session.id()).await?;
            self.search.search(&work_order, session.id()).await
        }
        .await;
        let slots = self.sessions.release(session, outcome).await?;

        tracing::info!(
            reference = %work_order.reference,
            count = slots.len(),
            "Available slots found",
        );
        Ok(slots.iter().map(SlotView::from).collect())
    }

    /// Book `[begin, end)` for a work order and propagate the confirmation
    /// into the system of record.
    ///
    /// If the remote booking succeeds but a local step fails, the error is
    /// returned and the remote booking stays in place.
    pub async fn book_appointment(
        &self,
        reference: &str,
        begin: SlotTime,
        end: SlotTime,
    ) -> BookingResult<ConfirmedWindow> {
        let work_order = self.resolve(reference).await?;
        let reference = work_order.reference.trim();
        tracing::info!(reference, begin = %begin, end = %end, "Booking appointment");

        let session = self.sessions.open().await?;
        let outcome = self
            .committer
            .commit(session.id(), reference, begin, end)
            .await;
        let ids = self.sessions.release(session, outcome).await?;

        self.committer.propagate(reference, begin, end, &ids).await?;

        Ok(ConfirmedWindow::new(begin, end))
    }

    async fn resolve(&self, reference: &str) -> BookingResult<WorkOrder> {
        let invalid = || BookingError::InvalidWorkOrder {
            reference: reference.to_string(),
        };

        if reference.trim().is_empty() {
            return Err(invalid());
        }

        match self.work_orders.resolve(reference.trim()).await? {
            Some(work_order) if work_order.is_valid() => Ok(work_order),
            _ => {
                tracing::warn!(reference, "Work order not found");
                Err(invalid())
            }
        }
    }
}
