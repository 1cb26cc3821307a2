//! Idempotent registration of a work order with the scheduler.

use std::sync::Arc;

use fieldbook_core::work_order::WorkOrder;
use fieldbook_scheduler::messages::{Ack, CODE_ORDER_EXISTS};
use fieldbook_scheduler::{SchedulingService, SessionId};

use crate::error::{BookingError, BookingResult};
use crate::rpc::RpcPolicy;

const SELECT_ORDER: &str = "SelectOrder";
const CREATE_ORDER: &str = "CreateOrder";

/// Free-text marker some schedulers use instead of [`CODE_ORDER_EXISTS`].
const ORDER_EXISTS_MESSAGE: &str = "order already exists";

/// How the remote order came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciled {
    /// `SelectOrder` found it; nothing was created.
    Existing,
    /// `CreateOrder` created it.
    Created,
    /// `CreateOrder` reported it already existed.
    AlreadyExists,
}

pub struct OrderReconciler {
    scheduler: Arc<dyn SchedulingService>,
    rpc: RpcPolicy,
}

impl OrderReconciler {
    pub fn new(scheduler: Arc<dyn SchedulingService>, rpc: RpcPolicy) -> Self {
        Self { scheduler, rpc }
    }

    /// Make sure the scheduler holds a remote order for `work_order`.
    ///
    /// Calling this twice for the same reference never fails on the second
    /// call.
    pub async fn ensure_order(
        &self,
        work_order: &WorkOrder,
        session: &SessionId,
    ) -> BookingResult<Reconciled> {
        let reference = work_order.reference.as_str();

        let selected = self
            .rpc
            .call(SELECT_ORDER, self.scheduler.select_order(session, reference))
            .await?;
        if selected.is_success() && selected.payload.is_some() {
            tracing::info!(reference, "Remote order already registered");
            return Ok(Reconciled::Existing);
        }
        if !selected.is_success() {
            tracing::debug!(
                reference,
                message = %selected.message,
                "Remote order lookup failed, creating",
            );
        }

        let created = self
            .rpc
            .call(CREATE_ORDER, self.scheduler.create_order(session, work_order))
            .await?;

        if created.is_success() {
            tracing::info!(reference, "Remote order created");
            Ok(Reconciled::Created)
        } else if is_order_exists(&created) {
            tracing::warn!(
                reference,
                message = %created.message,
                "Remote order already exists, continuing",
            );
            Ok(Reconciled::AlreadyExists)
        } else {
            Err(BookingError::scheduler(CREATE_ORDER, created.message))
        }
    }
}

fn is_order_exists(response: &Ack) -> bool {
    response.code.as_deref() == Some(CODE_ORDER_EXISTS)
        || response
            .message
            .to_lowercase()
            .contains(ORDER_EXISTS_MESSAGE)
}
