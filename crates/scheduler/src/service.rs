//! The scheduler operations the booking orchestrator depends on.

use std::fmt;

use async_trait::async_trait;
use fieldbook_core::search_window::SearchWindow;
use fieldbook_core::types::SlotTime;
use fieldbook_core::work_order::WorkOrder;

use crate::api::SchedulerError;
use crate::messages::{Ack, AvailabilityPayload, RemoteOrderPayload, RpcResponse, SessionPayload};

/// Opaque session token issued by `OpenSession`.
///
/// Valid only until the matching `CloseSession`. Deliberately not `Clone`
/// so that a session has a single owner.
#[derive(PartialEq, Eq)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionId {
    // Tokens are credentials; never log them in full.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown: String = self.0.chars().take(4).collect();
        write!(f, "SessionId({shown}…)")
    }
}

/// The identifiers a booking must be committed against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteOrderIds {
    pub order_id: String,
    pub booking_id: String,
}

impl From<RemoteOrderPayload> for RemoteOrderIds {
    fn from(p: RemoteOrderPayload) -> Self {
        Self {
            order_id: p.order_id,
            booking_id: p.booking_id,
        }
    }
}

/// Stateless RPC surface of the external scheduler.
///
/// `Err` is reserved for transport failures. A scheduler-level failure is
/// an `Ok` response whose status is `error`.
#[async_trait]
pub trait SchedulingService: Send + Sync {
    async fn open_session(&self) -> Result<RpcResponse<SessionPayload>, SchedulerError>;

    async fn close_session(&self, session: &SessionId) -> Result<Ack, SchedulerError>;

    async fn create_order(
        &self,
        session: &SessionId,
        order: &WorkOrder,
    ) -> Result<Ack, SchedulerError>;

    /// Look up the remote order keyed by `reference`. A success response
    /// without a payload means no such order exists.
    async fn select_order(
        &self,
        session: &SessionId,
        reference: &str,
    ) -> Result<RpcResponse<RemoteOrderPayload>, SchedulerError>;

    async fn check_availability(
        &self,
        session: &SessionId,
        reference: &str,
        window: &SearchWindow,
    ) -> Result<RpcResponse<AvailabilityPayload>, SchedulerError>;

    async fn schedule_booking(
        &self,
        session: &SessionId,
        ids: &RemoteOrderIds,
        begin: SlotTime,
        end: SlotTime,
    ) -> Result<Ack, SchedulerError>;
}
