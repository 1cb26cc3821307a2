//! Scheduler session lifecycle.
//!
//! A workflow owns exactly one session, held as a [`SessionLease`].
//! [`SessionManager::release`] closes it once the workflow body has
//! finished. If the workflow future is dropped first (an HTTP timeout or a
//! client disconnect), the lease's `Drop` hands the close to a background
//! task, so an opened session is closed on every path.

use std::sync::Arc;

use fieldbook_scheduler::{SchedulingService, SessionId};

use crate::error::{BookingError, BookingResult};
use crate::rpc::{require_success, RpcPolicy};

const OPEN_SESSION: &str = "OpenSession";
const CLOSE_SESSION: &str = "CloseSession";

/// An open scheduler session that has not yet been closed.
pub struct SessionLease {
    session: SessionId,
    scheduler: Arc<dyn SchedulingService>,
    rpc: RpcPolicy,
    released: bool,
}

impl SessionLease {
    pub fn id(&self) -> &SessionId {
        &self.session
    }
}

impl Drop for SessionLease {
    fn drop(&mut self) {
        if self.released {
            return;
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::error!("Scheduler session abandoned outside a runtime, cannot close it");
            return;
        };

        let session = std::mem::replace(&mut self.session, SessionId::new(String::new()));
        let scheduler = Arc::clone(&self.scheduler);
        let rpc = self.rpc.clone();

        tracing::warn!("Workflow abandoned with an open scheduler session, closing in background");
        runtime.spawn(async move {
            if let Err(e) = close_session(scheduler.as_ref(), &rpc, &session).await {
                tracing::warn!(error = %e, "Background close of abandoned scheduler session failed");
            }
        });
    }
}

async fn close_session(
    scheduler: &dyn SchedulingService,
    rpc: &RpcPolicy,
    session: &SessionId,
) -> BookingResult<()> {
    let response = rpc
        .call_uncancellable(CLOSE_SESSION, scheduler.close_session(session))
        .await?;
    require_success(CLOSE_SESSION, response)?;
    tracing::info!("Scheduler session closed");
    Ok(())
}

pub struct SessionManager {
    scheduler: Arc<dyn SchedulingService>,
    rpc: RpcPolicy,
}

impl SessionManager {
    pub fn new(scheduler: Arc<dyn SchedulingService>, rpc: RpcPolicy) -> Self {
        Self { scheduler, rpc }
    }

    /// Open a new scheduler session.
    pub async fn open(&self) -> BookingResult<SessionLease> {
        let response = self
            .rpc
            .call(OPEN_SESSION, self.scheduler.open_session())
            .await?;
        let response = require_success(OPEN_SESSION, response)?;

        let session_id = response
            .payload
            .map(|p| p.session_id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| BookingError::scheduler(OPEN_SESSION, "no session id returned"))?;

        tracing::info!("Scheduler session opened");
        Ok(SessionLease {
            session: SessionId::new(session_id),
            scheduler: Arc::clone(&self.scheduler),
            rpc: self.rpc.clone(),
            released: false,
        })
    }

    /// Close a session. Consumes the lease so it cannot be reused.
    ///
    /// Close is attempted even if the orchestrator has been cancelled. If
    /// this future is itself dropped mid-call, the lease retries the close
    /// in the background.
    pub async fn close(&self, mut lease: SessionLease) -> BookingResult<()> {
        let result = close_session(self.scheduler.as_ref(), &self.rpc, &lease.session).await;
        lease.released = true;
        result
    }

    /// Close `lease` and combine the result with the workflow `outcome`.
    ///
    /// The workflow error wins over a close error; a close failure after a
    /// successful body fails the workflow.
    pub async fn release<T>(
        &self,
        lease: SessionLease,
        outcome: BookingResult<T>,
    ) -> BookingResult<T> {
        let closed = self.close(lease).await;
        match (outcome, closed) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(close_err)) => Err(close_err),
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(close_err)) => {
                tracing::warn!(
                    error = %close_err,
                    "Failed to release scheduler session after workflow error",
                );
                Err(err)
            }
        }
    }
}
