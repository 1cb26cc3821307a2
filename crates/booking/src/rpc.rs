//! Bounded, cancellable scheduler calls.
//!
//! Every scheduler RPC goes through [`RpcPolicy`], which applies the
//! per-call timeout, races the call against the orchestrator's
//! cancellation token and folds transport failures into
//! [`BookingError::SchedulingService`].

use std::future::Future;
use std::time::Duration;

use fieldbook_scheduler::messages::RpcResponse;
use fieldbook_scheduler::SchedulerError;
use tokio_util::sync::CancellationToken;

use crate::error::{BookingError, BookingResult};

#[derive(Debug, Clone)]
pub struct RpcPolicy {
    timeout: Duration,
    cancel: CancellationToken,
}

impl RpcPolicy {
    pub fn new(timeout: Duration, cancel: CancellationToken) -> Self {
        Self { timeout, cancel }
    }

    /// Run `call`, honouring both the timeout and cancellation.
    pub async fn call<T, F>(&self, operation: &'static str, call: F) -> BookingResult<RpcResponse<T>>
    where
        F: Future<Output = Result<RpcResponse<T>, SchedulerError>>,
    {
        tokio::select! {
            _ = self.cancel.cancelled() => {
                tracing::warn!(operation, "Scheduler call cancelled");
                Err(BookingError::Cancelled { operation })
            }
            result = self.bounded(operation, call) => result,
        }
    }

    /// Run `call` with the timeout only. Used for releasing resources that
    /// must be attempted even after cancellation.
    pub async fn call_uncancellable<T, F>(
        &self,
        operation: &'static str,
        call: F,
    ) -> BookingResult<RpcResponse<T>>
    where
        F: Future<Output = Result<RpcResponse<T>, SchedulerError>>,
    {
        self.bounded(operation, call).await
    }

    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> BookingResult<RpcResponse<T>>
    where
        F: Future<Output = Result<RpcResponse<T>, SchedulerError>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(e)) => {
                tracing::error!(operation, error = %e, "Scheduler transport failure");
                Err(BookingError::scheduler(operation, e.to_string()))
            }
            Err(_) => {
                tracing::error!(
                    operation,
                    timeout_secs = self.timeout.as_secs(),
                    "Scheduler call timed out",
                );
                Err(BookingError::Timeout {
                    operation,
                    timeout: self.timeout,
                })
            }
        }
    }
}

/// Turn a non-success response into [`BookingError::SchedulingService`].
pub fn require_success<T>(
    operation: &'static str,
    response: RpcResponse<T>,
) -> BookingResult<RpcResponse<T>> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(BookingError::scheduler(operation, response.message))
    }
}
