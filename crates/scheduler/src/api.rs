//! HTTP client for the scheduler's RPC endpoints.
//!
//! Each operation is a `POST {base_url}/{Operation}` with a JSON body and a
//! JSON [`RpcResponse`] envelope in return, using [`reqwest`].

use async_trait::async_trait;
use fieldbook_core::search_window::SearchWindow;
use fieldbook_core::types::SlotTime;
use fieldbook_core::work_order::WorkOrder;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::messages::{
    Ack, AvailabilityPayload, CheckAvailabilityRequest, CloseSessionRequest, CreateOrderRequest,
    OpenSessionRequest, OrderPayload, RemoteOrderPayload, RpcResponse, ScheduleBookingRequest,
    SelectOrderRequest, SessionPayload,
};
use crate::service::{RemoteOrderIds, SchedulingService, SessionId};

/// Header used to correlate a single RPC in scheduler-side logs.
const CORRELATION_HEADER: &str = "x-correlation-id";

/// Connection settings for a scheduler instance.
#[derive(Debug, Clone, Default)]
pub struct SchedulerApiConfig {
    /// Base HTTP URL, e.g. `https://scheduler.example.com/api`.
    pub base_url: String,
    pub username: String,
    pub password: String,
}

impl SchedulerApiConfig {
    /// Load from environment variables.
    ///
    /// | Env Var              | Default    |
    /// |----------------------|------------|
    /// | `SCHEDULER_URL`      | (required) |
    /// | `SCHEDULER_USERNAME` | empty      |
    /// | `SCHEDULER_PASSWORD` | empty      |
    pub fn from_env() -> Result<Self, SchedulerError> {
        let base_url = std::env::var("SCHEDULER_URL")
            .map_err(|_| SchedulerError::Config("SCHEDULER_URL must be set".into()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            username: std::env::var("SCHEDULER_USERNAME").unwrap_or_default(),
            password: std::env::var("SCHEDULER_PASSWORD").unwrap_or_default(),
        })
    }
}

/// HTTP client for a single scheduler instance.
pub struct SchedulerApi {
    client: reqwest::Client,
    config: SchedulerApiConfig,
}

/// Transport-level errors from the scheduler client.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The scheduler returned a non-2xx status code.
    #[error("Scheduler HTTP error ({status}): {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The client is misconfigured.
    #[error("Scheduler configuration error: {0}")]
    Config(String),
}

impl SchedulerApi {
    pub fn new(config: SchedulerApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self, operation: &str) -> String {
        format!("{}/{}", self.config.base_url, operation)
    }

    // ---- private helpers ----

    /// POST `body` to `operation` and decode the response envelope.
    async fn call<B, T>(&self, operation: &str, body: &B) -> Result<RpcResponse<T>, SchedulerError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let correlation_id = uuid::Uuid::new_v4().to_string();
        tracing::debug!(operation, correlation_id = %correlation_id, "Scheduler RPC");

        let response = self
            .client
            .post(self.endpoint(operation))
            .header(CORRELATION_HEADER, &correlation_id)
            .json(body)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        Ok(response.json::<RpcResponse<T>>().await?)
    }

    /// Ensure the response has a success status code, or return a
    /// [`SchedulerError::Http`] carrying the status and body text.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, SchedulerError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(SchedulerError::Http {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl SchedulingService for SchedulerApi {
    async fn open_session(&self) -> Result<RpcResponse<SessionPayload>, SchedulerError> {
        let body = OpenSessionRequest {
            username: &self.config.username,
            password: &self.config.password,
        };
        self.call("OpenSession", &body).await
    }

    async fn close_session(&self, session: &SessionId) -> Result<Ack, SchedulerError> {
        let body = CloseSessionRequest {
            session_id: session.as_str(),
        };
        self.call("CloseSession", &body).await
    }

    async fn create_order(
        &self,
        session: &SessionId,
        order: &WorkOrder,
    ) -> Result<Ack, SchedulerError> {
        let body = CreateOrderRequest {
            session_id: session.as_str(),
            order: OrderPayload {
                primary_order_number: &order.reference,
                priority: &order.priority,
                property_reference: &order.property_reference,
                contact_name: &order.contact_name,
                contact_phone: &order.contact_phone,
                trade_tasks: &order.trade_tasks,
            },
        };
        self.call("CreateOrder", &body).await
    }

    async fn select_order(
        &self,
        session: &SessionId,
        reference: &str,
    ) -> Result<RpcResponse<RemoteOrderPayload>, SchedulerError> {
        let body = SelectOrderRequest {
            session_id: session.as_str(),
            primary_order_number: reference,
        };
        self.call("SelectOrder", &body).await
    }

    async fn check_availability(
        &self,
        session: &SessionId,
        reference: &str,
        window: &SearchWindow,
    ) -> Result<RpcResponse<AvailabilityPayload>, SchedulerError> {
        let body = CheckAvailabilityRequest {
            session_id: session.as_str(),
            primary_order_number: reference,
            period_begin: window.start,
            period_end: window.end,
        };
        self.call("CheckAvailability", &body).await
    }

    async fn schedule_booking(
        &self,
        session: &SessionId,
        ids: &RemoteOrderIds,
        begin: SlotTime,
        end: SlotTime,
    ) -> Result<Ack, SchedulerError> {
        let body = ScheduleBookingRequest {
            session_id: session.as_str(),
            order_id: &ids.order_id,
            booking_id: &ids.booking_id,
            planning_window_start: begin,
            planning_window_end: end,
        };
        self.call("ScheduleBooking", &body).await
    }
}
