//! Shared helpers for API integration tests.
//!
//! The app is wired against the real PostgreSQL system of record (the pool
//! handed in by `#[sqlx::test]`) and a canned scheduler double.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use chrono::{NaiveDate, NaiveDateTime};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use fieldbook_api::config::ServerConfig;
use fieldbook_api::router::build_app_router;
use fieldbook_api::state::AppState;
use fieldbook_booking::{AppointmentOrchestrator, Collaborators, OrchestratorConfig};
use fieldbook_core::clock::Clock;
use fieldbook_core::search_window::SearchWindow;
use fieldbook_core::types::SlotTime;
use fieldbook_core::work_order::WorkOrder;
use fieldbook_db::models::work_order::CreateWorkOrder;
use fieldbook_db::repositories::WorkOrderRepo;
use fieldbook_db::PgSystemOfRecord;
use fieldbook_scheduler::messages::{
    Ack, AvailabilityPayload, RemoteOrderPayload, RpcResponse, SessionPayload, WireSlot,
};
use fieldbook_scheduler::{RemoteOrderIds, SchedulerError, SchedulingService, SessionId};

pub const REFERENCE: &str = "00012345";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        utc_offset_minutes: 0,
    }
}

/// 2017-11-21 at `hour`:00.
pub fn tomorrow_at(hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2017, 11, 21)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

pub async fn seed_work_order(pool: &PgPool) {
    WorkOrderRepo::create(
        pool,
        &CreateWorkOrder {
            reference: REFERENCE.to_string(),
            priority: "N".to_string(),
            property_reference: "PROP-00042".to_string(),
            contact_name: "Jo Bloggs".to_string(),
            contact_phone: "07700 900123".to_string(),
            trade_tasks: vec!["Plumbing".to_string()],
        },
    )
    .await
    .unwrap();
}

// ---------------------------------------------------------------------------
// Scheduler double
// ---------------------------------------------------------------------------

/// Scheduler that knows the remote order, offers a fixed slot list in every
/// window and answers bookings with a fixed acknowledgement.
pub struct CannedScheduler {
    slots: Mutex<Vec<WireSlot>>,
    booking: Mutex<Ack>,
    bookings: AtomicUsize,
    closes: AtomicUsize,
}

impl CannedScheduler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            slots: Mutex::new(Vec::new()),
            booking: Mutex::new(RpcResponse::success(serde_json::Value::Null)),
            bookings: AtomicUsize::new(0),
            closes: AtomicUsize::new(0),
        })
    }

    pub fn offer(&self, begin: SlotTime, end: SlotTime, best_slot: bool) {
        self.slots.lock().unwrap().push(WireSlot {
            begin_date: begin,
            end_date: end,
            best_slot,
            available: true,
        });
    }

    pub fn reject_bookings(&self, message: &str) {
        *self.booking.lock().unwrap() = Ack::error(message);
    }

    pub fn bookings(&self) -> usize {
        self.bookings.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SchedulingService for CannedScheduler {
    async fn open_session(&self) -> Result<RpcResponse<SessionPayload>, SchedulerError> {
        Ok(RpcResponse::success(SessionPayload {
            session_id: "api-test-session".to_string(),
        }))
    }

    async fn close_session(&self, _session: &SessionId) -> Result<Ack, SchedulerError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(RpcResponse::success(serde_json::Value::Null))
    }

    async fn create_order(
        &self,
        _session: &SessionId,
        _order: &WorkOrder,
    ) -> Result<Ack, SchedulerError> {
        Ok(RpcResponse::success(serde_json::Value::Null))
    }

    async fn select_order(
        &self,
        _session: &SessionId,
        _reference: &str,
    ) -> Result<RpcResponse<RemoteOrderPayload>, SchedulerError> {
        Ok(RpcResponse::success(RemoteOrderPayload {
            order_id: "ORD-1".to_string(),
            booking_id: "BKG-1".to_string(),
        }))
    }

    async fn check_availability(
        &self,
        _session: &SessionId,
        _reference: &str,
        _window: &SearchWindow,
    ) -> Result<RpcResponse<AvailabilityPayload>, SchedulerError> {
        Ok(RpcResponse::success(AvailabilityPayload {
            slots: Some(self.slots.lock().unwrap().clone()),
        }))
    }

    async fn schedule_booking(
        &self,
        _session: &SessionId,
        _ids: &RemoteOrderIds,
        _begin: SlotTime,
        _end: SlotTime,
    ) -> Result<Ack, SchedulerError> {
        self.bookings.fetch_add(1, Ordering::SeqCst);
        Ok(self.booking.lock().unwrap().clone())
    }
}

#[derive(Debug)]
struct FixedClock;

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(2017, 11, 20).unwrap()
    }
}

// ---------------------------------------------------------------------------
// App wiring and request helpers
// ---------------------------------------------------------------------------

/// Build the full application router with all middleware layers, the given
/// database pool as system of record and `scheduler` as the remote side.
pub fn build_test_app(pool: PgPool, scheduler: Arc<CannedScheduler>) -> Router {
    let config = test_config();
    let system_of_record = Arc::new(PgSystemOfRecord::new(pool.clone()));
    let orchestrator = AppointmentOrchestrator::new(
        Collaborators {
            scheduler,
            work_orders: system_of_record.clone(),
            system_of_record,
            clock: Arc::new(FixedClock),
        },
        OrchestratorConfig::default(),
    );

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        orchestrator: Arc::new(orchestrator),
    };

    build_app_router(state, &config)
}

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
