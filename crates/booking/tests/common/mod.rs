//! Recording doubles for the orchestrator's collaborators.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use fieldbook_booking::{AppointmentOrchestrator, Collaborators, OrchestratorConfig};
use fieldbook_core::clock::Clock;
use fieldbook_core::error::CoreError;
use fieldbook_core::gateways::{SystemOfRecordGateway, VisitRecord, WorkOrderGateway};
use fieldbook_core::search_window::SearchWindow;
use fieldbook_core::types::{DbId, SlotTime};
use fieldbook_core::work_order::WorkOrder;
use fieldbook_scheduler::messages::{
    Ack, AvailabilityPayload, RemoteOrderPayload, RpcResponse, SessionPayload, WireSlot,
};
use fieldbook_scheduler::{RemoteOrderIds, SchedulerError, SchedulingService, SessionId};

pub const REFERENCE: &str = "00012345";
pub const SESSION: &str = "session-token-1";

/// 2017-11-20 is a Monday.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2017, 11, 20).unwrap()
}

pub fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2017, 11, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

pub fn work_order() -> WorkOrder {
    WorkOrder {
        reference: REFERENCE.into(),
        priority: "N ".into(),
        property_reference: "PROP-00042".into(),
        contact_name: "Jo Bloggs".into(),
        contact_phone: "07700 900123".into(),
        trade_tasks: vec!["Plumbing".into()],
    }
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// A scheduler call as observed by [`ScriptedScheduler`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    OpenSession,
    CloseSession(String),
    CreateOrder { reference: String, priority: String },
    SelectOrder(String),
    CheckAvailability(SearchWindow),
    ScheduleBooking {
        order_id: String,
        booking_id: String,
        begin: SlotTime,
        end: SlotTime,
    },
}

/// Scheduler double that replays scripted responses and records every call.
///
/// Unscripted calls succeed: sessions open, the remote order exists, and
/// availability checks return an empty slot list.
#[derive(Default)]
pub struct ScriptedScheduler {
    calls: Mutex<Vec<Call>>,
    open: Mutex<Option<RpcResponse<SessionPayload>>>,
    close: Mutex<Option<Ack>>,
    select: Mutex<VecDeque<RpcResponse<RemoteOrderPayload>>>,
    create: Mutex<Option<Ack>>,
    availability: Mutex<VecDeque<RpcResponse<AvailabilityPayload>>>,
    booking: Mutex<Option<Ack>>,
    hang_on: Mutex<Option<&'static str>>,
}

impl ScriptedScheduler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    pub fn closes(&self) -> usize {
        self.count(|c| matches!(c, Call::CloseSession(_)))
    }

    pub fn opens(&self) -> usize {
        self.count(|c| matches!(c, Call::OpenSession))
    }

    pub fn availability_windows(&self) -> Vec<SearchWindow> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CheckAvailability(w) => Some(w),
                _ => None,
            })
            .collect()
    }

    pub fn script_open(&self, response: RpcResponse<SessionPayload>) {
        *self.open.lock().unwrap() = Some(response);
    }

    pub fn script_close(&self, response: Ack) {
        *self.close.lock().unwrap() = Some(response);
    }

    pub fn script_select(&self, response: RpcResponse<RemoteOrderPayload>) {
        self.select.lock().unwrap().push_back(response);
    }

    pub fn script_create(&self, response: Ack) {
        *self.create.lock().unwrap() = Some(response);
    }

    pub fn script_availability(&self, response: RpcResponse<AvailabilityPayload>) {
        self.availability.lock().unwrap().push_back(response);
    }

    pub fn script_booking(&self, response: Ack) {
        *self.booking.lock().unwrap() = Some(response);
    }

    /// Make `operation` never answer.
    pub fn hang_on(&self, operation: &'static str) {
        *self.hang_on.lock().unwrap() = Some(operation);
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    async fn maybe_hang(&self, operation: &'static str) {
        let hang = *self.hang_on.lock().unwrap() == Some(operation);
        if hang {
            std::future::pending::<()>().await;
        }
    }
}

#[async_trait]
impl SchedulingService for ScriptedScheduler {
    async fn open_session(&self) -> Result<RpcResponse<SessionPayload>, SchedulerError> {
        self.record(Call::OpenSession);
        self.maybe_hang("OpenSession").await;
        Ok(self.open.lock().unwrap().take().unwrap_or_else(|| {
            RpcResponse::success(SessionPayload {
                session_id: SESSION.into(),
            })
        }))
    }

    async fn close_session(&self, session: &SessionId) -> Result<Ack, SchedulerError> {
        self.record(Call::CloseSession(session.as_str().to_string()));
        self.maybe_hang("CloseSession").await;
        Ok(self.close.lock().unwrap().take().unwrap_or_else(ok))
    }

    async fn create_order(
        &self,
        _session: &SessionId,
        order: &WorkOrder,
    ) -> Result<Ack, SchedulerError> {
        self.record(Call::CreateOrder {
            reference: order.reference.clone(),
            priority: order.priority.clone(),
        });
        self.maybe_hang("CreateOrder").await;
        Ok(self.create.lock().unwrap().take().unwrap_or_else(ok))
    }

    async fn select_order(
        &self,
        _session: &SessionId,
        reference: &str,
    ) -> Result<RpcResponse<RemoteOrderPayload>, SchedulerError> {
        self.record(Call::SelectOrder(reference.to_string()));
        self.maybe_hang("SelectOrder").await;
        Ok(self
            .select
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(remote_order))
    }

    async fn check_availability(
        &self,
        _session: &SessionId,
        _reference: &str,
        window: &SearchWindow,
    ) -> Result<RpcResponse<AvailabilityPayload>, SchedulerError> {
        self.record(Call::CheckAvailability(*window));
        self.maybe_hang("CheckAvailability").await;
        Ok(self
            .availability
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| slots(vec![])))
    }

    async fn schedule_booking(
        &self,
        _session: &SessionId,
        ids: &RemoteOrderIds,
        begin: SlotTime,
        end: SlotTime,
    ) -> Result<Ack, SchedulerError> {
        self.record(Call::ScheduleBooking {
            order_id: ids.order_id.clone(),
            booking_id: ids.booking_id.clone(),
            begin,
            end,
        });
        self.maybe_hang("ScheduleBooking").await;
        Ok(self.booking.lock().unwrap().take().unwrap_or_else(ok))
    }
}

pub fn ok() -> Ack {
    Ack::success(serde_json::Value::Null)
}

pub fn remote_order() -> RpcResponse<RemoteOrderPayload> {
    RpcResponse::success(RemoteOrderPayload {
        order_id: "ORD-1".into(),
        booking_id: "BKG-1".into(),
    })
}

/// `SelectOrder` answer for an order the scheduler does not know.
pub fn no_remote_order() -> RpcResponse<RemoteOrderPayload> {
    RpcResponse {
        payload: None,
        ..RpcResponse::success(RemoteOrderPayload {
            order_id: String::new(),
            booking_id: String::new(),
        })
    }
}

pub fn slot(begin: SlotTime, end: SlotTime, available: bool) -> WireSlot {
    WireSlot {
        begin_date: begin,
        end_date: end,
        best_slot: false,
        available,
    }
}

pub fn slots(slots: Vec<WireSlot>) -> RpcResponse<AvailabilityPayload> {
    RpcResponse::success(AvailabilityPayload { slots: Some(slots) })
}

pub fn null_slots() -> RpcResponse<AvailabilityPayload> {
    RpcResponse::success(AvailabilityPayload { slots: None })
}

// ---------------------------------------------------------------------------
// Work orders
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryWorkOrders {
    orders: Mutex<HashMap<String, WorkOrder>>,
    fail: Mutex<bool>,
}

impl InMemoryWorkOrders {
    pub fn with(orders: impl IntoIterator<Item = WorkOrder>) -> Arc<Self> {
        let store = Self::default();
        {
            let mut map = store.orders.lock().unwrap();
            for order in orders {
                map.insert(order.reference.clone(), order);
            }
        }
        Arc::new(store)
    }

    pub fn fail_lookups(&self) {
        *self.fail.lock().unwrap() = true;
    }
}

#[async_trait]
impl WorkOrderGateway for InMemoryWorkOrders {
    async fn resolve(&self, reference: &str) -> Result<Option<WorkOrder>, CoreError> {
        if *self.fail.lock().unwrap() {
            return Err(CoreError::Gateway("work order store unavailable".into()));
        }
        Ok(self.orders.lock().unwrap().get(reference).cloned())
    }
}

// ---------------------------------------------------------------------------
// System of record
// ---------------------------------------------------------------------------

/// A compensating write as observed by [`RecordingSystemOfRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Write {
    Visit(VisitRecord),
    Document {
        doc_type: String,
        reference: String,
        internal_id: DbId,
        note: String,
    },
    Issue(String),
}

pub struct RecordingSystemOfRecord {
    writes: Mutex<Vec<Write>>,
    visit_id: Mutex<Option<DbId>>,
    issue_succeeds: Mutex<bool>,
}

impl Default for RecordingSystemOfRecord {
    fn default() -> Self {
        Self {
            writes: Mutex::new(Vec::new()),
            visit_id: Mutex::new(Some(77)),
            issue_succeeds: Mutex::new(true),
        }
    }
}

impl RecordingSystemOfRecord {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn writes(&self) -> Vec<Write> {
        self.writes.lock().unwrap().clone()
    }

    pub fn set_visit_id(&self, id: Option<DbId>) {
        *self.visit_id.lock().unwrap() = id;
    }

    pub fn refuse_issue(&self) {
        *self.issue_succeeds.lock().unwrap() = false;
    }
}

#[async_trait]
impl SystemOfRecordGateway for RecordingSystemOfRecord {
    async fn record_visit(&self, visit: &VisitRecord) -> Result<Option<DbId>, CoreError> {
        self.writes.lock().unwrap().push(Write::Visit(visit.clone()));
        Ok(*self.visit_id.lock().unwrap())
    }

    async fn attach_document(
        &self,
        doc_type: &str,
        reference: &str,
        internal_id: DbId,
        note: &str,
    ) -> Result<(), CoreError> {
        self.writes.lock().unwrap().push(Write::Document {
            doc_type: doc_type.to_string(),
            reference: reference.to_string(),
            internal_id,
            note: note.to_string(),
        });
        Ok(())
    }

    async fn issue_work_order(&self, reference: &str) -> Result<bool, CoreError> {
        self.writes
            .lock()
            .unwrap()
            .push(Write::Issue(reference.to_string()));
        Ok(*self.issue_succeeds.lock().unwrap())
    }
}

// ---------------------------------------------------------------------------
// Clock and wiring
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

pub struct Harness {
    pub scheduler: Arc<ScriptedScheduler>,
    pub work_orders: Arc<InMemoryWorkOrders>,
    pub system_of_record: Arc<RecordingSystemOfRecord>,
    pub orchestrator: AppointmentOrchestrator,
}

/// Orchestrator wired to fresh doubles, knowing a single work order.
pub fn harness() -> Harness {
    harness_with(OrchestratorConfig::default())
}

pub fn harness_with(config: OrchestratorConfig) -> Harness {
    let scheduler = ScriptedScheduler::new();
    let work_orders = InMemoryWorkOrders::with([work_order()]);
    let system_of_record = RecordingSystemOfRecord::new();

    let orchestrator = AppointmentOrchestrator::new(
        Collaborators {
            scheduler: scheduler.clone(),
            work_orders: work_orders.clone(),
            system_of_record: system_of_record.clone(),
            clock: Arc::new(FixedClock(today())),
        },
        config,
    );

    Harness {
        scheduler,
        work_orders,
        system_of_record,
        orchestrator,
    }
}
