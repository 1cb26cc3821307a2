//! Scheduler RPC envelopes and payloads.
//!
//! Every scheduler operation answers with the same envelope:
//! `{"status": "success"|"error", "message": "...", "code": "...", "payload": {...}}`.
//! `code` is optional and only sent by schedulers that classify their errors.

use fieldbook_core::slot::Slot;
use fieldbook_core::types::SlotTime;
use serde::{Deserialize, Serialize};

/// Structured error code for "an order with this reference already exists".
pub const CODE_ORDER_EXISTS: &str = "ORDER_EXISTS";

/// Outcome flag carried by every scheduler response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RpcStatus {
    Success,
    Error,
}

/// Common response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse<T> {
    pub status: RpcStatus,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default = "Option::default")]
    pub payload: Option<T>,
}

impl<T> RpcResponse<T> {
    pub fn success(payload: T) -> Self {
        Self {
            status: RpcStatus::Success,
            message: String::new(),
            code: None,
            payload: Some(payload),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: RpcStatus::Error,
            message: message.into(),
            code: None,
            payload: None,
        }
    }

    /// Attach a structured error code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == RpcStatus::Success
    }
}

/// Acknowledgement with no payload of interest.
pub type Ack = RpcResponse<serde_json::Value>;

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Payload of `OpenSession`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPayload {
    pub session_id: String,
}

/// Payload of `SelectOrder`: the identifiers a booking is committed against.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteOrderPayload {
    pub order_id: String,
    pub booking_id: String,
}

/// Payload of `CheckAvailability`.
///
/// `slots` is `None` when the scheduler omitted the collection entirely
/// (absent or `null`), which is distinct from an empty list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvailabilityPayload {
    #[serde(default)]
    pub slots: Option<Vec<WireSlot>>,
}

/// One offered slot as sent by the scheduler.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireSlot {
    pub begin_date: SlotTime,
    pub end_date: SlotTime,
    #[serde(default)]
    pub best_slot: bool,
    #[serde(default)]
    pub available: bool,
}

impl From<WireSlot> for Slot {
    fn from(w: WireSlot) -> Self {
        Slot {
            begin: w.begin_date,
            end: w.end_date,
            best_slot: w.best_slot,
            available: w.available,
        }
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenSessionRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseSessionRequest<'a> {
    pub session_id: &'a str,
}

/// Scheduler-side representation of a work order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload<'a> {
    pub primary_order_number: &'a str,
    pub priority: &'a str,
    pub property_reference: &'a str,
    pub contact_name: &'a str,
    pub contact_phone: &'a str,
    pub trade_tasks: &'a [String],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest<'a> {
    pub session_id: &'a str,
    pub order: OrderPayload<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectOrderRequest<'a> {
    pub session_id: &'a str,
    pub primary_order_number: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckAvailabilityRequest<'a> {
    pub session_id: &'a str,
    pub primary_order_number: &'a str,
    pub period_begin: SlotTime,
    pub period_end: SlotTime,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleBookingRequest<'a> {
    pub session_id: &'a str,
    pub order_id: &'a str,
    pub booking_id: &'a str,
    pub planning_window_start: SlotTime,
    pub planning_window_end: SlotTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_session_success() {
        let json = r#"{"status":"success","message":"","payload":{"sessionId":"abc"}}"#;
        let resp: RpcResponse<SessionPayload> = serde_json::from_str(json).unwrap();
        assert!(resp.is_success());
        assert_eq!(resp.payload.unwrap().session_id, "abc");
    }

    #[test]
    fn parse_error_without_payload() {
        let json = r#"{"status":"error","message":"Invalid credentials"}"#;
        let resp: RpcResponse<SessionPayload> = serde_json::from_str(json).unwrap();
        assert!(!resp.is_success());
        assert_eq!(resp.message, "Invalid credentials");
        assert!(resp.payload.is_none());
        assert!(resp.code.is_none());
    }

    #[test]
    fn parse_structured_error_code() {
        let json = r#"{"status":"error","message":"dup","code":"ORDER_EXISTS"}"#;
        let resp: Ack = serde_json::from_str(json).unwrap();
        assert_eq!(resp.code.as_deref(), Some(CODE_ORDER_EXISTS));
    }

    #[test]
    fn null_slots_differs_from_empty_slots() {
        let null: AvailabilityPayload = serde_json::from_str(r#"{"slots":null}"#).unwrap();
        let absent: AvailabilityPayload = serde_json::from_str(r#"{}"#).unwrap();
        let empty: AvailabilityPayload = serde_json::from_str(r#"{"slots":[]}"#).unwrap();
        assert!(null.slots.is_none());
        assert!(absent.slots.is_none());
        assert_eq!(empty.slots.map(|s| s.len()), Some(0));
    }

    #[test]
    fn parse_wire_slot() {
        let json = r#"{"slots":[{"beginDate":"2017-11-21T10:00:00","endDate":"2017-11-21T12:00:00","bestSlot":true,"available":true}]}"#;
        let payload: AvailabilityPayload = serde_json::from_str(json).unwrap();
        let slot: Slot = payload.slots.unwrap().remove(0).into();
        assert!(slot.available);
        assert!(slot.best_slot);
        assert_eq!(slot.begin.to_string(), "2017-11-21 10:00:00");
    }

    #[test]
    fn check_availability_request_uses_camel_case() {
        let begin = chrono::NaiveDate::from_ymd_opt(2017, 11, 21)
            .unwrap()
            .and_hms_opt(1, 0, 0)
            .unwrap();
        let req = CheckAvailabilityRequest {
            session_id: "s",
            primary_order_number: "00012345",
            period_begin: begin,
            period_end: begin,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["primaryOrderNumber"], "00012345");
        assert_eq!(json["periodBegin"], "2017-11-21T01:00:00");
    }
}
