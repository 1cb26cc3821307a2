//! Candidate appointment windows offered by the scheduler.

use serde::Serialize;

use crate::time::format_utc;
use crate::types::SlotTime;

/// A time window offered by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub begin: SlotTime,
    pub end: SlotTime,
    /// The scheduler's preference hint.
    pub best_slot: bool,
    /// Only available slots are bookable.
    pub available: bool,
}

/// Keep only the slots the scheduler marked as available, preserving order.
pub fn available_only(slots: impl IntoIterator<Item = Slot>) -> Vec<Slot> {
    slots.into_iter().filter(|s| s.available).collect()
}

/// Outward representation of a slot, with UTC ISO-8601 timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotView {
    pub begin_utc: String,
    pub end_utc: String,
    pub best_slot: bool,
}

impl From<&Slot> for SlotView {
    fn from(slot: &Slot) -> Self {
        Self {
            begin_utc: format_utc(slot.begin),
            end_utc: format_utc(slot.end),
            best_slot: slot.best_slot,
        }
    }
}

/// A committed appointment window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmedWindow {
    pub begin_utc: String,
    pub end_utc: String,
}

impl ConfirmedWindow {
    pub fn new(begin: SlotTime, end: SlotTime) -> Self {
        Self {
            begin_utc: format_utc(begin),
            end_utc: format_utc(end),
        }
    }
}
