//! Human-meaningful category for a booked time window.
//!
//! Rules are evaluated in order and the first match wins. Windows that
//! match no rule (for example a weekday window of exactly five hours
//! starting before 08:00) get an empty label.

use chrono::{Datelike, Timelike, Weekday};

use crate::types::SlotTime;

pub const LABEL_MORNING: &str = "Morning";
pub const LABEL_AFTERNOON: &str = "Afternoon";
pub const LABEL_AVOID_SCHOOL_RUN: &str = "Avoid School Run";
pub const LABEL_EVENING: &str = "Evening";
pub const LABEL_WEEKEND: &str = "Weekend";
pub const LABEL_ALL_DAY: &str = "All Day";

/// Label the window `[begin, end)`.
pub fn label(begin: SlotTime, end: SlotTime) -> &'static str {
    let hours = (end - begin).num_hours();
    let begin_hour = begin.hour();
    let end_hour = end.hour();

    if hours < 5 && begin_hour < 9 {
        LABEL_MORNING
    } else if hours < 5 && begin_hour >= 12 {
        LABEL_AFTERNOON
    } else if begin_hour > 8 && end_hour < 15 {
        LABEL_AVOID_SCHOOL_RUN
    } else if begin_hour >= 16 {
        LABEL_EVENING
    } else if matches!(begin.weekday(), Weekday::Sat | Weekday::Sun) {
        LABEL_WEEKEND
    } else if hours > 5 && begin_hour >= 8 {
        LABEL_ALL_DAY
    } else {
        ""
    }
}
