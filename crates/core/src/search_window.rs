//! Weekly availability search windows.
//!
//! The search starts tomorrow at a fixed wall-clock hour and slides forward
//! one week at a time, so window `k` covers
//! `[today + 1 + 7k, today + 8 + 7k)` with both bounds pinned to that hour.

use chrono::{Days, NaiveDate, NaiveTime};

use crate::types::SlotTime;

/// Default number of weekly windows searched before giving up.
pub const DEFAULT_SEARCH_WEEKS: u32 = 4;

/// Hard upper bound on the number of weekly windows a search may examine.
pub const MAX_SEARCH_WEEKS: u32 = 4;

/// Default wall-clock hour each window boundary is pinned to.
pub const DEFAULT_WINDOW_START_HOUR: u32 = 1;

const DAYS_PER_WINDOW: u64 = 7;

/// A single `[start, end)` range passed to the scheduler's availability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
    pub start: SlotTime,
    pub end: SlotTime,
}

/// Build the sequence of weekly windows for a search starting from `today`.
///
/// `start_hour` values outside `0..24` fall back to
/// [`DEFAULT_WINDOW_START_HOUR`].
pub fn search_windows(today: NaiveDate, weeks: u32, start_hour: u32) -> Vec<SearchWindow> {
    let pin = NaiveTime::from_hms_opt(start_hour, 0, 0).unwrap_or_else(default_pin);

    (0..u64::from(weeks))
        .filter_map(|k| {
            let first = today.checked_add_days(Days::new(1 + DAYS_PER_WINDOW * k))?;
            let last = first.checked_add_days(Days::new(DAYS_PER_WINDOW))?;
            Some(SearchWindow {
                start: first.and_time(pin),
                end: last.and_time(pin),
            })
        })
        .collect()
}

fn default_pin() -> NaiveTime {
    NaiveTime::from_hms_opt(DEFAULT_WINDOW_START_HOUR, 0, 0).unwrap_or(NaiveTime::MIN)
}
