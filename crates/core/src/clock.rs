//! Time source abstraction.
//!
//! The booking orchestrator asks a [`Clock`] for "today" so that search
//! windows are deterministic under test.

use chrono::{FixedOffset, NaiveDate, Offset, Utc};

/// Provides the current local calendar date.
pub trait Clock: Send + Sync + std::fmt::Debug {
    fn today(&self) -> NaiveDate;
}

/// Wall clock at a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    /// Clock at `offset_minutes` east of UTC. Out-of-range offsets fall back to UTC.
    pub fn with_offset_minutes(offset_minutes: i32) -> Self {
        let offset = FixedOffset::east_opt(offset_minutes.saturating_mul(60))
            .unwrap_or_else(utc_offset);
        Self { offset }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            offset: utc_offset(),
        }
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.offset).date_naive()
    }
}

fn utc_offset() -> FixedOffset {
    Utc.fix()
}
