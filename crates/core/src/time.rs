//! Timestamp rendering and parsing at the service boundary.

use chrono::{DateTime, NaiveDateTime};

use crate::error::CoreError;
use crate::types::SlotTime;

/// Outward timestamp format: ISO-8601, second precision, trailing `Z`.
pub const UTC_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Render a scheduler timestamp as UTC, e.g. `2017-11-21T10:00:00Z`.
pub fn format_utc(t: SlotTime) -> String {
    t.format(UTC_FORMAT).to_string()
}

/// Parse a caller-supplied timestamp.
///
/// Accepts RFC 3339 with any offset (converted to UTC) as well as a bare
/// `YYYY-MM-DDTHH:MM:SS[.fff]` which is taken to already be UTC.
pub fn parse_timestamp(raw: &str) -> Result<SlotTime, CoreError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_utc());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map_err(|_| CoreError::Validation(format!("Invalid timestamp '{raw}'")))
}
