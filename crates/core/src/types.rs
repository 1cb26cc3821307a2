/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All persisted timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Scheduler-facing wall-clock time. The external scheduler exchanges
/// timestamps without an offset; they are rendered as UTC on the way out.
pub type SlotTime = chrono::NaiveDateTime;
