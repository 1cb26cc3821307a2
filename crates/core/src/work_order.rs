//! Work order snapshot as read from the system of record.

use serde::{Deserialize, Serialize};

/// A maintenance task identified by an external reference.
///
/// Fetched once per orchestration call and treated as immutable for the
/// remainder of that call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkOrder {
    /// External identifier. Doubles as the scheduler's `primaryOrderNumber`.
    pub reference: String,
    pub priority: String,
    pub property_reference: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub trade_tasks: Vec<String>,
}

impl WorkOrder {
    /// A work order without a reference cannot be scheduled.
    pub fn is_valid(&self) -> bool {
        !self.reference.trim().is_empty()
    }

    /// Copy of this work order with every field trimmed and blank trade
    /// tasks dropped, ready to be sent to the scheduler.
    pub fn normalized(&self) -> Self {
        Self {
            reference: self.reference.trim().to_string(),
            priority: self.priority.trim().to_string(),
            property_reference: self.property_reference.trim().to_string(),
            contact_name: self.contact_name.trim().to_string(),
            contact_phone: self.contact_phone.trim().to_string(),
            trade_tasks: self
                .trade_tasks
                .iter()
                .map(|t| t.trim())
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}
