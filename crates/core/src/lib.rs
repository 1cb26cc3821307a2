//! Domain building blocks for field-service appointment booking.
//!
//! Holds the pure pieces (work orders, slots, slot labelling, search-window
//! arithmetic, timestamp rendering) and the collaborator traits the booking
//! orchestrator is wired against. This crate has zero internal deps so it can
//! be used by the database, scheduler, booking and API crates alike.

pub mod clock;
pub mod error;
pub mod gateways;
pub mod search_window;
pub mod slot;
pub mod slot_label;
pub mod time;
pub mod types;
pub mod work_order;
