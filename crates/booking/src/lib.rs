//! Appointment scheduling orchestrator.
//!
//! Composes the external scheduler, the work-order lookup and the system of
//! record into the two public workflows exposed by
//! [`AppointmentOrchestrator`]:
//!
//! - **find available slots**: open a session, make sure the scheduler knows
//!   the work order, then search up to four weekly windows for open slots.
//! - **book an appointment**: open a session, commit the chosen window
//!   against the remote order, close the session, then record the visit,
//!   attach a process document and issue the work order locally.
//!
//! Every scheduler RPC is bounded by a timeout and can be cancelled; a
//! session, once opened, is always closed before the workflow returns.

pub mod availability;
pub mod committer;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod reconciler;
pub mod rpc;
pub mod session;

pub use config::OrchestratorConfig;
pub use error::{BookingError, BookingResult};
pub use orchestrator::{AppointmentOrchestrator, Collaborators};
