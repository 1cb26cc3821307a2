//! Client library for the external field-service scheduler.
//!
//! The scheduler is a stateful, session-based RPC service. This crate
//! provides the typed request/response envelopes, the [`SchedulingService`]
//! trait the booking orchestrator is written against, and an HTTP
//! implementation of it built on [`reqwest`].

pub mod api;
pub mod messages;
pub mod service;

pub use api::{SchedulerApi, SchedulerApiConfig, SchedulerError};
pub use service::{RemoteOrderIds, SchedulingService, SessionId};
