//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod document_repo;
pub mod visit_repo;
pub mod work_order_repo;

pub use document_repo::DocumentRepo;
pub use visit_repo::VisitRepo;
pub use work_order_repo::WorkOrderRepo;
