//! Row structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row and, where rows are created from outside, a
//! `Deserialize` create DTO.

pub mod document;
pub mod visit;
pub mod work_order;
