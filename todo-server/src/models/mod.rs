//! Request payload models
//!
//! Bodies are deserialized leniently: unknown fields are ignored and missing
//! fields fall back to their zero values (create) or the stored values (update).

pub mod todo;

pub use todo::{TodoInput, TodoPatch, ValidationError};
