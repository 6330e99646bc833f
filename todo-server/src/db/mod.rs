//! Database layer - connection pool, schema bootstrap and repositories
//!
//! # Design Principles
//!
//! - One shared pool for the whole process - no globals, injected via `AppState`
//! - Explicit parameterized queries, one statement per operation
//! - Rely on `RETURNING` / `rows_affected` - no check-then-write inside the repo

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{connect_with_retry, create_pool, DbConfig, PoolOptions};
pub use repos::*;
