//! todo-server: HTTP CRUD service for todo items
//!
//! Exposes list/create/read/update/delete over `/v1/todo`, persisted in a
//! single PostgreSQL table (or an in-memory store for tests and local runs).

pub mod db;
pub mod http;
pub mod models;

pub use db::{DbConfig, DbError, MemoryTodoStore, PgTodoRepo, Todo, TodoStore};
pub use http::{build_router, run_server, ApiError, AppState, CorsSettings, ServerConfig, ServerError};
pub use models::{TodoInput, TodoPatch, ValidationError};
