//! Todo repositories
//!
//! `TodoStore` is the only storage surface: five single-statement,
//! non-transactional operations. `PgTodoRepo` backs it with PostgreSQL,
//! `MemoryTodoStore` with a map for tests and database-less runs.

pub mod memory;
pub mod todos;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::models::TodoInput;

pub use memory::MemoryTodoStore;
pub use todos::PgTodoRepo;

/// Todo record from storage
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    pub(crate) fn todo_not_found(id: i64) -> Self {
        Self::NotFound {
            resource: "todo",
            id: id.to_string(),
        }
    }
}

/// Storage operations for todos (testable)
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Every todo, ordered by id.
    async fn list_all(&self) -> Result<Vec<Todo>, DbError>;

    /// Insert a todo; storage assigns the id.
    async fn create(&self, input: &TodoInput) -> Result<Todo, DbError>;

    /// Fetch exactly one todo, or `DbError::NotFound`.
    async fn get_by_id(&self, id: i64) -> Result<Todo, DbError>;

    /// Overwrite every mutable field of todo `id`. Never inserts.
    async fn update(&self, id: i64, input: &TodoInput) -> Result<Todo, DbError>;

    /// Remove todo `id`, or `DbError::NotFound` if no row matched.
    async fn delete(&self, id: i64) -> Result<(), DbError>;
}
