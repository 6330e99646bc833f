//! In-memory todo store
//!
//! Mirrors `PgTodoRepo` for ids, ordering and not-found handling; used by
//! tests and `todoctl serve --in-memory`. It stores any string, so payloads
//! must be checked with `TodoInput::validate` before they reach a store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{DbError, Todo, TodoStore};
use crate::models::TodoInput;

#[derive(Default)]
struct Inner {
    todos: BTreeMap<i64, Todo>,
    last_id: i64,
}

/// Map-backed todo store. Ids start at 1 and are never reused.
#[derive(Default)]
pub struct MemoryTodoStore {
    inner: RwLock<Inner>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn list_all(&self) -> Result<Vec<Todo>, DbError> {
        let inner = self.inner.read().await;
        Ok(inner.todos.values().cloned().collect())
    }

    async fn create(&self, input: &TodoInput) -> Result<Todo, DbError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let now = Utc::now();
        let todo = Todo {
            id: inner.last_id,
            title: input.title.clone(),
            description: input.description.clone(),
            completed: input.completed,
            created_at: now,
            updated_at: now,
        };
        inner.todos.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn get_by_id(&self, id: i64) -> Result<Todo, DbError> {
        let inner = self.inner.read().await;
        inner
            .todos
            .get(&id)
            .cloned()
            .ok_or_else(|| DbError::todo_not_found(id))
    }

    async fn update(&self, id: i64, input: &TodoInput) -> Result<Todo, DbError> {
        let mut inner = self.inner.write().await;
        let todo = inner
            .todos
            .get_mut(&id)
            .ok_or_else(|| DbError::todo_not_found(id))?;
        todo.title = input.title.clone();
        todo.description = input.description.clone();
        todo.completed = input.completed;
        todo.updated_at = Utc::now();
        Ok(todo.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        let mut inner = self.inner.write().await;
        inner
            .todos
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DbError::todo_not_found(id))
    }
}
