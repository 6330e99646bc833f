//! Todo endpoints

use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::db::Todo;
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, TodoId};
use crate::http::server::AppState;
use crate::models::{TodoInput, TodoPatch};

/// Todo response
#[derive(Debug, Serialize)]
pub struct TodoResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Todo> for TodoResponse {
    fn from(t: Todo) -> Self {
        Self {
            id: t.id,
            title: t.title,
            description: t.description,
            completed: t.completed,
            created_at: t.created_at.to_rfc3339(),
            updated_at: t.updated_at.to_rfc3339(),
        }
    }
}

/// GET /v1/todo - list every todo
async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<TodoResponse>>, ApiError> {
    let todos = state.store.list_all().await?;
    Ok(Json(todos.into_iter().map(TodoResponse::from).collect()))
}

/// POST /v1/todo - create a todo
async fn create_todo(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<TodoInput>,
) -> Result<Json<TodoResponse>, ApiError> {
    input.validate()?;
    let todo = state.store.create(&input).await?;
    Ok(Json(TodoResponse::from(todo)))
}

/// GET /v1/todo/{id} - get a single todo
async fn get_todo(
    State(state): State<AppState>,
    TodoId(id): TodoId,
) -> Result<Json<TodoResponse>, ApiError> {
    let todo = state.store.get_by_id(id).await?;
    Ok(Json(TodoResponse::from(todo)))
}

/// PUT /v1/todo/{id} - overwrite a todo's fields
async fn update_todo(
    State(state): State<AppState>,
    TodoId(id): TodoId,
    JsonBody(patch): JsonBody<TodoPatch>,
) -> Result<Json<TodoResponse>, ApiError> {
    // Stop here when the todo is missing; the update is never attempted.
    let current = state.store.get_by_id(id).await?;
    let input = patch.apply_to(&current);
    input.validate()?;

    let todo = state.store.update(id, &input).await?;
    Ok(Json(TodoResponse::from(todo)))
}

/// DELETE /v1/todo/{id} - delete a todo, returning its last state
async fn delete_todo(
    State(state): State<AppState>,
    TodoId(id): TodoId,
) -> Result<Json<TodoResponse>, ApiError> {
    let snapshot = state.store.get_by_id(id).await?;
    state.store.delete(id).await?;

    tracing::info!(id, "todo deleted");
    Ok(Json(TodoResponse::from(snapshot)))
}

/// Todo routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/todo", get(list_todos).post(create_todo))
        .route(
            "/v1/todo/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
}
