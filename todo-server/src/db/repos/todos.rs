//! PostgreSQL todo repository
//!
//! Every operation is one statement; writes use `RETURNING` so the stored row
//! (with its generated id and timestamps) comes back without a second query.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{DbError, Todo, TodoStore};
use crate::models::TodoInput;

/// PostgreSQL-backed todo repository
#[derive(Clone)]
pub struct PgTodoRepo {
    pool: PgPool,
}

impl PgTodoRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl TodoStore for PgTodoRepo {
    async fn list_all(&self) -> Result<Vec<Todo>, DbError> {
        let todos: Vec<Todo> = sqlx::query_as(
            r#"
            SELECT id, title, description, completed, created_at, updated_at
            FROM todos
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(todos)
    }

    async fn create(&self, input: &TodoInput) -> Result<Todo, DbError> {
        let todo: Todo = sqlx::query_as(
            r#"
            INSERT INTO todos (title, description, completed)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, completed, created_at, updated_at
            "#,
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.completed)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = todo.id, "todo created");
        Ok(todo)
    }

    async fn get_by_id(&self, id: i64) -> Result<Todo, DbError> {
        sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, title, description, completed, created_at, updated_at
            FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::todo_not_found(id))
    }

    async fn update(&self, id: i64, input: &TodoInput) -> Result<Todo, DbError> {
        sqlx::query_as::<_, Todo>(
            r#"
            UPDATE todos
            SET title = $2,
                description = $3,
                completed = $4,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, completed, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.completed)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::todo_not_found(id))
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::todo_not_found(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, migrations, DbConfig, PoolOptions};

    // Integration tests - run with DATABASE_URL set
    // cargo test -p todo-server -- --ignored

    async fn repo() -> PgTodoRepo {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let config = DbConfig {
            url: Some(url),
            ..DbConfig::default()
        };
        let pool = create_pool(&config, &PoolOptions::default())
            .await
            .expect("pool creation failed");
        migrations::run(&pool).await.expect("migration failed");
        PgTodoRepo::new(pool)
    }

    fn input(title: &str) -> TodoInput {
        TodoInput {
            title: title.into(),
            ..TodoInput::default()
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_then_get() {
        let repo = repo().await;
        let created = repo.create(&input("pg create")).await.unwrap();
        assert!(created.id > 0);

        let fetched = repo.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_missing_row_does_not_insert() {
        let repo = repo().await;
        let before = repo.list_all().await.unwrap().len();

        let err = repo.update(i64::MAX, &input("ghost")).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
        assert_eq!(repo.list_all().await.unwrap().len(), before);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_bumps_updated_at_only() {
        let repo = repo().await;
        let created = repo.create(&input("pg update")).await.unwrap();

        let updated = repo
            .update(
                created.id,
                &TodoInput {
                    title: "pg updated".into(),
                    description: "d".into(),
                    completed: true,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "pg updated");
        assert!(updated.completed);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delete_then_get_is_not_found() {
        let repo = repo().await;
        let created = repo.create(&input("pg delete")).await.unwrap();

        repo.delete(created.id).await.unwrap();
        assert!(matches!(
            repo.get_by_id(created.id).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(
            repo.delete(created.id).await,
            Err(DbError::NotFound { .. })
        ));
    }
}
