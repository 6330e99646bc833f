//! HTTP server command
//!
//! Opens the database pool (fatal after the retry budget), creates the todos
//! table if needed and serves `/v1/todo` until Ctrl+C/SIGTERM.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;

use todo_server::db::{connect_with_retry, migrations, MemoryTodoStore, PgTodoRepo};
use todo_server::http::{run_server, AppState, CorsSettings, ServerConfig};

use crate::config::DbArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "BIND_ADDR", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// Allowed CORS origin (repeat or comma-separate for several)
    #[arg(
        long = "cors-origin",
        env = "CORS_ORIGIN",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub cors_origins: Vec<String>,

    /// Keep todos in memory instead of PostgreSQL (lost on exit)
    #[arg(long)]
    pub in_memory: bool,

    #[command(flatten)]
    pub db: DbArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = ServerConfig {
        bind_addr: args.bind,
        cors: CorsSettings {
            allowed_origins: args.cors_origins,
        },
    };

    if args.in_memory {
        tracing::warn!("Using in-memory store - todos are lost on exit");
        return run_server(AppState::new(MemoryTodoStore::new()), config)
            .await
            .context("Server error");
    }

    let db = args.db.db_config();
    tracing::info!(database = %db.redacted(), "Connecting to database");

    let pool = connect_with_retry(&db, &args.db.pool_options())
        .await
        .with_context(|| format!("Failed to connect to database at {}", db.redacted()))?;

    migrations::run(&pool)
        .await
        .context("Failed to create todos table")?;

    let repo = PgTodoRepo::new(pool);
    let pool = repo.pool().clone();

    // Run server (blocks until shutdown), then release connections either way
    let result = run_server(AppState::new(repo), config).await;
    pool.close().await;
    tracing::info!("Database pool closed");

    result.context("Server error")
}
