//! Schema bootstrap command

use anyhow::{Context, Result};
use clap::Parser;

use todo_server::db::{connect_with_retry, migrations};

use crate::config::DbArgs;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub db: DbArgs,
}

/// Create the todos table and exit
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let db = args.db.db_config();
    tracing::info!(database = %db.redacted(), "Connecting to database");

    let pool = connect_with_retry(&db, &args.db.pool_options())
        .await
        .with_context(|| format!("Failed to connect to database at {}", db.redacted()))?;

    let result = migrations::run(&pool).await;
    pool.close().await;
    result.context("Failed to create todos table")?;

    tracing::info!("todos table is ready");
    Ok(())
}
