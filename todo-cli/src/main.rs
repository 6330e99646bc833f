//! todoctl - run and manage the todo HTTP service
//!
//! - `serve`: HTTP CRUD API over `/v1/todo` backed by PostgreSQL
//! - `migrate`: create the todos table and exit

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "todoctl",
    author,
    version,
    about = "Todo CRUD service backed by PostgreSQL"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create the todos table if it does not exist
    Migrate(commands::migrate::MigrateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up DB_* / DATABASE_URL from ./.env without overriding the environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await,
        Commands::Migrate(args) => commands::migrate::run_migrate(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_defaults() {
        let cli = Cli::try_parse_from(["todoctl", "serve"]).unwrap();
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.bind.port(), 3000);
        assert!(!args.in_memory);
        assert!(!args.cors_origins.is_empty());
    }

    #[test]
    fn cors_origins_split_on_comma() {
        let cli = Cli::try_parse_from([
            "todoctl",
            "serve",
            "--cors-origin",
            "http://a.test,http://b.test",
        ])
        .unwrap();
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.cors_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn db_flags_build_config() {
        let cli = Cli::try_parse_from([
            "todoctl",
            "migrate",
            "--db-host",
            "db.internal",
            "--db-port",
            "6543",
            "--db-name",
            "tasks",
            "--db-password",
            "pw",
        ])
        .unwrap();
        let Commands::Migrate(args) = cli.command else {
            panic!("expected migrate");
        };
        let db = args.db.db_config();
        assert_eq!(db.host, "db.internal");
        assert_eq!(db.port, 6543);
        assert_eq!(db.name, "tasks");
        assert_eq!(db.password.as_deref(), Some("pw"));
    }

    #[test]
    fn retry_flags_build_pool_options() {
        let cli = Cli::try_parse_from([
            "todoctl",
            "serve",
            "--connect-retries",
            "0",
            "--acquire-timeout-secs",
            "2",
        ])
        .unwrap();
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        let options = args.db.pool_options();
        assert_eq!(options.connect_retries, 0);
        assert_eq!(options.acquire_timeout, std::time::Duration::from_secs(2));
    }
}
