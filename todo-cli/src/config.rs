//! Database settings shared by every subcommand
//!
//! Resolved from flags, then environment (including `.env`), then defaults.

use std::time::Duration;

use clap::Args;
use todo_server::db::pool::{DEFAULT_CONNECT_RETRIES, DEFAULT_MAX_CONNECTIONS};
use todo_server::db::{DbConfig, PoolOptions};

#[derive(Args, Debug, Clone)]
pub struct DbArgs {
    /// Database host
    #[arg(long, env = "DB_HOST", default_value = "localhost")]
    pub db_host: String,

    /// Database port
    #[arg(long, env = "DB_PORT", default_value_t = 5432)]
    pub db_port: u16,

    /// Database user
    #[arg(long, env = "DB_USER", default_value = "postgres")]
    pub db_user: String,

    /// Database password
    #[arg(long, env = "DB_PASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,

    /// Database name
    #[arg(long, env = "DB_NAME", default_value = "todos")]
    pub db_name: String,

    /// Full connection URL (overrides the individual db flags)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum connections in the pool
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Extra connection attempts at startup before giving up
    #[arg(long, env = "DB_CONNECT_RETRIES", default_value_t = DEFAULT_CONNECT_RETRIES)]
    pub connect_retries: u32,

    /// Seconds to wait for each connection attempt
    #[arg(long, env = "DB_ACQUIRE_TIMEOUT", default_value_t = 10)]
    pub acquire_timeout_secs: u64,
}

impl DbArgs {
    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            host: self.db_host.clone(),
            port: self.db_port,
            user: self.db_user.clone(),
            password: self.db_password.clone(),
            name: self.db_name.clone(),
            url: self.database_url.clone(),
        }
    }

    pub fn pool_options(&self) -> PoolOptions {
        PoolOptions {
            max_connections: self.max_connections,
            connect_retries: self.connect_retries,
            acquire_timeout: Duration::from_secs(self.acquire_timeout_secs),
        }
    }
}
