//! Database connection pool management
//!
//! Builds the connection descriptor from discrete settings (host, port, user,
//! password, database) or a full `DATABASE_URL`, and opens one `PgPool`
//! shared by every request for the life of the process.

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use url::Url;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default number of extra connection attempts at startup.
pub const DEFAULT_CONNECT_RETRIES: u32 = 5;

/// First retry delay; doubles on every further attempt.
const BASE_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Connection settings for the todo database.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Option<String>,
    pub name: String,
    /// Full connection string; takes precedence over the discrete fields.
    pub url: Option<String>,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: None,
            name: "todos".to_string(),
            url: None,
        }
    }
}

impl DbConfig {
    /// Build the sqlx connection descriptor.
    ///
    /// # Errors
    ///
    /// Returns an error only when `url` is set and cannot be parsed.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        if let Some(url) = &self.url {
            return url.parse();
        }

        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.name);
        if let Some(password) = &self.password {
            options = options.password(password);
        }
        Ok(options)
    }

    /// Connection target for logs, with the password masked.
    pub fn redacted(&self) -> String {
        match &self.url {
            Some(url) => redact_url(url),
            None => format!(
                "postgres://{}{}@{}:{}/{}",
                self.user,
                if self.password.is_some() { ":***" } else { "" },
                self.host,
                self.port,
                self.name
            ),
        }
    }
}

/// Mask the password in a connection URL, in the userinfo and in any
/// `password` query parameter.
fn redact_url(raw: &str) -> String {
    let Ok(mut url) = Url::parse(raw) else {
        return "<unparseable database url>".to_string();
    };

    if url.password().is_some() {
        // Only fails for URLs without a host, which cannot carry a password
        let _ = url.set_password(Some("***"));
    }

    let has_query_password = url
        .query_pairs()
        .any(|(key, _)| key.eq_ignore_ascii_case("password"));
    if has_query_password {
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(key, value)| {
                let value = if key.eq_ignore_ascii_case("password") {
                    "***".to_string()
                } else {
                    value.into_owned()
                };
                (key.into_owned(), value)
            })
            .collect();
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }

    url.to_string()
}

/// Pool tuning and startup retry policy.
#[derive(Debug, Clone)]
pub struct PoolOptions {
    pub max_connections: u32,
    /// Extra attempts after the first failed connect.
    pub connect_retries: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connect_retries: DEFAULT_CONNECT_RETRIES,
            acquire_timeout: Duration::from_secs(10),
        }
    }
}

/// Create a PostgreSQL connection pool.
///
/// # Errors
///
/// Returns an error if the connection fails.
pub async fn create_pool(config: &DbConfig, options: &PoolOptions) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(options.max_connections)
        .acquire_timeout(options.acquire_timeout)
        .connect_with(config.connect_options()?)
        .await
}

/// Create a pool, retrying with exponential backoff.
///
/// Makes `1 + connect_retries` attempts. The last error is returned once
/// they are exhausted; callers treat it as fatal.
pub async fn connect_with_retry(
    config: &DbConfig,
    options: &PoolOptions,
) -> Result<PgPool, sqlx::Error> {
    let mut attempt = 0;
    loop {
        match create_pool(config, options).await {
            Ok(pool) => {
                if attempt > 0 {
                    tracing::info!(attempt = attempt + 1, "database connection established after retry");
                }
                return Ok(pool);
            }
            Err(e) if attempt < options.connect_retries => {
                let delay = backoff_delay(attempt);
                tracing::warn!(
                    "Database connection attempt {}/{} failed: {}. Retrying in {:.1}s...",
                    attempt + 1,
                    options.connect_retries + 1,
                    e,
                    delay.as_secs_f64()
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

fn backoff_delay(attempt: u32) -> Duration {
    BASE_RETRY_DELAY * 2_u32.saturating_pow(attempt.min(10))
}
