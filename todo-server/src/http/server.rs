//! Axum server setup
//!
//! Server skeleton with:
//! - CORS limited to configured origins (credentials allowed, 12h preflight cache)
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;
use crate::db::TodoStore;

/// Browsers may cache a preflight response for this long.
const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(12 * 60 * 60);

/// Cross-origin policy applied to every route
#[derive(Debug, Clone)]
pub struct CorsSettings {
    /// Origins allowed to call the API, matched exactly
    pub allowed_origins: Vec<String>,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        }
    }
}

impl CorsSettings {
    /// Build the CORS layer.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::InvalidOrigin` if an origin is not a valid header value.
    pub fn layer(&self) -> Result<CorsLayer, ServerError> {
        let origins = self
            .allowed_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|_| ServerError::InvalidOrigin(origin.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::HEAD,
            ])
            .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::AUTHORIZATION])
            .expose_headers([header::CONTENT_LENGTH])
            .allow_credentials(true)
            .max_age(PREFLIGHT_MAX_AGE))
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:3000)
    pub bind_addr: SocketAddr,

    pub cors: CorsSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            cors: CorsSettings::default(),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TodoStore>,
}

impl AppState {
    pub fn new(store: impl TodoStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Build the application router with all routes and middleware.
pub fn build_router(state: AppState, cors: &CorsSettings) -> Result<Router, ServerError> {
    Ok(Router::new()
        .merge(routes::todos::router())
        .layer(cors.layer()?)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Run the HTTP server until a shutdown signal arrives.
///
/// # Example
///
/// ```ignore
/// let pool = connect_with_retry(&db_config, &PoolOptions::default()).await?;
/// let state = AppState::new(PgTodoRepo::new(pool));
/// run_server(state, ServerConfig::default()).await?;
/// ```
pub async fn run_server(state: AppState, config: ServerConfig) -> Result<(), ServerError> {
    let app = build_router(state, &config.cors)?;

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        origins = ?config.cors.allowed_origins,
        "Server listening on {}",
        config.bind_addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid CORS origin: {0}")]
    InvalidOrigin(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.cors.allowed_origins, vec!["http://localhost:5173"]);
    }

    #[test]
    fn invalid_origin_is_rejected() {
        let cors = CorsSettings {
            allowed_origins: vec!["http://bad\norigin".to_string()],
        };
        assert!(matches!(cors.layer(), Err(ServerError::InvalidOrigin(_))));
    }
}
