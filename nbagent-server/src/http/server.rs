//! Axum server setup
//!
//! Server skeleton with:
//! - Token-gated board and config routes
//! - CORS, permissive unless origins are listed
//! - Tracing, timeout and body size middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, StatusCode};
use axum::{middleware, Router};
use nbagent_core::AgentService;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::{auth, routes};

pub const DEFAULT_PORT: u16 = 10001;

/// Board documents routinely exceed axum's 2 MB default
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:10001)
    pub bind_addr: SocketAddr,

    /// Allowed CORS origins; empty allows any origin
    pub cors_origins: Vec<String>,

    /// Per-request timeout
    pub request_timeout: Duration,

    /// Largest accepted request body
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            cors_origins: Vec::new(),
            request_timeout: Duration::from_secs(30),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    fn cors_layer(&self) -> Result<CorsLayer, ServerError> {
        if self.cors_origins.is_empty() {
            return Ok(CorsLayer::permissive());
        }

        let origins = self
            .cors_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|_| ServerError::InvalidOrigin(origin.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any))
    }
}

/// Build the router: gated board/config routes plus an open health check.
///
/// The CORS layer sits outside the gate and answers OPTIONS itself, so
/// preflight requests never need a token.
pub fn build_router(service: Arc<AgentService>, config: &ServerConfig) -> Result<Router, ServerError> {
    let cors = config.cors_layer()?;

    let gated = Router::new()
        .merge(routes::boards::router())
        .merge(routes::config::router())
        .route_layer(middleware::from_fn_with_state(
            service.clone(),
            auth::require_token,
        ));

    Ok(Router::new()
        .merge(gated)
        .merge(routes::health::router())
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(service))
}

/// Run the HTTP server until Ctrl+C or SIGTERM.
///
/// # Example
///
/// ```ignore
/// let service = Arc::new(AgentService::init(InitOptions::default())?);
/// run_server(service, ServerConfig::default()).await?;
/// ```
pub async fn run_server(service: Arc<AgentService>, config: ServerConfig) -> Result<(), ServerError> {
    if config.cors_origins.is_empty() {
        tracing::info!("CORS: all origins allowed");
    }
    let app = build_router(service, &config)?;

    // Bind listener
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    // Run with graceful shutdown; peer addresses feed the rejection log
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
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

    #[error("Invalid CORS origin: {0}")]
    InvalidOrigin(String),
}
