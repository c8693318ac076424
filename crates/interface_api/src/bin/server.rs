//! CardWise - API Server Binary
//!
//! This binary starts the HTTP API server for CardWise.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin cardwise-api
//!
//! # Run with environment variables
//! CARDWISE_HOST=0.0.0.0 CARDWISE_PORT=8080 cargo run --bin cardwise-api
//! ```
//!
//! # Environment Variables
//!
//! * `CARDWISE_HOST` - Server host (default: 0.0.0.0)
//! * `CARDWISE_PORT` - Server port (default: 8080)
//! * `CARDWISE_JWT_SECRET` - JWT signing secret (required in production)
//! * `CARDWISE_JWT_EXPIRATION_SECS` - JWT token expiration in seconds (default: 3600)
//! * `CARDWISE_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `CARDWISE_CSRF_ENABLED` - Require CSRF tokens on writes (default: true)

use std::net::SocketAddr;

use interface_api::{config::ApiConfig, create_router, AppStores};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, builds the in-memory stores,
/// and starts the HTTP server.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or the server fails
/// to bind to the configured address.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = load_config();

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Starting CardWise API Server"
    );

    let app = create_router(AppStores::in_memory(), config.clone());

    let addr: SocketAddr = config.server_addr().parse()?;
    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Loads API configuration from environment variables.
///
/// Falls back to individual env vars, then defaults, when the prefixed
/// bundle is incomplete.
fn load_config() -> ApiConfig {
    ApiConfig::from_env().unwrap_or_else(|_| {
        let defaults = ApiConfig::default();
        ApiConfig {
            host: std::env::var("CARDWISE_HOST").unwrap_or(defaults.host),
            port: std::env::var("CARDWISE_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            jwt_secret: std::env::var("CARDWISE_JWT_SECRET").unwrap_or(defaults.jwt_secret),
            jwt_expiration_secs: std::env::var("CARDWISE_JWT_EXPIRATION_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.jwt_expiration_secs),
            log_level: std::env::var("CARDWISE_LOG_LEVEL")
                .or_else(|_| std::env::var("RUST_LOG"))
                .unwrap_or(defaults.log_level),
            csrf_enabled: std::env::var("CARDWISE_CSRF_ENABLED")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.csrf_enabled),
        }
    })
}

/// Initializes the tracing subscriber for structured logging.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// Allows in-flight requests to complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
