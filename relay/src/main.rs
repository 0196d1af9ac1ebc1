mod config;
mod middleware;
mod routes;
mod upstream;

use std::net::SocketAddr;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::RelayConfig;
use crate::middleware::rate_limit::RateLimiter;
use crate::upstream::UpstreamClient;

/// Shared application state passed to all route handlers via Axum's State extractor.
#[derive(Clone)]
pub struct AppState {
    pub upstream: UpstreamClient,
    pub rate_limiter: RateLimiter,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (ignored in production where env vars are set externally)
    let _ = dotenvy::dotenv();

    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = RelayConfig::from_env()?;
    info!(
        "Configuration loaded (port={}, quota={}/min, timeout={}s)",
        config.port, config.max_requests_per_ip_per_minute, config.upstream_timeout_secs
    );

    // Build shared state
    let upstream = UpstreamClient::new(
        &config.gemini_api_key,
        &config.gemini_model,
        config.upstream_timeout_secs,
    )?;
    let rate_limiter = RateLimiter::new(config.max_requests_per_ip_per_minute);

    let state = AppState {
        upstream,
        rate_limiter: rate_limiter.clone(),
    };

    // CORS layer: the dashboard is served from a different origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        .route("/api/health", get(routes::health::health))
        .route("/api/analyze", post(routes::analyze::analyze))
        .layer(cors)
        .with_state(state);

    // Evict idle rate-limiter entries in the background
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(Duration::from_secs(120));
        loop {
            tick.tick().await;
            rate_limiter.cleanup_stale_entries();
        }
    });

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Calcio relay v{} listening on {}", env!("CARGO_PKG_VERSION"), addr);
    info!("Routes:");
    info!("  GET  /api/health");
    info!("  POST /api/analyze");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
