use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::AppState;

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

/// POST /api/analyze
///
/// Forwards a single prompt to the completion service. On any upstream
/// failure the body carries `fallback: true` so the dashboard switches to
/// its client-side degraded path; the relay never computes a prediction
/// itself.
pub async fn analyze(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(req): Json<AnalyzeRequest>,
) -> impl IntoResponse {
    // 1. Validate the payload
    let prompt = match req.prompt.as_deref().map(str::trim) {
        Some(p) if !p.is_empty() => p.to_string(),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "prompt is required" })),
            );
        }
    };

    // 2. Admission control before any upstream call
    let ip = addr.ip().to_string();
    if let Err(msg) = state.rate_limiter.check_ip_limit(&ip) {
        warn!("Rate limited {ip}: {msg}");
        return (StatusCode::TOO_MANY_REQUESTS, Json(json!({ "error": msg })));
    }

    // 3. Forward with the fixed generation config and timeout
    match state.upstream.complete(&prompt).await {
        Ok(text) => {
            info!("Analyze: served {} chars to {ip}", text.len());
            (StatusCode::OK, Json(json!({ "text": text })))
        }
        Err(e) => {
            warn!("Upstream failure for {ip}: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "AI service unavailable",
                    "fallback": true
                })),
            )
        }
    }
}
