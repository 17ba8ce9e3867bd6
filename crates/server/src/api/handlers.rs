use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;

use scholar_watcher_core::{SanitizedConfig, SchedulerStatus};

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub api_key_configured: bool,
    pub webhook_configured: bool,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub keywords: u64,
    pub seen_results: u64,
    pub scheduler: SchedulerStatus,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// GET /api/v1/health
///
/// Reports whether the provider API key and the notification webhook are
/// configured. Returns 503 when either is missing, since the watcher cannot
/// do useful work without them.
pub async fn health(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let config = state.config();
    let api_key_configured = !config.provider.api_key.is_empty();
    let webhook_configured = !config.notifier.webhook_url.is_empty();

    let healthy = api_key_configured && webhook_configured;
    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(HealthResponse {
            status: if healthy { "ok" } else { "degraded" }.to_string(),
            api_key_configured,
            webhook_configured,
        }),
    )
}

/// GET /api/v1/config
pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<SanitizedConfig> {
    Json(state.sanitized_config())
}

/// GET /api/v1/status
///
/// Store counts plus scheduler state, including the last finished cycle.
pub async fn get_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, (StatusCode, Json<ErrorResponse>)> {
    let stats = state.store().stats().map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;

    let scheduler = state.scheduler().status().await;

    Ok(Json(StatusResponse {
        keywords: stats.keywords,
        seen_results: stats.seen_results,
        scheduler,
    }))
}

/// GET /api/v1/metrics
///
/// Prometheus text exposition of server and cycle metrics.
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> String {
    crate::metrics::collect_dynamic_metrics(&state).await;
    crate::metrics::encode_metrics()
}
