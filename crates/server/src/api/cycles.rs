//! On-demand cycle trigger.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use scholar_watcher_core::CycleReport;

use super::handlers::ErrorResponse;
use crate::state::AppState;

/// POST /api/v1/cycles/run
///
/// Runs one cycle now and returns its report. Serialized with scheduled
/// cycles: a request arriving mid-cycle waits for the in-flight cycle to
/// finish before its own run starts.
pub async fn run_cycle(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CycleReport>, (StatusCode, Json<ErrorResponse>)> {
    match state.scheduler().trigger_now().await {
        Ok(report) => Ok(Json(report)),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )),
    }
}
