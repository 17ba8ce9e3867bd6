//! Keyword API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use scholar_watcher_core::{Keyword, StoreError};

use super::handlers::ErrorResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddKeywordRequest {
    pub term: String,
}

#[derive(Debug, Serialize)]
pub struct KeywordListResponse {
    pub keywords: Vec<Keyword>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub message: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn store_error(e: StoreError) -> ApiError {
    let status = match e {
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::InvalidTerm(_) => StatusCode::BAD_REQUEST,
        StoreError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

/// GET /api/v1/keywords
pub async fn list_keywords(
    State(state): State<Arc<AppState>>,
) -> Result<Json<KeywordListResponse>, ApiError> {
    let keywords = state.store().list_keywords().map_err(store_error)?;
    let total = keywords.len();
    Ok(Json(KeywordListResponse { keywords, total }))
}

/// POST /api/v1/keywords
///
/// Registers a keyword. Re-adding an existing term succeeds and returns the
/// stored row, leaving its dedup history untouched.
pub async fn add_keyword(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AddKeywordRequest>,
) -> Result<(StatusCode, Json<Keyword>), ApiError> {
    let keyword = state
        .store()
        .add_keyword(&request.term)
        .map_err(store_error)?;
    Ok((StatusCode::CREATED, Json(keyword)))
}

/// DELETE /api/v1/keywords/{term}
///
/// Removes a keyword and its entire seen-result history.
pub async fn remove_keyword(
    State(state): State<Arc<AppState>>,
    Path(term): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.store().remove_keyword(&term).map_err(store_error)?;
    Ok(Json(SuccessResponse {
        message: format!("Removed keyword '{}'", term),
    }))
}
