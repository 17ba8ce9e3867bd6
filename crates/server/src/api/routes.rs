use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::{cycles, handlers, keywords, rss};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/status", get(handlers::get_status))
        // Keywords
        .route("/keywords", get(keywords::list_keywords))
        .route("/keywords", post(keywords::add_keyword))
        .route("/keywords/{term}", delete(keywords::remove_keyword))
        // Cycles
        .route("/cycles/run", post(cycles::run_cycle))
        // Observability and feeds
        .route("/metrics", get(handlers::get_metrics))
        .route("/rss", get(rss::feed))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(middleware::from_fn(super::middleware::metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
