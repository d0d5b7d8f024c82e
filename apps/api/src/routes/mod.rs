pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::extraction::handlers as extraction;
use crate::github::handlers as github;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/extract-text", post(extraction::handle_extract_text))
        .route("/api/insight", post(github::handle_insight))
        .route("/api/github/:login", get(github::handle_get_profile))
        .layer(upload_limit)
        .with_state(state)
}
