pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::rfp::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/rfp/generate", post(handlers::handle_generate))
        .route("/api/v1/rfp/preview", post(handlers::handle_preview))
        .route(
            "/api/v1/rfp/export/markdown",
            post(handlers::handle_export_markdown),
        )
        .route("/api/v1/rfp/export/docx", post(handlers::handle_export_docx))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
