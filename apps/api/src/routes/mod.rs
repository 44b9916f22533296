pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::portfolio::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Portfolio API
        .route("/api/v1/portfolio", get(handlers::handle_get_portfolio))
        .route(
            "/api/v1/portfolio/generate",
            post(handlers::handle_generate),
        )
        .route(
            "/api/v1/portfolio/regenerate",
            post(handlers::handle_regenerate),
        )
        .route("/api/v1/portfolio/preview", get(handlers::handle_preview))
        .route("/api/v1/portfolio/code", get(handlers::handle_code))
        .route(
            "/api/v1/portfolio/download",
            get(handlers::handle_download),
        )
        .with_state(state)
}
