pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::pipeline::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/jobs/extract", post(handlers::handle_extract_jobs))
        .route(
            "/api/v1/outreach/generate",
            post(handlers::handle_generate_outreach),
        )
        .route("/api/v1/portfolio", get(handlers::handle_list_portfolio))
        .with_state(state)
}
