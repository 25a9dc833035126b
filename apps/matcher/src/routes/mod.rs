pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/match", post(handlers::handle_match))
        .route("/api/v1/match/batch", post(handlers::handle_batch))
        .route("/api/v1/match/batch/csv", post(handlers::handle_batch_csv))
        .route(
            "/api/v1/taxonomy/resolve/:skill",
            get(handlers::handle_resolve),
        )
        .with_state(state)
}
