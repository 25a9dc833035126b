use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status plus the loaded table sizes.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "matcher",
        "canonicalSkills": state.engine.taxonomy().len(),
        "educationLevels": state.engine.hierarchy().len(),
        "fuzzyThreshold": state.engine.fuzzy_threshold(),
    }))
}
