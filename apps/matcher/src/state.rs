use std::sync::Arc;

use crate::config::Config;
use crate::matching::MatchingEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Validated once at startup; read-only afterwards.
    pub engine: Arc<MatchingEngine>,
    /// Settings the engine was built from; handlers read the engine instead.
    #[allow(dead_code)]
    pub config: Config,
}
