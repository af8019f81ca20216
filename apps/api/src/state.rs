use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ChatBackend;
use crate::prediction::RolePredictor;

/// Shared application state injected into all route handlers via Axum extractors.
/// Nothing in here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    /// Loaded model artifact plus threshold, read-only for the process lifetime.
    pub predictor: Arc<RolePredictor>,
    /// Generative-text backend behind the chat proxy. Default: `GeminiClient`.
    pub chat: Arc<dyn ChatBackend>,
    pub config: Config,
}
