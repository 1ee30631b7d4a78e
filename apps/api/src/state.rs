use std::sync::Arc;

use crate::llm_client::ModelClient;

/// Shared application state injected into route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The completion backend for every extraction step. Behind a trait
    /// object so pipeline tests can substitute a scripted stub.
    pub model: Arc<dyn ModelClient>,
}
