use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no Gemini credential is configured.
    pub llm: Option<LlmClient>,
    pub config: Arc<Config>,
}
