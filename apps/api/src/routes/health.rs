use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::llm_client::MODEL;
use crate::state::AppState;

/// GET /health
/// Returns service status and whether generation can reach the provider.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "cardify-api",
        "model": MODEL,
        "upstream_configured": state.llm.is_some(),
        "upstream_timeout_secs": state.config.upstream_timeout.as_secs(),
    }))
}
