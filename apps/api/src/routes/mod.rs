pub mod health;

use axum::{
    response::Html,
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// GET /
/// Serves the single-page card generator.
async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health::health_handler))
        .route("/api/generate", post(handlers::handle_generate))
        .with_state(state)
}
