mod config;
mod errors;
mod generation;
mod llm_client;
mod routes;
mod state;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Cardify API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client. A missing key keeps the server up; generation
    // requests then fail with a misconfiguration error.
    let llm = match &config.gemini_api_key {
        Some(api_key) => {
            let client = LlmClient::new(
                api_key.clone(),
                &config.gemini_base_url,
                config.upstream_timeout,
            )?;
            info!(
                "LLM client initialized (model: {}, endpoint: {}, timeout: {:?})",
                llm_client::MODEL,
                client.endpoint(),
                config.upstream_timeout
            );
            Some(client)
        }
        None => {
            warn!("GEMINI_API_KEY is missing; card generation is disabled");
            None
        }
    };

    let port = config.port;
    let state = AppState {
        llm,
        config: Arc::new(config),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
