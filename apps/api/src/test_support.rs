//! Stub upstream provider for tests: a real axum server on an ephemeral port
//! that records what it receives and answers with a canned response.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode, Uri},
    response::IntoResponse,
    Router,
};
use reqwest::Client;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::llm_client::LlmClient;

#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub path: String,
    pub key: Option<String>,
    pub body: Value,
}

struct Shared {
    status: StatusCode,
    body: String,
    delay: Duration,
    hits: AtomicUsize,
    last: Mutex<Option<SeenRequest>>,
}

pub struct StubUpstream {
    pub base_url: String,
    shared: Arc<Shared>,
}

impl StubUpstream {
    pub async fn respond(status: StatusCode, body: String) -> Self {
        Self::spawn(status, body, Duration::ZERO).await
    }

    /// 200 with a provider envelope wrapping `text` as the generated payload.
    pub async fn success_text(text: &str) -> Self {
        Self::respond(StatusCode::OK, envelope(text)).await
    }

    /// Like `success_text`, but holds the response for `delay` first.
    pub async fn slow(text: &str, delay: Duration) -> Self {
        Self::spawn(StatusCode::OK, envelope(text), delay).await
    }

    pub fn hits(&self) -> usize {
        self.shared.hits.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<SeenRequest> {
        self.shared.last.lock().unwrap().clone()
    }

    async fn spawn(status: StatusCode, body: String, delay: Duration) -> Self {
        let shared = Arc::new(Shared {
            status,
            body,
            delay,
            hits: AtomicUsize::new(0),
            last: Mutex::new(None),
        });

        let app = Router::new()
            .fallback(record_and_respond)
            .with_state(shared.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            shared,
        }
    }
}

/// Base URL of a local port with nothing listening on it.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Client for a stub on localhost, ignoring any proxy set in the environment.
pub fn local_client(api_key: &str, base_url: &str, timeout: Duration) -> LlmClient {
    LlmClient::with_builder(
        Client::builder().no_proxy(),
        api_key.to_string(),
        base_url,
        timeout,
    )
    .unwrap()
}

pub fn envelope(text: &str) -> String {
    json!({
        "candidates": [{
            "content": {"parts": [{"text": text}], "role": "model"},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 42, "candidatesTokenCount": 17}
    })
    .to_string()
}

async fn record_and_respond(
    State(shared): State<Arc<Shared>>,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
    body: String,
) -> impl IntoResponse {
    shared.hits.fetch_add(1, Ordering::SeqCst);
    *shared.last.lock().unwrap() = Some(SeenRequest {
        path: uri.path().to_string(),
        key: query.get("key").cloned(),
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    });

    if !shared.delay.is_zero() {
        tokio::time::sleep(shared.delay).await;
    }

    (
        shared.status,
        [(header::CONTENT_TYPE, "application/json")],
        shared.body.clone(),
    )
}
