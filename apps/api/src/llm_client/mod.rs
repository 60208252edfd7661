//! LLM Client — the single point of entry for all Gemini API calls in Cardify.
//!
//! ARCHITECTURAL RULE: No other module may call the provider directly.
//! All LLM interactions MUST go through this module.
//!
//! Model: gemini-2.0-flash (hardcoded — the prompt contract is tuned for it)

use std::time::Duration;

use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// The model used for all generation calls.
pub const MODEL: &str = "gemini-2.0-flash";
const JSON_MIME_TYPE: &str = "application/json";
const FALLBACK_ERROR_MESSAGE: &str = "API call failed";

#[derive(Debug, Error)]
pub enum LlmError {
    /// Transport failure. The request URL is stripped because it carries the key.
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    #[error("Upstream request timed out after {0:?}")]
    Timeout(Duration),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response envelope: {0}")]
    Envelope(#[source] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

/// Output-format hint. The provider is asked to constrain itself to JSON;
/// nothing here enforces it locally.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
}

/// Top-level `generateContent` response envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl LlmResponse {
    /// Text of the first part of the first candidate.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// Wraps the Gemini `generateContent` endpoint.
/// Exactly one outbound request per call — no retries.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    endpoint: String,
    timeout: Duration,
}

impl LlmClient {
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> Result<Self, LlmError> {
        Self::with_builder(Client::builder(), api_key, base_url, timeout)
    }

    /// Like `new`, starting from a caller-prepared reqwest builder.
    pub fn with_builder(
        builder: ClientBuilder,
        api_key: String,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = builder
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Http(e.without_url()))?;

        Ok(Self {
            client,
            api_key,
            endpoint: endpoint_for(base_url),
            timeout,
        })
    }

    /// Target endpoint without the credential.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends one prompt and returns the decoded response envelope.
    pub async fn call(&self, prompt: &str) -> Result<LlmResponse, LlmError> {
        let request_body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: JSON_MIME_TYPE,
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| FALLBACK_ERROR_MESSAGE.to_string());
            warn!("Gemini API returned {}: {}", status, message);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let llm_response: LlmResponse =
            serde_json::from_str(&body).map_err(LlmError::Envelope)?;

        if let Some(usage) = &llm_response.usage_metadata {
            debug!(
                "LLM call succeeded: prompt_tokens={}, candidate_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(llm_response)
    }

    /// Sends one prompt and returns the generated text payload.
    pub async fn generate_text(&self, prompt: &str) -> Result<String, LlmError> {
        let response = self.call(prompt).await?;
        match response.text() {
            Some(text) => Ok(text.to_owned()),
            None => {
                let finish_reason = response
                    .candidates
                    .first()
                    .and_then(|c| c.finish_reason.as_deref())
                    .unwrap_or("none");
                warn!("Gemini response carried no text (finish_reason={finish_reason})");
                Err(LlmError::EmptyContent)
            }
        }
    }

    fn transport_error(&self, error: reqwest::Error) -> LlmError {
        if error.is_timeout() {
            LlmError::Timeout(self.timeout)
        } else {
            LlmError::Http(error.without_url())
        }
    }
}

fn endpoint_for(base_url: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    format!("{base}/v1beta/models/{MODEL}:generateContent")
}
