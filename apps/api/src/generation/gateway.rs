//! Generation Gateway — turns a `GenerationRequest` into a validated
//! `GenerationResult` or a typed failure.
//!
//! Flow: input check → credential check → build prompt → one LLM call →
//!       parse JSON → shape check → contract check → return.
//!
//! Stateless: every invocation is independent. No retries, no caching.

use serde_json::Value;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::models::{ContractViolation, GenerationRequest, GenerationResult};
use crate::generation::prompts::build_card_prompt;
use crate::llm_client::{LlmClient, LlmError};

/// Runs one card generation.
///
/// `llm` is `None` when no credential was configured at startup. Both the
/// input and the credential are checked before any network traffic.
pub async fn generate_cards(
    llm: Option<&LlmClient>,
    request: GenerationRequest,
) -> Result<GenerationResult, AppError> {
    let content = request.content.unwrap_or_default();
    if content.trim().is_empty() {
        return Err(AppError::InvalidInput("Content is required".to_string()));
    }

    let llm = llm.ok_or(AppError::ServiceMisconfigured("GEMINI_API_KEY is not set"))?;

    info!(
        "Generating cards from {} characters of content",
        content.chars().count()
    );

    let prompt = build_card_prompt(&content);
    let text = llm.generate_text(&prompt).await.map_err(upstream_failure)?;
    let result = parse_generation_output(&text)?;

    for overrun in result.soft_limit_overruns() {
        match overrun.point {
            None => warn!(
                "Card {} title is {} characters (soft limit {})",
                overrun.card, overrun.chars, overrun.limit
            ),
            Some(point) => warn!(
                "Card {} point {} is {} characters (soft limit {})",
                overrun.card, point, overrun.chars, overrun.limit
            ),
        }
    }

    info!(
        "Generated {} cards: contentType={}",
        result.suggested_cards,
        result.content_type.label()
    );

    Ok(result)
}

/// Parses the model's text payload into a contract-checked result.
///
/// Not JSON at all → `MalformedGenerationOutput`. JSON of the wrong shape, or
/// breaking a count rule → `SchemaViolation`. Nothing is repaired.
pub fn parse_generation_output(text: &str) -> Result<GenerationResult, AppError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| AppError::MalformedGenerationOutput(e.to_string()))?;

    let result: GenerationResult =
        serde_json::from_value(value).map_err(|e| ContractViolation::Shape(e.to_string()))?;

    result.validate()?;

    Ok(result)
}

fn upstream_failure(error: LlmError) -> AppError {
    match error {
        LlmError::Api { status, message } => AppError::Upstream { status, message },
        LlmError::Timeout(_) => AppError::Upstream {
            status: 504,
            message: error.to_string(),
        },
        LlmError::Http(_) => AppError::Upstream {
            status: 502,
            message: error.to_string(),
        },
        LlmError::Envelope(_) | LlmError::EmptyContent => {
            AppError::MalformedGenerationOutput(error.to_string())
        }
    }
}
