use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::generation::models::ContractViolation;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Service misconfigured: {0}")]
    ServiceMisconfigured(&'static str),

    #[error("Upstream error (status {status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Malformed generation output: {0}")]
    MalformedGenerationOutput(String),

    #[error("Schema violation: {0}")]
    SchemaViolation(#[from] ContractViolation),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::ServiceMisconfigured(_) => "SERVICE_MISCONFIGURED",
            AppError::Upstream { .. } => "UPSTREAM_ERROR",
            AppError::MalformedGenerationOutput(_) => "MALFORMED_GENERATION_OUTPUT",
            AppError::SchemaViolation(_) => "SCHEMA_VIOLATION",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::ServiceMisconfigured(detail) => {
                tracing::error!("Service misconfigured: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "API Key is not configured on the server".to_string(),
                )
            }
            AppError::Upstream { status, message } => {
                tracing::error!("Upstream error (status {status}): {message}");
                (
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                    message.clone(),
                )
            }
            AppError::MalformedGenerationOutput(detail) => {
                tracing::error!("Malformed generation output: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "AI returned invalid JSON".to_string(),
                )
            }
            AppError::SchemaViolation(violation) => {
                tracing::error!("Generation output violates the card contract: {violation}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("AI output did not match the card schema: {violation}"),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "code": self.code(),
        }));

        (status, body).into_response()
    }
}
