//! Axum route handlers for the Generation API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::gateway::generate_cards;
use crate::generation::models::{GenerationRequest, GenerationResult};
use crate::state::AppState;

/// POST /api/generate
///
/// Converts free-form text into 1–4 knowledge cards.
/// A body that is not JSON of the expected shape is treated as invalid input.
pub async fn handle_generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<GenerationResult>, AppError> {
    let Json(request) = payload.map_err(|rejection| AppError::InvalidInput(rejection.body_text()))?;

    let request_id = Uuid::new_v4();
    let result = generate_cards(state.llm.as_ref(), request)
        .instrument(info_span!("generate", %request_id))
        .await?;

    Ok(Json(result))
}
