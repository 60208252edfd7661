//! Card generation data model — request body, the structured result the
//! model must produce, and the post-parse contract check.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_CARDS: u32 = 1;
pub const MAX_CARDS: u32 = 4;
pub const MIN_POINTS: usize = 2;
pub const MAX_POINTS: usize = 4;
/// Soft limits, counted in characters. Reported, never enforced.
pub const TITLE_SOFT_LIMIT: usize = 18;
pub const POINT_SOFT_LIMIT: usize = 28;

/// Request body for `POST /api/generate`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerationRequest {
    #[serde(default)]
    pub content: Option<String>,
}

#[cfg(test)]
impl GenerationRequest {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
        }
    }
}

/// Content category assigned to the input text.
/// Serialized as the exact labels the prompt asks the model to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentType {
    #[serde(rename = "金句 / 观点型", alias = "金句/观点型")]
    QuoteViewpoint,
    #[serde(rename = "笔记 / 知识型", alias = "笔记/知识型")]
    NoteKnowledge,
    #[serde(rename = "思考 / 方法论型", alias = "思考/方法论型")]
    ReasoningMethodology,
}

impl ContentType {
    #[cfg(test)]
    pub const ALL: [ContentType; 3] = [
        ContentType::QuoteViewpoint,
        ContentType::NoteKnowledge,
        ContentType::ReasoningMethodology,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ContentType::QuoteViewpoint => "金句 / 观点型",
            ContentType::NoteKnowledge => "笔记 / 知识型",
            ContentType::ReasoningMethodology => "思考 / 方法论型",
        }
    }
}

/// A single knowledge card: one title line and 2–4 short points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSpec {
    pub title: String,
    pub points: Vec<String>,
}

/// Structured output of one generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub content_type: ContentType,
    pub suggested_cards: u32,
    /// Role of each card within the set, one entry per card.
    pub strategy: Vec<String>,
    pub cards: Vec<CardSpec>,
}

/// A structural rule the model was told to follow but did not.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    /// Valid JSON, but a field is missing, mistyped or outside the vocabulary.
    #[error("output does not match the result shape: {0}")]
    Shape(String),

    #[error("suggestedCards must be between 1 and 4, got {0}")]
    CardCountOutOfRange(u32),

    #[error("strategy has {actual} entries but suggestedCards is {expected}")]
    StrategyLengthMismatch { expected: u32, actual: usize },

    #[error("cards has {actual} entries but suggestedCards is {expected}")]
    CardsLengthMismatch { expected: u32, actual: usize },

    #[error("card {index} has {count} points, expected 2 to 4")]
    PointCountOutOfRange { index: usize, count: usize },
}

/// A soft length limit exceeded by a title or point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftLimitOverrun {
    pub card: usize,
    /// `None` for the title, `Some(i)` for point `i`.
    pub point: Option<usize>,
    pub chars: usize,
    pub limit: usize,
}

impl GenerationResult {
    /// Checks the card-count range, the array lengths and the per-card point
    /// counts. Returns the first violation found.
    pub fn validate(&self) -> Result<(), ContractViolation> {
        let expected = self.suggested_cards;
        if !(MIN_CARDS..=MAX_CARDS).contains(&expected) {
            return Err(ContractViolation::CardCountOutOfRange(expected));
        }

        if self.strategy.len() != expected as usize {
            return Err(ContractViolation::StrategyLengthMismatch {
                expected,
                actual: self.strategy.len(),
            });
        }

        if self.cards.len() != expected as usize {
            return Err(ContractViolation::CardsLengthMismatch {
                expected,
                actual: self.cards.len(),
            });
        }

        for (index, card) in self.cards.iter().enumerate() {
            let count = card.points.len();
            if !(MIN_POINTS..=MAX_POINTS).contains(&count) {
                return Err(ContractViolation::PointCountOutOfRange { index, count });
            }
        }

        Ok(())
    }

    pub fn soft_limit_overruns(&self) -> Vec<SoftLimitOverrun> {
        let mut overruns = Vec::new();
        for (card_index, card) in self.cards.iter().enumerate() {
            let title_chars = card.title.chars().count();
            if title_chars > TITLE_SOFT_LIMIT {
                overruns.push(SoftLimitOverrun {
                    card: card_index,
                    point: None,
                    chars: title_chars,
                    limit: TITLE_SOFT_LIMIT,
                });
            }
            for (point_index, point) in card.points.iter().enumerate() {
                let chars = point.chars().count();
                if chars > POINT_SOFT_LIMIT {
                    overruns.push(SoftLimitOverrun {
                        card: card_index,
                        point: Some(point_index),
                        chars,
                        limit: POINT_SOFT_LIMIT,
                    });
                }
            }
        }
        overruns
    }
}
