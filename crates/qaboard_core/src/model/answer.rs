//! Answer domain model.
//!
//! # Invariants
//! - `under_question` references a question by convention only; nothing
//!   enforces it at the store level.
//! - Deleting an answer removes its row, so there is no tombstone field.

use crate::model::question::QuestionId;
use serde::{Deserialize, Serialize};

/// Store-assigned answer identity.
pub type AnswerId = i64;

/// One answer row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// `None` until the store assigns an id.
    pub id: Option<AnswerId>,
    pub text: String,
    pub posted_by: String,
    pub under_question: QuestionId,
    /// Several answers of one question may carry this flag; see
    /// `BoardGateway::accept_solution` for the exclusive variant.
    pub is_solution: bool,
}

impl Answer {
    /// Creates an unsaved answer that is not marked as solution.
    pub fn new(
        text: impl Into<String>,
        posted_by: impl Into<String>,
        under_question: QuestionId,
    ) -> Self {
        Self {
            id: None,
            text: text.into(),
            posted_by: posted_by.into(),
            under_question,
            is_solution: false,
        }
    }
}
