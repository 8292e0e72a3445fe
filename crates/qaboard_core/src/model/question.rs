//! Question domain model.
//!
//! # Responsibility
//! - Carry the persisted fields of one question.
//! - Derive a lifecycle status from the stored flags.
//!
//! # Invariants
//! - `id` is unique and never reused, even after a soft delete.
//! - `posted_by` never changes after creation.
//! - `is_deleted` is the source of truth for tombstone state; the sentinel
//!   title is informational only.

use serde::{Deserialize, Serialize};

/// Store-assigned question identity.
pub type QuestionId = i64;

/// Title written over a question when it is soft-deleted.
pub const DELETED_QUESTION_TITLE: &str = "This question has been deleted.";
/// Placeholder written over the body and author of a soft-deleted question.
pub const DELETED_PLACEHOLDER: &str = "--";

/// Lifecycle state of a question.
///
/// `Open -> Resolved` is one-way in normal use. `Deleted` wins over both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionStatus {
    Open,
    Resolved,
    Deleted,
}

/// One question row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// `None` until the store assigns an id.
    pub id: Option<QuestionId>,
    pub title: String,
    pub text: String,
    pub posted_by: String,
    pub resolved: bool,
    /// Set by soft delete alongside the placeholder overwrite.
    pub is_deleted: bool,
}

impl Question {
    /// Creates an unsaved, unresolved question.
    pub fn new(
        title: impl Into<String>,
        text: impl Into<String>,
        posted_by: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            text: text.into(),
            posted_by: posted_by.into(),
            resolved: false,
            is_deleted: false,
        }
    }

    pub fn status(&self) -> QuestionStatus {
        if self.is_deleted {
            QuestionStatus::Deleted
        } else if self.resolved {
            QuestionStatus::Resolved
        } else {
            QuestionStatus::Open
        }
    }

    /// Badge shown next to the title in rendered lists.
    pub fn resolution_badge(&self) -> &'static str {
        if self.resolved {
            "(Resolved)"
        } else {
            "(Unresolved)"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Question, QuestionStatus};

    #[test]
    fn new_question_is_open_and_unsaved() {
        let question = Question::new("T", "B", "U");
        assert_eq!(question.id, None);
        assert!(!question.resolved);
        assert_eq!(question.status(), QuestionStatus::Open);
        assert_eq!(question.resolution_badge(), "(Unresolved)");
    }

    #[test]
    fn deleted_flag_takes_precedence_over_resolved() {
        let mut question = Question::new("T", "B", "U");
        question.resolved = true;
        assert_eq!(question.status(), QuestionStatus::Resolved);

        question.is_deleted = true;
        assert_eq!(question.status(), QuestionStatus::Deleted);
        assert_eq!(question.resolution_badge(), "(Resolved)");
    }
}
