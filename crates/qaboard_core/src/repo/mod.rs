//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define row-level data access contracts for questions and answers.
//! - Isolate SQLite query details from the board gateway.
//!
//! # Invariants
//! - Every statement binds its arguments as parameters.
//! - Mutations that match no row return `NotFound` instead of succeeding
//!   silently.

use crate::model::answer::AnswerId;
use crate::model::question::QuestionId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod answer_repo;
pub mod question_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for board persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(rusqlite::Error),
    QuestionNotFound(QuestionId),
    AnswerNotFound(AnswerId),
    InvalidData(String),
}

impl RepoError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::QuestionNotFound(_) | Self::AnswerNotFound(_))
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::QuestionNotFound(id) => write!(f, "question not found: {id}"),
            Self::AnswerNotFound(id) => write!(f, "answer not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted board data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::QuestionNotFound(_) | Self::AnswerNotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(value)
    }
}

pub(crate) fn int_to_bool(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid flag value `{other}` in {column}"
        ))),
    }
}
