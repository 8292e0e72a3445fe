//! Persistence gateway for the question/answer board.
//!
//! # Responsibility
//! - Own the store session for its whole lifetime.
//! - Expose every board operation as one repository call.
//! - Build display lists from query results.
//!
//! # Invariants
//! - Write failures are logged and returned as `PersistError`.
//! - Read failures are logged and returned as `QueryError`, never masked as
//!   an empty list.
//! - `mark_answer_as_solution` never clears other solutions;
//!   `accept_solution` does, atomically.
//! - `delete_question` keeps the row; `delete_answer` removes it.

use crate::db::{open_db, open_db_in_memory, ConnectionResult, Session};
use crate::listing::summary::{answer_summary, question_summary, question_summary_with_id};
use crate::listing::{ManagedEntry, ManagementList, PresentationList};
use crate::model::answer::{Answer, AnswerId};
use crate::model::question::{Question, QuestionId};
use crate::repo::answer_repo::{AnswerListQuery, AnswerRepository, SqliteAnswerRepository};
use crate::repo::question_repo::{
    QuestionListQuery, QuestionRepository, SqliteQuestionRepository,
};
use crate::repo::{RepoError, RepoResult};
use log::{debug, error, info};
use rusqlite::{Connection, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub type PersistResult<T> = Result<T, PersistError>;
pub type QueryResult<T> = Result<T, QueryError>;

/// A write statement failed. Recoverable: the caller may retry or abandon.
#[derive(Debug)]
pub struct PersistError {
    operation: &'static str,
    source: RepoError,
}

impl PersistError {
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn repo_error(&self) -> &RepoError {
        &self.source
    }

    /// The target row did not exist.
    pub fn is_not_found(&self) -> bool {
        self.source.is_not_found()
    }
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.operation, self.source)
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// A read failed. Distinct from an empty result.
#[derive(Debug)]
pub struct QueryError {
    operation: &'static str,
    source: RepoError,
}

impl QueryError {
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn repo_error(&self) -> &RepoError {
        &self.source
    }
}

impl Display for QueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.operation, self.source)
    }
}

impl Error for QueryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Which answers a management list should contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerScope {
    /// Answers written by this author, for edit/delete.
    PostedBy(String),
    /// Every answer under this question, for the owner picking a solution.
    UnderQuestion(QuestionId),
}

/// Single-connection gateway used by the console shell.
#[derive(Debug)]
pub struct BoardGateway {
    session: Session,
}

impl BoardGateway {
    /// Wraps an already opened session.
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Opens (or creates) the board database at `path`.
    pub fn connect(path: impl AsRef<Path>) -> ConnectionResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    /// Opens a private in-memory board.
    pub fn connect_in_memory() -> ConnectionResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }

    /// Releases the session. Close failures are logged, not returned.
    pub fn disconnect(self) {
        if let Err(err) = self.session.close() {
            error!(
                "event=board_disconnect module=gateway status=error error={}",
                err
            );
        }
    }

    pub fn post_question(&self, question: &Question) -> PersistResult<QuestionId> {
        let result = self.questions().create_question(question);
        if let Ok(id) = result {
            info!("event=question_post module=gateway status=ok question_id={id}");
        }
        finish_write("question_post", result)
    }

    /// Stores `answer` without checking that `under_question` exists.
    pub fn post_answer(&self, answer: &Answer) -> PersistResult<AnswerId> {
        let result = self.answers().create_answer(answer);
        if let Ok(id) = result {
            info!(
                "event=answer_post module=gateway status=ok answer_id={} question_id={}",
                id, answer.under_question
            );
        }
        finish_write("answer_post", result)
    }

    /// Every question in creation order, soft-deleted ones included, each
    /// prefixed with its persistent id.
    pub fn list_all_questions(&self) -> QueryResult<PresentationList> {
        let query = QuestionListQuery {
            include_deleted: true,
            ..QuestionListQuery::default()
        };
        let result = self.questions().list_questions(&query).map(|questions| {
            PresentationList::new(questions.iter().map(question_summary_with_id).collect())
        });
        finish_read("questions_list_all", result)
    }

    /// Browse list narrowed to entries containing `term`.
    pub fn search_questions(&self, term: &str) -> QueryResult<PresentationList> {
        let mut list = self.list_all_questions()?;
        list.filter(term);
        debug!(
            "event=questions_search module=gateway status=ok hits={}",
            list.len()
        );
        Ok(list)
    }

    pub fn view_answers_to_question(&self, question_id: QuestionId) -> QueryResult<PresentationList> {
        let query = AnswerListQuery {
            under_question: Some(question_id),
            ..AnswerListQuery::default()
        };
        let result = self
            .answers()
            .list_answers(&query)
            .map(|answers| PresentationList::new(answers.iter().map(answer_summary).collect()));
        finish_read("answers_view", result)
    }

    /// Questions written by `author` that have not been deleted.
    pub fn show_questions_to_manage(&self, author: &str) -> QueryResult<ManagementList> {
        let query = QuestionListQuery {
            posted_by: Some(author.to_string()),
            include_deleted: false,
        };
        let result = self.questions().list_questions(&query).map(|questions| {
            ManagementList::new(
                questions
                    .iter()
                    .filter_map(|question| {
                        question
                            .id
                            .map(|id| ManagedEntry::new(id, question_summary(question)))
                    })
                    .collect(),
            )
        });
        finish_read("questions_manage", result)
    }

    pub fn show_answers_to_manage(&self, scope: &AnswerScope) -> QueryResult<ManagementList> {
        let query = match scope {
            AnswerScope::PostedBy(author) => AnswerListQuery {
                posted_by: Some(author.clone()),
                ..AnswerListQuery::default()
            },
            AnswerScope::UnderQuestion(question_id) => AnswerListQuery {
                under_question: Some(*question_id),
                ..AnswerListQuery::default()
            },
        };
        let result = self.answers().list_answers(&query).map(|answers| {
            ManagementList::new(
                answers
                    .iter()
                    .filter_map(|answer| {
                        answer
                            .id
                            .map(|id| ManagedEntry::new(id, answer_summary(answer)))
                    })
                    .collect(),
            )
        });
        finish_read("answers_manage", result)
    }

    /// Typed lookup; soft-deleted questions are returned with their flag set.
    pub fn find_question(&self, question_id: QuestionId) -> QueryResult<Option<Question>> {
        finish_read("question_find", self.questions().get_question(question_id))
    }

    pub fn find_answer(&self, answer_id: AnswerId) -> QueryResult<Option<Answer>> {
        finish_read("answer_find", self.answers().get_answer(answer_id))
    }

    /// Overwrites title and body; author and resolution stay untouched.
    pub fn update_question(&self, question_id: QuestionId, title: &str, text: &str) -> PersistResult<()> {
        finish_write(
            "question_update",
            self.questions().update_question(question_id, title, text),
        )
    }

    pub fn update_answer(&self, answer_id: AnswerId, text: &str) -> PersistResult<()> {
        finish_write("answer_update", self.answers().update_answer(answer_id, text))
    }

    /// Flags one answer as solution. Other solutions under the same question
    /// are left as they are.
    pub fn mark_answer_as_solution(&self, answer_id: AnswerId) -> PersistResult<()> {
        finish_write("answer_mark_solution", self.answers().mark_solution(answer_id))
    }

    pub fn mark_question_as_resolved(&self, question_id: QuestionId) -> PersistResult<()> {
        finish_write("question_resolve", self.questions().mark_resolved(question_id))
    }

    /// Makes `answer_id` the only solution of `question_id` and resolves the
    /// question, in one immediate transaction.
    ///
    /// # Errors
    /// - `NotFound` when the answer is not under the question, or the
    ///   question does not exist. Nothing is written in that case.
    pub fn accept_solution(
        &mut self,
        question_id: QuestionId,
        answer_id: AnswerId,
    ) -> PersistResult<()> {
        let result = accept_solution_in_tx(self.session.connection_mut(), question_id, answer_id);
        if result.is_ok() {
            info!(
                "event=solution_accept module=gateway status=ok question_id={} answer_id={}",
                question_id, answer_id
            );
        }
        finish_write("solution_accept", result)
    }

    /// Removes the answer row.
    pub fn delete_answer(&self, answer_id: AnswerId) -> PersistResult<()> {
        finish_write("answer_delete", self.answers().delete_answer(answer_id))
    }

    /// Soft delete: content is replaced with placeholders and the row stays,
    /// so answers under it keep a valid parent.
    pub fn delete_question(&self, question_id: QuestionId) -> PersistResult<()> {
        finish_write(
            "question_delete",
            self.questions().soft_delete_question(question_id),
        )
    }

    fn questions(&self) -> SqliteQuestionRepository<'_> {
        SqliteQuestionRepository::new(self.session.connection())
    }

    fn answers(&self) -> SqliteAnswerRepository<'_> {
        SqliteAnswerRepository::new(self.session.connection())
    }
}

fn accept_solution_in_tx(
    conn: &mut Connection,
    question_id: QuestionId,
    answer_id: AnswerId,
) -> RepoResult<()> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    SqliteQuestionRepository::new(&tx).mark_resolved(question_id)?;
    SqliteAnswerRepository::new(&tx).mark_sole_solution(question_id, answer_id)?;
    tx.commit()?;
    Ok(())
}

fn finish_write<T>(operation: &'static str, result: RepoResult<T>) -> PersistResult<T> {
    result.map_err(|err| {
        error!("event={operation} module=gateway status=error error={err}");
        PersistError {
            operation,
            source: err,
        }
    })
}

fn finish_read<T>(operation: &'static str, result: RepoResult<T>) -> QueryResult<T> {
    match result {
        Ok(value) => {
            debug!("event={operation} module=gateway status=ok");
            Ok(value)
        }
        Err(err) => {
            error!("event={operation} module=gateway status=error error={err}");
            Err(QueryError {
                operation,
                source: err,
            })
        }
    }
}
