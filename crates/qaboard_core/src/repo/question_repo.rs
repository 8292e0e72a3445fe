//! Question repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `questions` table.
//! - Own the soft-delete overwrite of question content.
//!
//! # Invariants
//! - New rows always start with `resolved = 0` and `deleted = 0`.
//! - Soft delete keeps the row, its id and its `resolved` flag.
//! - Updates never touch `postedBy` or `resolved`.
//! - Lists come back in creation order.

use crate::model::question::{Question, QuestionId, DELETED_PLACEHOLDER, DELETED_QUESTION_TITLE};
use crate::repo::{int_to_bool, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const QUESTION_SELECT_SQL: &str = "SELECT
    id,
    title,
    text,
    postedBy,
    resolved,
    deleted
FROM questions";

/// Query options for listing questions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionListQuery {
    /// Exact author match.
    pub posted_by: Option<String>,
    /// Soft-deleted rows are skipped unless set.
    pub include_deleted: bool,
}

/// Repository interface for question rows.
pub trait QuestionRepository {
    /// Inserts one question and returns the store-assigned id.
    fn create_question(&self, question: &Question) -> RepoResult<QuestionId>;
    /// Gets one question by id, including soft-deleted rows.
    fn get_question(&self, id: QuestionId) -> RepoResult<Option<Question>>;
    fn list_questions(&self, query: &QuestionListQuery) -> RepoResult<Vec<Question>>;
    /// Overwrites title and body.
    fn update_question(&self, id: QuestionId, title: &str, text: &str) -> RepoResult<()>;
    /// Sets `resolved = 1`. Idempotent.
    fn mark_resolved(&self, id: QuestionId) -> RepoResult<()>;
    /// Replaces content with placeholders and sets the `deleted` flag.
    fn soft_delete_question(&self, id: QuestionId) -> RepoResult<()>;
}

/// SQLite-backed question repository.
pub struct SqliteQuestionRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteQuestionRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl QuestionRepository for SqliteQuestionRepository<'_> {
    fn create_question(&self, question: &Question) -> RepoResult<QuestionId> {
        self.conn.execute(
            "INSERT INTO questions (title, text, postedBy, resolved, deleted)
             VALUES (?1, ?2, ?3, 0, 0);",
            params![
                question.title.as_str(),
                question.text.as_str(),
                question.posted_by.as_str(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_question(&self, id: QuestionId) -> RepoResult<Option<Question>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("{QUESTION_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_question_row(row)?));
        }

        Ok(None)
    }

    fn list_questions(&self, query: &QuestionListQuery) -> RepoResult<Vec<Question>> {
        let mut sql = format!("{QUESTION_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if !query.include_deleted {
            sql.push_str(" AND deleted = 0");
        }

        if let Some(author) = query.posted_by.as_ref() {
            sql.push_str(" AND postedBy = ?");
            bind_values.push(Value::Text(author.clone()));
        }

        sql.push_str(" ORDER BY id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut questions = Vec::new();

        while let Some(row) = rows.next()? {
            questions.push(parse_question_row(row)?);
        }

        Ok(questions)
    }

    fn update_question(&self, id: QuestionId, title: &str, text: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE questions SET title = ?1, text = ?2 WHERE id = ?3;",
            params![title, text, id],
        )?;
        ensure_question_changed(changed, id)
    }

    fn mark_resolved(&self, id: QuestionId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("UPDATE questions SET resolved = 1 WHERE id = ?1;", [id])?;
        ensure_question_changed(changed, id)
    }

    fn soft_delete_question(&self, id: QuestionId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE questions
             SET
                title = ?1,
                text = ?2,
                postedBy = ?2,
                deleted = 1
             WHERE id = ?3;",
            params![DELETED_QUESTION_TITLE, DELETED_PLACEHOLDER, id],
        )?;
        ensure_question_changed(changed, id)
    }
}

fn ensure_question_changed(changed: usize, id: QuestionId) -> RepoResult<()> {
    if changed == 0 {
        return Err(RepoError::QuestionNotFound(id));
    }
    Ok(())
}

fn parse_question_row(row: &Row<'_>) -> RepoResult<Question> {
    Ok(Question {
        id: Some(row.get("id")?),
        title: row.get("title")?,
        text: row.get("text")?,
        posted_by: row.get("postedBy")?,
        resolved: int_to_bool(row.get("resolved")?, "questions.resolved")?,
        is_deleted: int_to_bool(row.get("deleted")?, "questions.deleted")?,
    })
}
