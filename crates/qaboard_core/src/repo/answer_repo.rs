//! Answer repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `answers` table.
//! - Own solution-flag writes, both the plain and the exclusive variant.
//!
//! # Invariants
//! - New rows always start with `isSolution = 0`.
//! - `underQuestion` is stored as given; its existence is not checked.
//! - Deleting an answer physically removes the row.

use crate::model::answer::{Answer, AnswerId};
use crate::model::question::QuestionId;
use crate::repo::{int_to_bool, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const ANSWER_SELECT_SQL: &str = "SELECT
    id,
    text,
    postedBy,
    underQuestion,
    isSolution
FROM answers";

/// Query options for listing answers. Both filters combine with `AND`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerListQuery {
    pub under_question: Option<QuestionId>,
    pub posted_by: Option<String>,
}

/// Repository interface for answer rows.
pub trait AnswerRepository {
    /// Inserts one answer and returns the store-assigned id.
    fn create_answer(&self, answer: &Answer) -> RepoResult<AnswerId>;
    fn get_answer(&self, id: AnswerId) -> RepoResult<Option<Answer>>;
    fn list_answers(&self, query: &AnswerListQuery) -> RepoResult<Vec<Answer>>;
    /// Overwrites the body only.
    fn update_answer(&self, id: AnswerId, text: &str) -> RepoResult<()>;
    /// Sets `isSolution = 1` without touching sibling answers. Idempotent.
    fn mark_solution(&self, id: AnswerId) -> RepoResult<()>;
    /// Clears every other solution under `question_id`, then marks `id`.
    ///
    /// Callers wanting atomicity run this inside a transaction.
    fn mark_sole_solution(&self, question_id: QuestionId, id: AnswerId) -> RepoResult<()>;
    fn delete_answer(&self, id: AnswerId) -> RepoResult<()>;
}

/// SQLite-backed answer repository.
pub struct SqliteAnswerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAnswerRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AnswerRepository for SqliteAnswerRepository<'_> {
    fn create_answer(&self, answer: &Answer) -> RepoResult<AnswerId> {
        self.conn.execute(
            "INSERT INTO answers (text, postedBy, underQuestion, isSolution)
             VALUES (?1, ?2, ?3, 0);",
            params![
                answer.text.as_str(),
                answer.posted_by.as_str(),
                answer.under_question,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_answer(&self, id: AnswerId) -> RepoResult<Option<Answer>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("{ANSWER_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_answer_row(row)?));
        }

        Ok(None)
    }

    fn list_answers(&self, query: &AnswerListQuery) -> RepoResult<Vec<Answer>> {
        let mut sql = format!("{ANSWER_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(question_id) = query.under_question {
            sql.push_str(" AND underQuestion = ?");
            bind_values.push(Value::Integer(question_id));
        }

        if let Some(author) = query.posted_by.as_ref() {
            sql.push_str(" AND postedBy = ?");
            bind_values.push(Value::Text(author.clone()));
        }

        sql.push_str(" ORDER BY id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut answers = Vec::new();

        while let Some(row) = rows.next()? {
            answers.push(parse_answer_row(row)?);
        }

        Ok(answers)
    }

    fn update_answer(&self, id: AnswerId, text: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE answers SET text = ?1 WHERE id = ?2;",
            params![text, id],
        )?;
        ensure_answer_changed(changed, id)
    }

    fn mark_solution(&self, id: AnswerId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("UPDATE answers SET isSolution = 1 WHERE id = ?1;", [id])?;
        ensure_answer_changed(changed, id)
    }

    fn mark_sole_solution(&self, question_id: QuestionId, id: AnswerId) -> RepoResult<()> {
        let belongs: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM answers
                WHERE id = ?1 AND underQuestion = ?2
            );",
            params![id, question_id],
            |row| row.get(0),
        )?;
        if belongs == 0 {
            return Err(RepoError::AnswerNotFound(id));
        }

        self.conn.execute(
            "UPDATE answers
             SET isSolution = CASE WHEN id = ?2 THEN 1 ELSE 0 END
             WHERE underQuestion = ?1
               AND (id = ?2 OR isSolution = 1);",
            params![question_id, id],
        )?;

        Ok(())
    }

    fn delete_answer(&self, id: AnswerId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM answers WHERE id = ?1;", [id])?;
        ensure_answer_changed(changed, id)
    }
}

fn ensure_answer_changed(changed: usize, id: AnswerId) -> RepoResult<()> {
    if changed == 0 {
        return Err(RepoError::AnswerNotFound(id));
    }
    Ok(())
}

fn parse_answer_row(row: &Row<'_>) -> RepoResult<Answer> {
    Ok(Answer {
        id: Some(row.get("id")?),
        text: row.get("text")?,
        posted_by: row.get("postedBy")?,
        under_question: row.get("underQuestion")?,
        is_solution: int_to_bool(row.get("isSolution")?, "answers.isSolution")?,
    })
}
