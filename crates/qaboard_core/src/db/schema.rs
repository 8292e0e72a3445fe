//! Board schema definition.
//!
//! # Responsibility
//! - Create the `questions` and `answers` tables when absent.
//! - Bring a legacy `questions` table up to the current column set.
//!
//! # Invariants
//! - `create_schema` is idempotent.
//! - Column names keep their historical camelCase spelling so existing
//!   databases stay readable.
//! - `underQuestion` is a foreign key by convention only; no constraint and
//!   no cascade exist.

use super::{ConnectionError, ConnectionResult};
use rusqlite::Connection;

const CREATE_TABLES_SQL: &str = "
CREATE TABLE IF NOT EXISTS questions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    text TEXT NOT NULL,
    postedBy TEXT NOT NULL,
    resolved INTEGER NOT NULL DEFAULT 0 CHECK (resolved IN (0, 1)),
    deleted INTEGER NOT NULL DEFAULT 0 CHECK (deleted IN (0, 1))
);

CREATE TABLE IF NOT EXISTS answers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    text TEXT NOT NULL,
    postedBy TEXT NOT NULL,
    underQuestion INTEGER NOT NULL,
    isSolution INTEGER NOT NULL DEFAULT 0 CHECK (isSolution IN (0, 1))
);
";

const CREATE_INDEXES_SQL: &str =
    "CREATE INDEX IF NOT EXISTS idx_answers_under_question ON answers (underQuestion);";

const QUESTION_COLUMNS: [&str; 6] = ["id", "title", "text", "postedBy", "resolved", "deleted"];
const ANSWER_COLUMNS: [&str; 5] = ["id", "text", "postedBy", "underQuestion", "isSolution"];

/// Creates both board tables if they do not exist yet.
///
/// A `questions` table created before the `deleted` flag existed gets the
/// column added with every row marked as not deleted.
///
/// # Errors
/// - Returns `ConnectionError::Sqlite` for store failures.
/// - Returns `ConnectionError::MissingRequiredColumn` when an existing table
///   does not match the board layout.
pub fn create_schema(conn: &Connection) -> ConnectionResult<()> {
    conn.execute_batch(CREATE_TABLES_SQL)?;

    if !table_has_column(conn, "questions", "deleted")? {
        log::info!("event=schema_upgrade module=db status=start column=questions.deleted");
        conn.execute_batch(
            "ALTER TABLE questions ADD COLUMN deleted INTEGER NOT NULL DEFAULT 0;",
        )?;
    }

    for column in QUESTION_COLUMNS {
        if !table_has_column(conn, "questions", column)? {
            return Err(ConnectionError::MissingRequiredColumn {
                table: "questions",
                column,
            });
        }
    }
    for column in ANSWER_COLUMNS {
        if !table_has_column(conn, "answers", column)? {
            return Err(ConnectionError::MissingRequiredColumn {
                table: "answers",
                column,
            });
        }
    }

    conn.execute_batch(CREATE_INDEXES_SQL)?;
    Ok(())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> ConnectionResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
