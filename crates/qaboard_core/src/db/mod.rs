//! SQLite storage bootstrap and session ownership.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections for the board.
//! - Create the `questions`/`answers` schema before any data access.
//! - Release the connection exactly once at session end.
//!
//! # Invariants
//! - Core code must not read/write board data before `create_schema` succeeds.
//! - A `Session` is the only owner of its connection.

use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};
pub use schema::create_schema;

pub type ConnectionResult<T> = Result<T, ConnectionError>;

/// Fatal error raised while acquiring or preparing the store connection.
#[derive(Debug)]
pub enum ConnectionError {
    Sqlite(rusqlite::Error),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for ConnectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "table `{table}` is missing required column `{column}`")
            }
        }
    }
}

impl Error for ConnectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for ConnectionError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Owned store handle for one interactive session.
///
/// Dropping the session closes the connection; `close` does the same but
/// reports the outcome.
#[derive(Debug)]
pub struct Session {
    conn: Connection,
}

impl Session {
    pub(crate) fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Releases cached statements, then the connection itself.
    ///
    /// # Side effects
    /// - Emits `db_close` logging events.
    pub fn close(self) -> ConnectionResult<()> {
        log::info!("event=db_close module=db status=start");

        // Cached statements hold their own sqlite handles; release them
        // before the connection so a close failure cannot leak them.
        self.conn.flush_prepared_statement_cache();

        match self.conn.close() {
            Ok(()) => {
                log::info!("event=db_close module=db status=ok");
                Ok(())
            }
            Err((_conn, err)) => {
                log::error!(
                    "event=db_close module=db status=error error_code=db_close_failed error={}",
                    err
                );
                Err(err.into())
            }
        }
    }
}
