//! Persistence and indirection core for the QA board.
//! This crate owns the board's state-integrity rules; the console shell only
//! calls into it.

pub mod db;
pub mod listing;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, ConnectionError, Session};
pub use listing::{
    ManagedEntry, ManagementList, OutOfRangeError, PersistentId, PresentationList,
    ENTRY_SEPARATOR,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::answer::{Answer, AnswerId};
pub use model::question::{
    Question, QuestionId, QuestionStatus, DELETED_PLACEHOLDER, DELETED_QUESTION_TITLE,
};
pub use repo::{RepoError, RepoResult};
pub use service::board_gateway::{
    AnswerScope, BoardGateway, PersistError, PersistResult, QueryError, QueryResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
