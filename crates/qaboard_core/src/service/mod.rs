//! Board use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the operations the shell invokes.
//! - Turn rows into presentation and management lists.
//! - Keep the shell decoupled from SQL and connection handling.

pub mod board_gateway;
