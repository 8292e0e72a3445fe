//! Question/answer domain model.
//!
//! # Responsibility
//! - Define the records persisted by the board gateway.
//! - Keep construction defaults (`resolved`, `is_solution`) in one place.
//!
//! # Invariants
//! - Ids are assigned by the store; freshly constructed entities carry `None`.
//! - No validation happens here; callers pass already-validated input.

pub mod answer;
pub mod question;
