//! Text summaries for board entities.
//!
//! Formats follow what the board has always shown, so users and existing
//! tests can match on `(Resolved)`, `(Unresolved)`, `(Solution)` and
//! `Posted by:`.

use crate::model::answer::Answer;
use crate::model::question::Question;

pub const SOLUTION_BADGE: &str = "(Solution)";

/// `"{title} {badge}\nPosted by: {author}\n{text}"`.
pub fn question_summary(question: &Question) -> String {
    format!(
        "{} {}\nPosted by: {}\n{}",
        question.title,
        question.resolution_badge(),
        question.posted_by,
        question.text
    )
}

/// Browse variant prefixed with the persistent id, which users type back in
/// to answer or open a question.
pub fn question_summary_with_id(question: &Question) -> String {
    match question.id {
        Some(id) => format!("{id}. {}", question_summary(question)),
        None => question_summary(question),
    }
}

/// `"[(Solution) ]{text}\nPosted by: {author}"`.
pub fn answer_summary(answer: &Answer) -> String {
    let badge = if answer.is_solution {
        format!("{SOLUTION_BADGE} ")
    } else {
        String::new()
    };
    format!("{badge}{}\nPosted by: {}", answer.text, answer.posted_by)
}
