//! In-memory presentation lists built from query results.
//!
//! # Responsibility
//! - Render query results as numbered, separator-delimited text.
//! - Map 1-based display indexes back to persistent row ids.
//! - Narrow a list by substring without touching the store.
//!
//! # Invariants
//! - Entry order is the order rows came back from the store.
//! - Display index `n` always refers to the `n`-th remaining entry, also
//!   after `filter`.
//! - Lists own copies of their data; no cursor outlives construction.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, Write};

pub mod summary;

/// Line written after every rendered entry.
pub const ENTRY_SEPARATOR: &str = "------------------------------------------";

/// Store-assigned row id carried by a management list.
pub type PersistentId = i64;

/// Display index outside `1..=len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfRangeError {
    pub index: i64,
    pub len: usize,
}

impl Display for OutOfRangeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.len == 0 {
            write!(f, "display index {} is out of range: list is empty", self.index)
        } else {
            write!(
                f,
                "display index {} is out of range: expected 1..={}",
                self.index, self.len
            )
        }
    }
}

impl Error for OutOfRangeError {}

/// Read-only rendering of a query result.
///
/// Entries cannot be resolved back to ids; use `ManagementList` when the
/// caller will act on a chosen entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresentationList {
    entries: Vec<String>,
}

impl PresentationList {
    pub fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Keeps only entries containing `term` (case-sensitive). Not reversible.
    pub fn filter(&mut self, term: &str) {
        self.entries.retain(|entry| entry.contains(term));
    }

    /// Writes every entry followed by the separator line.
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for entry in &self.entries {
            writeln!(out, "{entry}")?;
            writeln!(out, "{ENTRY_SEPARATOR}")?;
        }
        Ok(())
    }
}

impl Display for PresentationList {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
            writeln!(f, "{ENTRY_SEPARATOR}")?;
        }
        Ok(())
    }
}

/// One selectable row of a management list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedEntry {
    pub id: PersistentId,
    pub summary: String,
}

impl ManagedEntry {
    pub fn new(id: PersistentId, summary: impl Into<String>) -> Self {
        Self {
            id,
            summary: summary.into(),
        }
    }
}

/// Rendering of a query result whose entries the caller may act on.
///
/// Display indexes are 1-based and computed from position, so they are
/// rendered, not stored; a filtered list renumbers from 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManagementList {
    entries: Vec<ManagedEntry>,
}

impl ManagementList {
    pub fn new(entries: Vec<ManagedEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ManagedEntry] {
        &self.entries
    }

    /// Persistent ids in display order.
    pub fn ids(&self) -> impl Iterator<Item = PersistentId> + '_ {
        self.entries.iter().map(|entry| entry.id)
    }

    /// Returns the persistent id shown at `display_index`.
    ///
    /// # Errors
    /// - `OutOfRangeError` when `display_index` is `<= 0` or `> len()`.
    pub fn resolve_id(&self, display_index: i64) -> Result<PersistentId, OutOfRangeError> {
        let out_of_range = OutOfRangeError {
            index: display_index,
            len: self.entries.len(),
        };
        let position = usize::try_from(display_index)
            .ok()
            .and_then(|index| index.checked_sub(1))
            .ok_or(out_of_range)?;

        self.entries
            .get(position)
            .map(|entry| entry.id)
            .ok_or(out_of_range)
    }

    /// Reverse lookup: the 1-based display index currently showing `id`.
    pub fn display_index_of(&self, id: PersistentId) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.id == id)
            .map(|position| position + 1)
    }

    /// Keeps only entries whose summary contains `term` (case-sensitive).
    ///
    /// Ids are dropped together with their text, so resolution stays aligned.
    pub fn filter(&mut self, term: &str) {
        self.entries.retain(|entry| entry.summary.contains(term));
    }

    /// Writes `"{display_index}. {summary}"` and a separator per entry.
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (position, entry) in self.entries.iter().enumerate() {
            writeln!(out, "{}. {}", position + 1, entry.summary)?;
            writeln!(out, "{ENTRY_SEPARATOR}")?;
        }
        Ok(())
    }

    /// Drops the id mapping, keeping the numbered rendering.
    pub fn into_presentation(self) -> PresentationList {
        PresentationList::new(
            self.entries
                .into_iter()
                .enumerate()
                .map(|(position, entry)| format!("{}. {}", position + 1, entry.summary))
                .collect(),
        )
    }
}

impl Display for ManagementList {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (position, entry) in self.entries.iter().enumerate() {
            writeln!(f, "{}. {}", position + 1, entry.summary)?;
            writeln!(f, "{ENTRY_SEPARATOR}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ManagedEntry, ManagementList, OutOfRangeError, PresentationList, ENTRY_SEPARATOR};

    fn sample_management_list() -> ManagementList {
        ManagementList::new(vec![
            ManagedEntry::new(11, "alpha\nPosted by: A"),
            ManagedEntry::new(42, "beta\nPosted by: B"),
            ManagedEntry::new(7, "alphabet\nPosted by: A"),
        ])
    }

    #[test]
    fn render_terminates_every_entry_with_separator() {
        let list = PresentationList::new(vec!["one".to_string(), "two".to_string()]);
        let mut out = Vec::new();
        list.render(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, format!("one\n{ENTRY_SEPARATOR}\ntwo\n{ENTRY_SEPARATOR}\n"));
        assert_eq!(text, list.to_string());
    }

    #[test]
    fn presentation_filter_is_case_sensitive_and_keeps_order() {
        let mut list = PresentationList::new(vec![
            "Rust borrow".to_string(),
            "rust lifetimes".to_string(),
            "Rust traits".to_string(),
        ]);
        list.filter("Rust");
        assert_eq!(list.entries(), ["Rust borrow", "Rust traits"]);
    }

    #[test]
    fn resolve_id_maps_one_based_indexes() {
        let list = sample_management_list();
        assert_eq!(list.resolve_id(1), Ok(11));
        assert_eq!(list.resolve_id(2), Ok(42));
        assert_eq!(list.resolve_id(3), Ok(7));
        assert_eq!(list.display_index_of(42), Some(2));
        assert_eq!(list.display_index_of(99), None);
    }

    #[test]
    fn resolve_id_rejects_zero_negative_and_past_end() {
        let list = sample_management_list();
        for index in [0, -1, 4, i64::MIN] {
            assert_eq!(
                list.resolve_id(index),
                Err(OutOfRangeError { index, len: 3 })
            );
        }
    }

    #[test]
    fn management_filter_drops_ids_with_text_and_renumbers() {
        let mut list = sample_management_list();
        list.filter("alpha");

        assert_eq!(list.len(), 2);
        assert_eq!(list.resolve_id(1), Ok(11));
        assert_eq!(list.resolve_id(2), Ok(7));
        assert!(list.resolve_id(3).is_err());

        let rendered = list.to_string();
        assert!(rendered.starts_with("1. alpha"));
        assert!(rendered.contains("2. alphabet"));
        assert!(!rendered.contains("beta\n"));
    }

    #[test]
    fn empty_management_list_reports_empty_range() {
        let list = ManagementList::default();
        let err = list.resolve_id(1).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn into_presentation_keeps_numbering() {
        let presentation = sample_management_list().into_presentation();
        assert_eq!(presentation.len(), 3);
        assert!(presentation.entries()[1].starts_with("2. beta"));
    }
}
