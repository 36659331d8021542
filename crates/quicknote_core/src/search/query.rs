//! Free search + exact tag filter over an in-memory note collection.
//!
//! # Responsibility
//! - Select notes matching a free-text search AND an exact tag filter.
//! - Order results by `updated_at DESC`.
//! - Build the distinct tag catalog for tag pickers.
//!
//! # Invariants
//! - Pure: same inputs always give the same output.
//! - Notes with equal `updated_at` keep their collection order.

use crate::model::note::Note;
use std::collections::HashSet;

/// Normalized query inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteQuery {
    search: String,
    tag: String,
}

impl NoteQuery {
    /// Trims and lower-cases both inputs; empty means "no constraint".
    pub fn new(search_text: &str, exact_tag: &str) -> Self {
        Self {
            search: search_text.trim().to_lowercase(),
            tag: exact_tag.trim().to_lowercase(),
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        self.search.is_empty() && self.tag.is_empty()
    }

    /// Both predicates must hold.
    pub fn matches(&self, note: &Note) -> bool {
        self.matches_text(note) && self.matches_tag(note)
    }

    fn matches_text(&self, note: &Note) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.as_str();
        note.title.to_lowercase().contains(needle)
            || note.content.to_lowercase().contains(needle)
            || note
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle))
    }

    fn matches_tag(&self, note: &Note) -> bool {
        self.tag.is_empty() || note.tags.iter().any(|tag| tag.to_lowercase() == self.tag)
    }
}

/// Filters and orders `notes` for display.
pub fn query_notes<'a>(notes: &'a [Note], search_text: &str, exact_tag: &str) -> Vec<&'a Note> {
    let query = NoteQuery::new(search_text, exact_tag);
    let mut hits: Vec<&Note> = notes.iter().filter(|note| query.matches(note)).collect();
    // `sort_by` is stable: ties stay in collection order.
    hits.sort_by(|left, right| right.updated_at.cmp(&left.updated_at));
    hits
}

/// Distinct tags across `notes`, sorted case-insensitively.
///
/// Duplicates differing only by case collapse to the first spelling seen.
pub fn distinct_tags(notes: &[Note]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut tags: Vec<String> = notes
        .iter()
        .flat_map(|note| note.tags.iter())
        .filter(|tag| seen.insert(tag.to_lowercase()))
        .cloned()
        .collect();
    tags.sort_by_key(|tag| tag.to_lowercase());
    tags
}

#[cfg(test)]
mod tests {
    use super::{distinct_tags, query_notes, NoteQuery};
    use crate::model::note::{Note, NoteId};

    fn note(id: &str, title: &str, content: &str, tags: &[&str], updated_at: i64) -> Note {
        Note {
            id: NoteId::from(id),
            title: title.to_string(),
            content: content.to_string(),
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
            created_at: 0,
            updated_at,
        }
    }

    fn ids(hits: &[&Note]) -> Vec<String> {
        hits.iter().map(|note| note.id.to_string()).collect()
    }

    fn fixture() -> Vec<Note> {
        vec![
            note("tokyo", "Trip to Tokyo", "", &["travel", "japan"], 100),
            note("budget", "Budget", "", &["work"], 200),
        ]
    }

    #[test]
    fn free_search_matches_title_case_insensitively() {
        let notes = fixture();
        assert_eq!(ids(&query_notes(&notes, "tokyo", "")), vec!["tokyo"]);
    }

    #[test]
    fn exact_tag_filter_selects_tagged_note() {
        let notes = fixture();
        assert_eq!(ids(&query_notes(&notes, "", "work")), vec!["budget"]);
    }

    #[test]
    fn search_and_tag_are_combined_with_and() {
        let notes = fixture();
        assert!(query_notes(&notes, "budget", "travel").is_empty());
    }

    #[test]
    fn unfiltered_query_orders_by_updated_desc() {
        let notes = fixture();
        assert_eq!(ids(&query_notes(&notes, "", "")), vec!["budget", "tokyo"]);
        assert!(NoteQuery::new("  ", "\t").is_unfiltered());
    }

    #[test]
    fn free_search_uses_substring_on_tags_but_filter_is_exact() {
        let notes = fixture();
        assert_eq!(ids(&query_notes(&notes, "JAP", "")), vec!["tokyo"]);
        assert!(query_notes(&notes, "", "jap").is_empty());
        assert_eq!(ids(&query_notes(&notes, "", "  JAPAN ")), vec!["tokyo"]);
    }

    #[test]
    fn free_search_reaches_content() {
        let notes = vec![note("a", "Groceries", "Buy OAT milk", &[], 1)];
        assert_eq!(ids(&query_notes(&notes, "oat", "")), vec!["a"]);
    }

    #[test]
    fn equal_timestamps_keep_collection_order() {
        let notes = vec![
            note("first", "a", "", &[], 7),
            note("second", "b", "", &[], 7),
            note("newest", "c", "", &[], 9),
        ];
        assert_eq!(
            ids(&query_notes(&notes, "", "")),
            vec!["newest", "first", "second"]
        );
    }

    #[test]
    fn distinct_tags_collapse_case_and_sort() {
        let notes = vec![
            note("a", "a", "", &["Work", "zeta"], 1),
            note("b", "b", "", &["work", "Alpha"], 2),
        ];
        assert_eq!(distinct_tags(&notes), vec!["Alpha", "Work", "zeta"]);
    }
}
