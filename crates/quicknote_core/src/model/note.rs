//! Note domain model and input normalization.
//!
//! # Responsibility
//! - Define the persisted `Note` record and its wire shape.
//! - Normalize caller-supplied form input (`NoteInput`).
//!
//! # Invariants
//! - `title` is never empty or whitespace-only.
//! - `tags` never contains empty or whitespace-only entries.
//! - `created_at <= updated_at`.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Title stored when the caller supplies only whitespace.
pub const DEFAULT_TITLE: &str = "Untitled";

/// Separator for raw tag input.
pub const TAG_SEPARATOR: char = ',';

/// Opaque note identifier.
///
/// Generated ids are UUID v4 strings, but ids read back from storage are kept
/// verbatim, so no format is assumed. Numeric ids in stored payloads are read
/// as their decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl<'de> Deserialize<'de> for NoteId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NoteIdVisitor)
    }
}

struct NoteIdVisitor;

impl Visitor<'_> for NoteIdVisitor {
    type Value = NoteId;

    fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("a string or integer note id")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<NoteId, E> {
        Ok(NoteId::from(value))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<NoteId, E> {
        Ok(NoteId(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<NoteId, E> {
        Ok(NoteId(value.to_string()))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<NoteId, E> {
        Ok(NoteId(value.to_string()))
    }
}

impl NoteId {
    /// Generates a new random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persisted text record.
///
/// Serialized with camelCase keys: `{id, title, content, tags, createdAt,
/// updatedAt}`, timestamps as epoch milliseconds. Only the repository builds
/// or mutates notes; everyone else reads through the accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub(crate) id: NoteId,
    pub(crate) title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) tags: Vec<String>,
    pub(crate) created_at: i64,
    pub(crate) updated_at: i64,
}

/// `null` reads like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Note {
    pub fn id(&self) -> &NoteId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Tags in entry order, case as typed.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn updated_at(&self) -> i64 {
        self.updated_at
    }

    /// Builds a fresh note from normalized input. Repository-only.
    pub(crate) fn from_input(id: NoteId, input: &NoteInput, now_ms: i64) -> Self {
        Self {
            id,
            title: normalize_title(&input.title),
            content: normalize_content(&input.content),
            tags: parse_tags(&input.tags_raw),
            created_at: now_ms,
            updated_at: now_ms,
        }
    }

    /// Replaces editable fields; `id` and `created_at` are kept.
    pub(crate) fn apply_input(&mut self, input: &NoteInput, now_ms: i64) {
        self.title = normalize_title(&input.title);
        self.content = normalize_content(&input.content);
        self.tags = parse_tags(&input.tags_raw);
        self.updated_at = now_ms.max(self.created_at);
    }

    /// Re-establishes write-time invariants on a record read from storage.
    pub(crate) fn sanitize(mut self) -> Self {
        self.title = normalize_title(&self.title);
        self.tags = self
            .tags
            .into_iter()
            .filter_map(|tag| normalize_tag(&tag))
            .collect();
        if self.updated_at < self.created_at {
            self.updated_at = self.created_at;
        }
        self
    }

    /// Tags joined for an edit form, e.g. `"travel, japan"`.
    pub fn tags_raw(&self) -> String {
        self.tags.join(", ")
    }

    /// Whether any tag equals `tag` ignoring case.
    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = tag.trim().to_lowercase();
        self.tags.iter().any(|value| value.to_lowercase() == wanted)
    }
}

/// Form data for create/update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteInput {
    pub title: String,
    pub content: String,
    /// Comma-separated tags as typed by the user.
    pub tags_raw: String,
}

impl NoteInput {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        tags_raw: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tags_raw: tags_raw.into(),
        }
    }

    /// Prefills an edit form from an existing note.
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            tags_raw: note.tags_raw(),
        }
    }
}

/// Trims a title and substitutes `DEFAULT_TITLE` when nothing is left.
pub fn normalize_title(title: &str) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn normalize_content(content: &str) -> String {
    content.trim().to_string()
}

/// Trims one tag; `None` when it is blank. Case is preserved.
pub fn normalize_tag(tag: &str) -> Option<String> {
    let trimmed = tag.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Splits raw tag input on commas, keeping order and duplicates.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(TAG_SEPARATOR).filter_map(normalize_tag).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_title_falls_back_to_default() {
        assert_eq!(normalize_title("   \t"), DEFAULT_TITLE);
        assert_eq!(normalize_title("  Plan  "), "Plan");
    }

    #[test]
    fn parse_tags_drops_blanks_and_keeps_case_and_duplicates() {
        assert_eq!(
            parse_tags(" Work, ,travel,,Work "),
            vec!["Work".to_string(), "travel".to_string(), "Work".to_string()]
        );
        assert!(parse_tags("  ").is_empty());
    }

    #[test]
    fn apply_input_never_moves_updated_before_created() {
        let mut note = Note::from_input(NoteId::from("n1"), &NoteInput::default(), 5_000);
        note.apply_input(&NoteInput::new("t", "c", ""), 1_000);
        assert_eq!(note.created_at, 5_000);
        assert_eq!(note.updated_at, 5_000);
    }

    #[test]
    fn sanitize_repairs_stored_record() {
        let note = Note {
            id: NoteId::from("x"),
            title: "  ".to_string(),
            content: String::new(),
            tags: vec![" ".to_string(), "ok".to_string()],
            created_at: 10,
            updated_at: 3,
        }
        .sanitize();
        assert_eq!(note.title, DEFAULT_TITLE);
        assert_eq!(note.tags, vec!["ok".to_string()]);
        assert_eq!(note.updated_at, 10);
    }

    #[test]
    fn numeric_id_and_null_fields_decode() {
        let note: Note = serde_json::from_str(
            r#"{"id":1700000000000,"title":"A","content":null,"tags":null,"createdAt":1,"updatedAt":2}"#,
        )
        .unwrap();
        assert_eq!(note.id().as_str(), "1700000000000");
        assert_eq!(note.content(), "");
        assert!(note.tags().is_empty());

        let encoded = serde_json::to_value(&note).unwrap();
        assert_eq!(encoded["id"], "1700000000000");
    }

    #[test]
    fn tags_raw_round_trips_through_input() {
        let note = Note::from_input(
            NoteId::generate(),
            &NoteInput::new("t", "", "travel, Japan"),
            1,
        );
        assert_eq!(note.tags_raw(), "travel, Japan");
        assert_eq!(parse_tags(&NoteInput::from_note(&note).tags_raw), note.tags);
        assert!(note.has_tag("JAPAN"));
        assert!(!note.has_tag("jap"));
    }
}
