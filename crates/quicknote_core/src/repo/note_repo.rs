//! Note repository over a key-value store.
//!
//! # Responsibility
//! - Provide create/update/delete/query APIs for notes.
//! - Persist the full collection under one key as a JSON array.
//! - Rehydrate leniently: malformed payloads load as an empty collection.
//!
//! # Invariants
//! - Note ids are unique across the live collection.
//! - New notes are prepended, so storage order is most-recent-first.
//! - Update/delete of an unknown id is a silent no-op and writes nothing.
//! - `query` never touches the key-value store.

use crate::clock::{Clock, SystemClock};
use crate::config::DEFAULT_NOTES_KEY;
use crate::kv::{read_or_absent, KeyValueStore, KvError};
use crate::model::note::{Note, NoteId, NoteInput};
use crate::search::query::{distinct_tags, query_notes};
use log::{info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Failure to persist the collection.
#[derive(Debug)]
pub enum RepoError {
    Store(KvError),
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "failed to write notes: {err}"),
            Self::Encode(err) => write!(f, "failed to encode notes: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<KvError> for RepoError {
    fn from(value: KvError) -> Self {
        Self::Store(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// In-memory note collection backed by a key-value store.
pub struct NoteRepository<'kv, S: KeyValueStore + ?Sized> {
    kv: &'kv S,
    key: String,
    clock: Box<dyn Clock>,
    notes: Vec<Note>,
}

impl<'kv, S: KeyValueStore + ?Sized> NoteRepository<'kv, S> {
    /// Creates an empty, not yet loaded repository using the default key.
    pub fn new(kv: &'kv S) -> Self {
        Self {
            kv,
            key: DEFAULT_NOTES_KEY.to_string(),
            clock: Box::new(SystemClock),
            notes: Vec::new(),
        }
    }

    /// Creates a repository and loads the stored collection.
    pub fn open(kv: &'kv S) -> Self {
        let mut repo = Self::new(kv);
        repo.load();
        repo
    }

    /// Uses `key` instead of the default notes key. Call before `load`.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replaces in-memory state with the stored collection.
    ///
    /// Never fails: an absent, unreadable, or malformed payload yields an
    /// empty collection.
    pub fn load(&mut self) -> &[Note] {
        self.notes = match read_or_absent(self.kv, &self.key, "note_repo") {
            Some(payload) => decode_notes(&payload),
            None => Vec::new(),
        };
        info!(
            "event=notes_load module=note_repo status=ok count={}",
            self.notes.len()
        );
        &self.notes
    }

    /// Current collection in storage order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| &note.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Creates a note from form input, prepends it, and persists.
    pub fn create(&mut self, input: &NoteInput) -> RepoResult<Note> {
        let note = Note::from_input(self.fresh_id(), input, self.clock.now_ms());

        let mut next = Vec::with_capacity(self.notes.len() + 1);
        next.push(note.clone());
        next.extend(self.notes.iter().cloned());
        self.commit(next)?;

        info!(
            "event=note_create module=note_repo status=ok tags={} count={}",
            note.tags.len(),
            self.notes.len()
        );
        Ok(note)
    }

    /// Replaces title/content/tags of `id` and persists.
    ///
    /// Returns `Ok(None)` without writing when no note has `id`.
    pub fn update(&mut self, id: &NoteId, input: &NoteInput) -> RepoResult<Option<Note>> {
        let Some(index) = self.position(id) else {
            info!("event=note_update module=note_repo status=miss");
            return Ok(None);
        };

        let mut next = self.notes.clone();
        next[index].apply_input(input, self.clock.now_ms());
        let updated = next[index].clone();
        self.commit(next)?;

        info!("event=note_update module=note_repo status=ok");
        Ok(Some(updated))
    }

    /// Removes `id` and persists. Returns whether a note was removed.
    pub fn delete(&mut self, id: &NoteId) -> RepoResult<bool> {
        let Some(index) = self.position(id) else {
            info!("event=note_delete module=note_repo status=miss");
            return Ok(false);
        };

        let mut next = self.notes.clone();
        next.remove(index);
        self.commit(next)?;

        info!(
            "event=note_delete module=note_repo status=ok count={}",
            self.notes.len()
        );
        Ok(true)
    }

    /// Notes matching `search_text` and `exact_tag`, newest update first.
    pub fn query(&self, search_text: &str, exact_tag: &str) -> Vec<&Note> {
        query_notes(&self.notes, search_text, exact_tag)
    }

    /// Distinct tags for a tag filter picker.
    pub fn tags(&self) -> Vec<String> {
        distinct_tags(&self.notes)
    }

    fn position(&self, id: &NoteId) -> Option<usize> {
        self.notes.iter().position(|note| &note.id == id)
    }

    fn fresh_id(&self) -> NoteId {
        loop {
            let id = NoteId::generate();
            if self.position(&id).is_none() {
                return id;
            }
        }
    }

    /// Writes `next` and adopts it only if the write succeeded.
    fn commit(&mut self, next: Vec<Note>) -> RepoResult<()> {
        let payload = serde_json::to_string(&next)?;
        if let Err(err) = self.kv.set(&self.key, &payload) {
            warn!(
                "event=notes_persist module=note_repo status=error count={} error={}",
                next.len(),
                err
            );
            return Err(err.into());
        }
        self.notes = next;
        Ok(())
    }
}

/// Decodes a stored payload, skipping anything that is not a valid note.
///
/// - Non-JSON or non-array payloads decode to an empty collection.
/// - Array elements that are not JSON objects or fail to decode are dropped.
/// - Later duplicates of an id are dropped.
pub(crate) fn decode_notes(payload: &str) -> Vec<Note> {
    let items = match serde_json::from_str::<serde_json::Value>(payload) {
        Ok(serde_json::Value::Array(items)) => items,
        Ok(_) => {
            warn!("event=notes_decode module=note_repo status=degraded reason=not_an_array");
            return Vec::new();
        }
        Err(err) => {
            warn!(
                "event=notes_decode module=note_repo status=degraded reason=invalid_json error={err}"
            );
            return Vec::new();
        }
    };

    let total = items.len();
    let mut seen = HashSet::new();
    let notes: Vec<Note> = items
        .into_iter()
        .filter(serde_json::Value::is_object)
        .filter_map(|item| serde_json::from_value::<Note>(item).ok())
        .map(Note::sanitize)
        .filter(|note| seen.insert(note.id.clone()))
        .collect();

    if notes.len() != total {
        warn!(
            "event=notes_decode module=note_repo status=degraded reason=skipped_entries skipped={}",
            total - notes.len()
        );
    }
    notes
}

#[cfg(test)]
mod tests {
    use super::decode_notes;

    #[test]
    fn decode_rejects_non_array_payloads() {
        assert!(decode_notes("not json").is_empty());
        assert!(decode_notes(r#"{"id":"a"}"#).is_empty());
        assert!(decode_notes("42").is_empty());
    }

    #[test]
    fn decode_skips_bad_entries_and_duplicate_ids() {
        let payload = r#"[
            {"id":"a","title":"A","content":"","tags":[],"createdAt":1,"updatedAt":2},
            {"id":"b","title":"B"},
            "junk",
            ["c","positional","",[],1,1],
            {"id":"a","title":"dup","content":"","tags":[],"createdAt":1,"updatedAt":9}
        ]"#;
        let notes = decode_notes(payload);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "A");
    }

    #[test]
    fn decode_reads_numeric_ids_and_null_fields() {
        let notes = decode_notes(
            r#"[{"id":1700000000000,"title":"Old","content":null,"tags":null,"createdAt":5,"updatedAt":5}]"#,
        );
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id.as_str(), "1700000000000");
        assert!(notes[0].content.is_empty());
        assert!(notes[0].tags.is_empty());
    }

    #[test]
    fn decode_defaults_missing_content_and_tags() {
        let notes = decode_notes(
            r#"[{"id":"1700000000000","title":"Legacy","createdAt":5,"updatedAt":5}]"#,
        );
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id.as_str(), "1700000000000");
        assert!(notes[0].content.is_empty());
        assert!(notes[0].tags.is_empty());
    }
}
