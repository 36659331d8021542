use crate::clock::{Clock, SystemClock};
use crate::config::StorageKeys;
use crate::kv::KeyValueStore;
use crate::repo::note_repo::NoteRepository;
use crate::store::preference_store::PreferenceStore;
use crate::store::session_store::SessionStore;

/// The three stores a presentation layer works with.
pub struct AppState<'kv, S: KeyValueStore + ?Sized> {
    notes: NoteRepository<'kv, S>,
    preferences: PreferenceStore<'kv, S>,
    session: SessionStore<'kv, S>,
}

impl<'kv, S: KeyValueStore + ?Sized> AppState<'kv, S> {
    /// Builds all stores over `kv` and loads the note collection.
    pub fn open(kv: &'kv S, keys: &StorageKeys) -> Self {
        Self::open_with_clock(kv, keys, SystemClock)
    }

    /// Same as `open`, with an explicit clock for note timestamps.
    pub fn open_with_clock(kv: &'kv S, keys: &StorageKeys, clock: impl Clock + 'static) -> Self {
        let mut notes = NoteRepository::new(kv)
            .with_key(keys.notes.as_str())
            .with_clock(clock);
        notes.load();
        Self {
            notes,
            preferences: PreferenceStore::new(kv).with_key(keys.view_mode.as_str()),
            session: SessionStore::new(kv).with_key(keys.session.as_str()),
        }
    }

    pub fn notes(&self) -> &NoteRepository<'kv, S> {
        &self.notes
    }

    pub fn notes_mut(&mut self) -> &mut NoteRepository<'kv, S> {
        &mut self.notes
    }

    pub fn preferences(&self) -> &PreferenceStore<'kv, S> {
        &self.preferences
    }

    pub fn session(&self) -> &SessionStore<'kv, S> {
        &self.session
    }
}
