//! Core domain logic for QuickNote.
//! This crate is the single source of truth for note invariants.

pub mod clock;
pub mod config;
pub mod db;
pub mod kv;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{DataDir, StorageKeys};
pub use kv::{KeyValueStore, KvError, KvResult, MemoryKvStore, SqliteKvStore};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::identity::Identity;
pub use model::note::{Note, NoteId, NoteInput, DEFAULT_TITLE};
pub use model::view_mode::ViewMode;
pub use repo::note_repo::{NoteRepository, RepoError, RepoResult};
pub use search::query::{distinct_tags, query_notes, NoteQuery};
pub use service::app_state::AppState;
pub use store::preference_store::PreferenceStore;
pub use store::session_store::SessionStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
