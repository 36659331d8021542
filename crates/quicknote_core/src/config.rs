//! Storage layout configuration.
//!
//! # Responsibility
//! - Name the three key-value keys the stores use.
//! - Derive on-disk paths (database file, log directory) from one data dir.

use std::path::{Path, PathBuf};

pub const DEFAULT_NOTES_KEY: &str = "quicknote.notes";
pub const DEFAULT_SESSION_KEY: &str = "quicknote.session";
pub const DEFAULT_VIEW_MODE_KEY: &str = "quicknote.view_mode";

const DB_FILE_NAME: &str = "quicknote.sqlite3";
const LOG_DIR_NAME: &str = "logs";

/// Key names for the persisted state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub notes: String,
    pub session: String,
    pub view_mode: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            notes: DEFAULT_NOTES_KEY.to_string(),
            session: DEFAULT_SESSION_KEY.to_string(),
            view_mode: DEFAULT_VIEW_MODE_KEY.to_string(),
        }
    }
}

impl StorageKeys {
    /// Keys under a custom prefix, e.g. one namespace per profile.
    pub fn with_prefix(prefix: &str) -> Self {
        let prefix = prefix.trim().trim_end_matches('.');
        Self {
            notes: format!("{prefix}.notes"),
            session: format!("{prefix}.session"),
            view_mode: format!("{prefix}.view_mode"),
        }
    }
}

/// Root directory holding the database and logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn db_path(&self) -> PathBuf {
        self.root.join(DB_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.root.join(LOG_DIR_NAME)
    }

    /// Creates the root directory if missing.
    pub fn ensure_exists(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)
    }
}
