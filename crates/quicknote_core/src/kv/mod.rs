//! Key-value store adapter.
//!
//! # Responsibility
//! - Define the synchronous get/set/remove contract every store sits on.
//! - Provide in-memory and SQLite-backed implementations.
//!
//! # Invariants
//! - `get` on a missing key returns `Ok(None)`, never an error.
//! - `remove` on a missing key succeeds.
//! - Values are opaque strings; decoding is the caller's concern.

use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;

pub type KvResult<T> = Result<T, KvError>;

/// Failure of the backing store, including opening and migrating it.
#[derive(Debug)]
pub enum KvError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "missing required table `{table}`")
            }
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// String-keyed, string-valued persistent storage.
pub trait KeyValueStore {
    /// Returns the stored value, or `None` when the key is absent.
    fn get(&self, key: &str) -> KvResult<Option<String>>;
    /// Inserts or replaces the value for `key`.
    fn set(&self, key: &str, value: &str) -> KvResult<()>;
    /// Removes `key` if present.
    fn remove(&self, key: &str) -> KvResult<()>;
}

/// Reads `key`, degrading transport failures to `None`.
///
/// Store readers share this policy: a value that cannot be read is treated
/// exactly like a value that was never written.
pub(crate) fn read_or_absent<S>(kv: &S, key: &str, module: &'static str) -> Option<String>
where
    S: KeyValueStore + ?Sized,
{
    match kv.get(key) {
        Ok(value) => value,
        Err(err) => {
            warn!(
                "event=kv_read module={module} status=degraded key={key} error={err}"
            );
            None
        }
    }
}
