//! View mode preference store.

use crate::config::DEFAULT_VIEW_MODE_KEY;
use crate::kv::{read_or_absent, KeyValueStore, KvResult};
use crate::model::view_mode::ViewMode;
use log::{info, warn};

/// Persists the single `ViewMode` value as its literal string.
pub struct PreferenceStore<'kv, S: KeyValueStore + ?Sized> {
    kv: &'kv S,
    key: String,
}

impl<'kv, S: KeyValueStore + ?Sized> PreferenceStore<'kv, S> {
    pub fn new(kv: &'kv S) -> Self {
        Self {
            kv,
            key: DEFAULT_VIEW_MODE_KEY.to_string(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Stored mode, or `ViewMode::Grid` when absent or invalid.
    pub fn load(&self) -> ViewMode {
        let Some(value) = read_or_absent(self.kv, &self.key, "preference_store") else {
            return ViewMode::default();
        };
        ViewMode::parse(&value).unwrap_or_else(|| {
            warn!(
                "event=view_mode_load module=preference_store status=degraded reason=invalid_literal"
            );
            ViewMode::default()
        })
    }

    pub fn save(&self, mode: ViewMode) -> KvResult<()> {
        self.kv.set(&self.key, mode.as_str())?;
        info!("event=view_mode_save module=preference_store status=ok mode={mode}");
        Ok(())
    }
}
