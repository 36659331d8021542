//! Session record store.
//!
//! Holds at most one self-asserted `Identity`. No credentials are involved.

use crate::config::DEFAULT_SESSION_KEY;
use crate::kv::{read_or_absent, KeyValueStore, KvResult};
use crate::model::identity::Identity;
use log::{info, warn};
use serde_json::Value;

/// Persists the optional identity as JSON `{email, name?}`.
pub struct SessionStore<'kv, S: KeyValueStore + ?Sized> {
    kv: &'kv S,
    key: String,
}

impl<'kv, S: KeyValueStore + ?Sized> SessionStore<'kv, S> {
    pub fn new(kv: &'kv S) -> Self {
        Self {
            kv,
            key: DEFAULT_SESSION_KEY.to_string(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Stored identity; `None` when absent, malformed, or missing an email.
    ///
    /// Only a JSON object is a valid record.
    pub fn load(&self) -> Option<Identity> {
        let payload = read_or_absent(self.kv, &self.key, "session_store")?;
        let record = match serde_json::from_str::<Value>(&payload) {
            Ok(record @ Value::Object(_)) => record,
            Ok(_) => {
                warn!("event=session_load module=session_store status=degraded reason=not_an_object");
                return None;
            }
            Err(err) => {
                warn!(
                    "event=session_load module=session_store status=degraded reason=invalid_json error={err}"
                );
                return None;
            }
        };
        match serde_json::from_value::<Identity>(record) {
            Ok(identity) if identity.is_present() => Some(identity),
            Ok(_) => {
                warn!("event=session_load module=session_store status=degraded reason=blank_email");
                None
            }
            Err(err) => {
                warn!(
                    "event=session_load module=session_store status=degraded reason=invalid_record error={err}"
                );
                None
            }
        }
    }

    /// Writes `identity`, or removes the record when `None` or blank.
    pub fn save(&self, identity: Option<&Identity>) -> KvResult<()> {
        match identity.filter(|identity| identity.is_present()) {
            Some(identity) => {
                self.kv.set(&self.key, &identity.to_json())?;
                info!(
                    "event=session_save module=session_store status=ok has_name={}",
                    identity.name.is_some()
                );
            }
            None => {
                self.kv.remove(&self.key)?;
                info!("event=session_clear module=session_store status=ok");
            }
        }
        Ok(())
    }

    pub fn clear(&self) -> KvResult<()> {
        self.save(None)
    }
}

#[cfg(test)]
mod tests {
    use super::SessionStore;
    use crate::kv::{KeyValueStore, MemoryKvStore};
    use crate::model::identity::Identity;

    #[test]
    fn blank_identity_is_treated_as_logout() {
        let kv = MemoryKvStore::new();
        let store = SessionStore::new(&kv).with_key("session");
        kv.set("session", r#"{"email":"a@b.c"}"#).unwrap();

        let blank = Identity {
            email: "  ".to_string(),
            name: None,
        };
        store.save(Some(&blank)).unwrap();
        assert_eq!(kv.get("session").unwrap(), None);
    }

    #[test]
    fn positional_array_record_loads_as_absent() {
        let kv = MemoryKvStore::new();
        let store = SessionStore::new(&kv).with_key("session");
        kv.set("session", r#"["a@b.c","Ann"]"#).unwrap();
        assert_eq!(store.load(), None);

        kv.set("session", r#"{"email":"a@b.c","name":"Ann"}"#).unwrap();
        assert_eq!(store.load(), Identity::new("a@b.c", Some("Ann")));
    }

    #[test]
    fn stored_blank_email_loads_as_absent() {
        let kv = MemoryKvStore::new();
        let store = SessionStore::new(&kv).with_key("session");
        kv.set("session", r#"{"email":"","name":"Ann"}"#).unwrap();
        assert_eq!(store.load(), None);
    }
}
