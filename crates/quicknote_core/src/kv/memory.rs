use super::{KeyValueStore, KvResult};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// In-memory key-value store.
///
/// Single-threaded by construction (`RefCell`), matching the synchronous
/// single-owner model of the stores built on top of it.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> KvResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> KvResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryKvStore;
    use crate::kv::KeyValueStore;

    #[test]
    fn missing_key_reads_as_none() {
        let kv = MemoryKvStore::new();
        assert_eq!(kv.get("absent").unwrap(), None);
        kv.remove("absent").unwrap();
        assert!(kv.is_empty());
    }

    #[test]
    fn set_replaces_previous_value() {
        let kv = MemoryKvStore::new();
        kv.set("k", "one").unwrap();
        kv.set("k", "two").unwrap();
        assert_eq!(kv.get("k").unwrap().as_deref(), Some("two"));
        assert_eq!(kv.len(), 1);
    }
}
