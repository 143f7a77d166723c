//! In-process store used by tests and ephemeral sessions.

use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use super::{KvStore, Writes};
use crate::error::{Result, StoreError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<String, Value>>> {
        self.entries.lock().map_err(|_| StoreError::Poisoned.into())
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn get_all(&self) -> Result<BTreeMap<String, Value>> {
        Ok(self.lock()?.clone())
    }

    fn set_many(&self, items: Writes) -> Result<()> {
        let mut entries = self.lock()?;
        for (key, value) in items {
            entries.insert(key, value);
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn update(
        &self,
        keys: &[&str],
        f: &mut dyn FnMut(&[Option<Value>]) -> Writes,
    ) -> Result<()> {
        let mut entries = self.lock()?;
        let current: Vec<Option<Value>> = keys.iter().map(|k| entries.get(*k).cloned()).collect();
        for (key, value) in f(&current) {
            entries.insert(key, value);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.get("k").unwrap().is_none());
        store.set("k", json!(3)).unwrap();
        assert_eq!(store.get("k").unwrap(), Some(json!(3)));
        store.remove("k").unwrap();
        assert!(store.get("k").unwrap().is_none());
    }

    #[test]
    fn update_sees_absent_keys_as_none() {
        let store = MemoryStore::new();
        store.set("a", json!(1)).unwrap();
        store
            .update(&["a", "b"], &mut |cur: &[Option<Value>]| {
                assert_eq!(cur[0], Some(json!(1)));
                assert_eq!(cur[1], None);
                vec![("b".into(), json!(2))]
            })
            .unwrap();
        assert_eq!(store.get_all().unwrap().len(), 2);
    }
}
