//! Flat key-value persistence.
//!
//! Every persisted entity lives under one string key holding a JSON value.
//! Absent keys mean "default"; nothing is created eagerly and there is no
//! schema versioning.
//!
//! Writes are serialized per store instance: every read-modify-write in
//! this crate goes through [`KvStore::update`], which holds the store's
//! write lock for the whole read, transform and write sequence.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::Result;

/// Persisted key names. Kept byte-compatible with data written by the
/// browser extension.
pub mod keys {
    pub const API_KEY: &str = "focusmate_api_key";
    pub const TOPICS: &str = "focusmate_topics";
    pub const ACTIVE_TOPIC: &str = "focusmate_topic";
    pub const BLOCKLIST: &str = "focusmate_blocklist";
    pub const BREAK_MODE: &str = "focusmate_break_mode";
    pub const ACTIVE_PANEL: &str = "focusmate_active_panel";
    pub const SCREEN_TIME_PREFIX: &str = "screentime_";

    /// Counter key for one hostname.
    pub fn screen_time(hostname: &str) -> String {
        format!("{SCREEN_TIME_PREFIX}{hostname}")
    }
}

/// Entries produced by an [`KvStore::update`] closure.
pub type Writes = Vec<(String, Value)>;

/// Key-value store with JSON values.
pub trait KvStore: Send + Sync {
    /// Read one key.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Read the full mapping.
    fn get_all(&self) -> Result<BTreeMap<String, Value>>;

    /// Write several keys as one unit.
    fn set_many(&self, items: Writes) -> Result<()>;

    /// Delete a key. Deleting an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Read `keys`, hand their current values to `f` (in the same order,
    /// `None` when absent) and write whatever `f` returns, all under the
    /// store's write lock.
    fn update(
        &self,
        keys: &[&str],
        f: &mut dyn FnMut(&[Option<Value>]) -> Writes,
    ) -> Result<()>;

    fn set(&self, key: &str, value: Value) -> Result<()> {
        self.set_many(vec![(key.to_string(), value)])
    }
}

/// Typed helpers over any [`KvStore`].
pub trait StoreExt: KvStore {
    /// Read and decode a key, falling back to `T::default()` when the key is
    /// absent or holds a value of the wrong shape.
    fn get_or_default<T>(&self, key: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        Ok(self
            .get(key)?
            .map(|v| decode_or_default(key, v))
            .unwrap_or_default())
    }

    /// Encode and write a single key.
    fn put<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        self.set(key, serde_json::to_value(value)?)
    }
}

impl<S: KvStore + ?Sized> StoreExt for S {}

/// Lenient decode used everywhere a stored value is read: a malformed value
/// is treated as absent.
pub fn decode_or_default<T>(key: &str, value: Value) -> T
where
    T: DeserializeOwned + Default,
{
    if value.is_null() {
        return T::default();
    }
    match serde_json::from_value(value) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(key, error = %e, "ignoring malformed stored value");
            T::default()
        }
    }
}

/// Decode an optional slot handed to an `update` closure.
pub fn slot<T>(key: &str, value: &Option<Value>) -> T
where
    T: DeserializeOwned + Default,
{
    value
        .clone()
        .map(|v| decode_or_default(key, v))
        .unwrap_or_default()
}

/// Where the data directory lives, without touching the filesystem.
///
/// `FOCUSMATE_HOME` wins when set. Otherwise `~/.config/focusmate`, or
/// `~/.config/focusmate-dev` with `FOCUSMATE_ENV=dev`.
pub fn data_dir_path() -> PathBuf {
    match std::env::var_os("FOCUSMATE_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("FOCUSMATE_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("focusmate-dev")
            } else {
                base_dir.join("focusmate")
            }
        }
    }
}

/// Returns the data directory, creating it if needed.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = data_dir_path();
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
