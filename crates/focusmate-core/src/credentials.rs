//! API key field from the options page.
//!
//! Stored as plain text under `focusmate_api_key`. Masking is display-only.

use crate::error::{Result, ValidationError};
use crate::store::{keys, KvStore, StoreExt};

pub fn load_api_key(store: &dyn KvStore) -> Result<Option<String>> {
    let key: String = store.get_or_default(keys::API_KEY)?;
    Ok(Some(key).filter(|k| !k.is_empty()))
}

/// Trim and store. Blank input is rejected.
pub fn save_api_key(store: &dyn KvStore, input: &str) -> Result<()> {
    let key = input.trim();
    if key.is_empty() {
        return Err(ValidationError::EmptyInput("API key".into()).into());
    }
    store.put(keys::API_KEY, key)
}

pub fn clear_api_key(store: &dyn KvStore) -> Result<()> {
    store.remove(keys::API_KEY)
}

/// The key as shown in the field: every character masked unless revealed.
pub fn display_api_key(key: &str, reveal: bool) -> String {
    if reveal {
        key.to_string()
    } else {
        "•".repeat(key.chars().count())
    }
}
