//! Focus mode gate.
//!
//! One persisted flag, `focusmate_break_mode`. `false` (or absent) means
//! focused: blocking is intended to be active and the main content is
//! expanded. The flag is always read from the store, never cached.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::events::Event;
use crate::store::{keys, slot, KvStore, StoreExt};

/// Presentation effect of the focus flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Expanded,
    Collapsed,
}

impl Visibility {
    pub fn for_focus(is_on: bool) -> Self {
        if is_on {
            Visibility::Expanded
        } else {
            Visibility::Collapsed
        }
    }
}

/// Whether focus mode is on.
pub fn is_focus_mode(store: &dyn KvStore) -> Result<bool> {
    let break_mode: bool = store.get_or_default(keys::BREAK_MODE)?;
    Ok(!break_mode)
}

pub fn set_focus_mode(store: &dyn KvStore, is_on: bool) -> Result<Event> {
    store.put(keys::BREAK_MODE, &!is_on)?;
    tracing::debug!(focused = is_on, "focus mode set");
    Ok(changed(is_on))
}

/// Flip the persisted flag in one serialized read-modify-write.
pub fn toggle_focus_mode(store: &dyn KvStore) -> Result<Event> {
    let mut now_on = true;
    store.update(&[keys::BREAK_MODE], &mut |cur: &[Option<Value>]| {
        let break_mode: bool = slot(keys::BREAK_MODE, &cur[0]);
        // Currently focused iff !break_mode; the toggle lands on the opposite.
        now_on = break_mode;
        vec![(keys::BREAK_MODE.to_string(), Value::Bool(!now_on))]
    })?;
    tracing::debug!(focused = now_on, "focus mode toggled");
    Ok(changed(now_on))
}

/// Current state as an event, for the initial render.
pub fn focus_snapshot(store: &dyn KvStore) -> Result<Event> {
    Ok(changed(is_focus_mode(store)?))
}

fn changed(is_on: bool) -> Event {
    Event::FocusModeChanged {
        focused: is_on,
        visibility: Visibility::for_focus(is_on),
        at: Utc::now(),
    }
}
