//! Last-viewed UI section. Purely presentational.

use crate::error::Result;
use crate::events::Event;
use crate::store::{keys, KvStore, StoreExt};

pub const DEFAULT_PANEL: &str = "panel-timer";

pub fn active_panel(store: &dyn KvStore) -> Result<String> {
    let panel: String = store.get_or_default(keys::ACTIVE_PANEL)?;
    if panel.is_empty() {
        Ok(DEFAULT_PANEL.to_string())
    } else {
        Ok(panel)
    }
}

pub fn activate_panel(store: &dyn KvStore, id: &str) -> Result<Option<Event>> {
    let id = id.trim();
    if id.is_empty() {
        return Ok(None);
    }
    store.put(keys::ACTIVE_PANEL, id)?;
    Ok(Some(Event::PanelActivated {
        panel: id.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn defaults_to_timer_panel() {
        let store = MemoryStore::new();
        assert_eq!(active_panel(&store).unwrap(), "panel-timer");
    }

    #[test]
    fn activation_persists() {
        let store = MemoryStore::new();
        activate_panel(&store, "panel-sites").unwrap();
        assert_eq!(active_panel(&store).unwrap(), "panel-sites");
        assert!(activate_panel(&store, " ").unwrap().is_none());
        assert_eq!(active_panel(&store).unwrap(), "panel-sites");
    }
}
