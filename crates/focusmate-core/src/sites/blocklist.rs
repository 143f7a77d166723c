//! Persisted blocklist of normalized hostnames.
//!
//! Stored under `focusmate_blocklist` as a JSON array with set semantics.
//! Insertion order is kept. Only the data lives here; enforcement belongs
//! to whatever intercepts navigation.

use indexmap::IndexSet;
use serde_json::Value;

use super::normalize::{blockable_hostname, normalize_domain};
use crate::error::Result;
use crate::events::Event;
use crate::store::{keys, slot, KvStore, StoreExt};
use crate::tabs::{current_tab_url, TabSource};

/// One-click suggestions offered next to the manual input.
pub const RECOMMENDED_SITES: &[&str] = &[
    "youtube.com",
    "reddit.com",
    "x.com",
    "twitter.com",
    "facebook.com",
    "instagram.com",
    "tiktok.com",
    "netflix.com",
];

pub fn blocklist(store: &dyn KvStore) -> Result<Vec<String>> {
    let set: IndexSet<String> = store.get_or_default(keys::BLOCKLIST)?;
    Ok(set.into_iter().collect())
}

/// Exact match against a normalized host. Subdomains are distinct entries.
pub fn is_blocked(store: &dyn KvStore, host: &str) -> Result<bool> {
    let host = normalize_domain(host);
    if host.is_empty() {
        return Ok(false);
    }
    let set: IndexSet<String> = store.get_or_default(keys::BLOCKLIST)?;
    Ok(set.contains(&host))
}

/// Add comma-separated user input. Entries that normalize to nothing are
/// dropped; `None` when the whole input was empty.
pub fn add_to_blocklist(store: &dyn KvStore, input: &str) -> Result<Option<Event>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    let hosts: Vec<String> = input
        .split(',')
        .map(normalize_domain)
        .filter(|h| !h.is_empty())
        .collect();
    if hosts.is_empty() {
        return Ok(None);
    }
    let sites = union(store, &hosts)?;
    Ok(Some(Event::BlocklistChanged { sites }))
}

/// Remove an exact stored entry. Unknown entries leave the list as is.
pub fn remove_from_blocklist(store: &dyn KvStore, site: &str) -> Result<Event> {
    let mut sites = Vec::new();
    store.update(&[keys::BLOCKLIST], &mut |cur: &[Option<Value>]| {
        let mut set: IndexSet<String> = slot(keys::BLOCKLIST, &cur[0]);
        set.shift_remove(site);
        sites = set.into_iter().collect();
        vec![(keys::BLOCKLIST.to_string(), to_json(&sites))]
    })?;
    Ok(Event::BlocklistChanged { sites })
}

/// Block the host of the focused tab. Internal pages, local files and
/// missing tabs are a silent no-op.
pub fn block_current_tab(store: &dyn KvStore, tabs: &dyn TabSource) -> Result<Option<Event>> {
    let Some(url) = current_tab_url(tabs) else {
        return Ok(None);
    };
    let Some(host) = blockable_hostname(&url) else {
        tracing::debug!(url = %url, "current tab is not blockable");
        return Ok(None);
    };
    let sites = union(store, &[host])?;
    Ok(Some(Event::BlocklistChanged { sites }))
}

/// Add one of the suggested sites. `None` if it is already listed or
/// normalizes to nothing.
pub fn add_recommended(store: &dyn KvStore, site: &str) -> Result<Option<Event>> {
    let site = normalize_domain(site);
    if site.is_empty() {
        return Ok(None);
    }
    let mut added = None;
    store.update(&[keys::BLOCKLIST], &mut |cur: &[Option<Value>]| {
        let mut set: IndexSet<String> = slot(keys::BLOCKLIST, &cur[0]);
        if !set.insert(site.clone()) {
            return Vec::new();
        }
        let sites: Vec<String> = set.into_iter().collect();
        let value = to_json(&sites);
        added = Some(sites);
        vec![(keys::BLOCKLIST.to_string(), value)]
    })?;
    Ok(added.map(|sites| Event::BlocklistChanged { sites }))
}

fn union(store: &dyn KvStore, hosts: &[String]) -> Result<Vec<String>> {
    let mut sites = Vec::new();
    store.update(&[keys::BLOCKLIST], &mut |cur: &[Option<Value>]| {
        let mut set: IndexSet<String> = slot(keys::BLOCKLIST, &cur[0]);
        set.extend(hosts.iter().cloned());
        sites = set.into_iter().collect();
        vec![(keys::BLOCKLIST.to_string(), to_json(&sites))]
    })?;
    tracing::debug!(count = sites.len(), "blocklist updated");
    Ok(sites)
}

fn to_json(sites: &[String]) -> Value {
    Value::Array(sites.iter().cloned().map(Value::String).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::tabs::{FixedTab, NoTabs};
    use serde_json::json;

    #[test]
    fn adding_twice_keeps_one_entry() {
        let store = MemoryStore::new();
        add_to_blocklist(&store, "https://www.example.com/a").unwrap();
        add_to_blocklist(&store, "example.com").unwrap();
        assert_eq!(blocklist(&store).unwrap(), vec!["example.com"]);
        assert_eq!(store.get(keys::BLOCKLIST).unwrap(), Some(json!(["example.com"])));
    }

    #[test]
    fn comma_separated_input() {
        let store = MemoryStore::new();
        let event = add_to_blocklist(&store, "reddit.com, www.youtube.com/feed ,, x.com").unwrap();
        assert!(matches!(event, Some(Event::BlocklistChanged { ref sites }) if sites.len() == 3));
        assert_eq!(blocklist(&store).unwrap(), vec!["reddit.com", "youtube.com", "x.com"]);
    }

    #[test]
    fn empty_input_is_ignored() {
        let store = MemoryStore::new();
        assert!(add_to_blocklist(&store, "   ").unwrap().is_none());
        assert!(add_to_blocklist(&store, " , ,").unwrap().is_none());
        assert!(store.get(keys::BLOCKLIST).unwrap().is_none());
    }

    #[test]
    fn remove_exact_match_only() {
        let store = MemoryStore::new();
        add_to_blocklist(&store, "a.com,b.com").unwrap();
        remove_from_blocklist(&store, "www.a.com").unwrap();
        assert_eq!(blocklist(&store).unwrap(), vec!["a.com", "b.com"]);
        remove_from_blocklist(&store, "a.com").unwrap();
        assert_eq!(blocklist(&store).unwrap(), vec!["b.com"]);
    }

    #[test]
    fn block_current_tab_adds_host() {
        let store = MemoryStore::new();
        let tab = FixedTab::new(Some("https://www.news.ycombinator.com/item?id=1"));
        assert!(block_current_tab(&store, &tab).unwrap().is_some());
        assert!(is_blocked(&store, "news.ycombinator.com").unwrap());
    }

    #[test]
    fn block_current_tab_ignores_internal_pages() {
        let store = MemoryStore::new();
        let tab = FixedTab::new(Some("chrome://settings"));
        assert!(block_current_tab(&store, &tab).unwrap().is_none());
        assert!(block_current_tab(&store, &NoTabs).unwrap().is_none());
        assert!(blocklist(&store).unwrap().is_empty());
    }

    #[test]
    fn recommended_only_adds_once() {
        let store = MemoryStore::new();
        assert!(add_recommended(&store, "reddit.com").unwrap().is_some());
        assert!(add_recommended(&store, "reddit.com").unwrap().is_none());
        assert_eq!(blocklist(&store).unwrap(), vec!["reddit.com"]);
    }

    #[test]
    fn recommended_input_is_normalized() {
        let store = MemoryStore::new();
        assert!(add_recommended(&store, "https://WWW.Reddit.com/r/all").unwrap().is_some());
        assert!(add_recommended(&store, "reddit.com").unwrap().is_none());
        assert!(add_recommended(&store, "   ").unwrap().is_none());
        assert_eq!(blocklist(&store).unwrap(), vec!["reddit.com"]);
    }

    #[test]
    fn duplicate_entries_in_storage_are_absorbed() {
        let store = MemoryStore::new();
        store.set(keys::BLOCKLIST, json!(["a.com", "a.com", "b.com"])).unwrap();
        assert_eq!(blocklist(&store).unwrap(), vec!["a.com", "b.com"]);
    }
}
