//! User-defined focus topics.
//!
//! An ordered unique list under `focusmate_topics` plus the active one under
//! `focusmate_topic`. The active topic is either empty or a list member.

use indexmap::IndexSet;
use serde_json::Value;

use crate::error::Result;
use crate::events::Event;
use crate::store::{keys, slot, KvStore, StoreExt};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Topics {
    pub topics: Vec<String>,
    pub active: String,
}

impl Topics {
    fn event(self) -> Event {
        Event::TopicsChanged {
            topics: self.topics,
            active: self.active,
        }
    }
}

pub fn topics(store: &dyn KvStore) -> Result<Topics> {
    let list: IndexSet<String> = store.get_or_default(keys::TOPICS)?;
    let active: String = store.get_or_default(keys::ACTIVE_TOPIC)?;
    Ok(Topics {
        topics: list.into_iter().collect(),
        active,
    })
}

/// Add a topic and make it active. Blank input is ignored.
pub fn add_topic(store: &dyn KvStore, topic: &str) -> Result<Option<Event>> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Ok(None);
    }
    let mut result = Topics::default();
    store.update(&[keys::TOPICS], &mut |cur: &[Option<Value>]| {
        let mut list: IndexSet<String> = slot(keys::TOPICS, &cur[0]);
        list.insert(topic.to_string());
        result = Topics {
            topics: list.into_iter().collect(),
            active: topic.to_string(),
        };
        writes(&result)
    })?;
    Ok(Some(result.event()))
}

/// Remove a topic. Removing the active one promotes the first remaining
/// topic (or clears it); list and active value are written together.
pub fn remove_topic(store: &dyn KvStore, topic: &str) -> Result<Event> {
    let topic = topic.trim();
    let mut result = Topics::default();
    store.update(&[keys::TOPICS, keys::ACTIVE_TOPIC], &mut |cur: &[Option<Value>]| {
        let mut list: IndexSet<String> = slot(keys::TOPICS, &cur[0]);
        let active: String = slot(keys::ACTIVE_TOPIC, &cur[1]);
        list.shift_remove(topic);
        let active = if active == topic {
            list.first().cloned().unwrap_or_default()
        } else {
            active
        };
        result = Topics {
            topics: list.into_iter().collect(),
            active,
        };
        writes(&result)
    })?;
    tracing::debug!(removed = topic, active = %result.active, "topic removed");
    Ok(result.event())
}

/// Make an existing topic active. Topics not in the list are ignored.
pub fn select_topic(store: &dyn KvStore, topic: &str) -> Result<Option<Event>> {
    let topic = topic.trim();
    let mut result = None;
    store.update(&[keys::TOPICS], &mut |cur: &[Option<Value>]| {
        let list: IndexSet<String> = slot(keys::TOPICS, &cur[0]);
        if !list.contains(topic) {
            return Vec::new();
        }
        result = Some(Topics {
            topics: list.into_iter().collect(),
            active: topic.to_string(),
        });
        vec![(keys::ACTIVE_TOPIC.to_string(), Value::String(topic.to_string()))]
    })?;
    if result.is_none() {
        tracing::debug!(topic, "ignoring selection of unknown topic");
    }
    Ok(result.map(Topics::event))
}

fn writes(t: &Topics) -> Vec<(String, Value)> {
    vec![
        (
            keys::TOPICS.to_string(),
            Value::Array(t.topics.iter().cloned().map(Value::String).collect()),
        ),
        (keys::ACTIVE_TOPIC.to_string(), Value::String(t.active.clone())),
    ]
}
