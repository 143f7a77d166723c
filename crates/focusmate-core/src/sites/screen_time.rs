//! Per-host screen time.
//!
//! [`SiteTracker`] polls the focused tab's hostname. When it changes, the
//! whole seconds spent on the previous host are added to that host's
//! `screentime_<host>` counter and the interval restarts for the new host.
//! The last open interval is flushed on teardown.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::normalize::tab_hostname;
use crate::error::Result;
use crate::events::Event;
use crate::format::format_hms;
use crate::store::{keys, slot, KvStore, StoreExt};
use crate::tabs::{current_tab_url, TabSource};

pub const DEFAULT_TOP_N: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteUsage {
    pub hostname: String,
    pub seconds: u64,
    pub display: String,
}

/// Stored seconds for one host, 0 when absent.
pub fn site_time(store: &dyn KvStore, hostname: &str) -> Result<u64> {
    if hostname.is_empty() {
        return Ok(0);
    }
    store.get_or_default(&keys::screen_time(hostname))
}

/// Add seconds to a host's counter in one serialized read-modify-write.
/// Empty hosts and zero-length intervals are skipped.
pub fn add_site_time(store: &dyn KvStore, hostname: &str, seconds: u64) -> Result<u64> {
    if hostname.is_empty() || seconds == 0 {
        return site_time(store, hostname);
    }
    let key = keys::screen_time(hostname);
    let mut total = 0;
    store.update(&[key.as_str()], &mut |cur: &[Option<Value>]| {
        let existing: u64 = slot(&key, &cur[0]);
        total = existing.saturating_add(seconds);
        vec![(key.clone(), Value::from(total))]
    })?;
    Ok(total)
}

/// Zero a host's counter.
pub fn reset_site_time(store: &dyn KvStore, hostname: &str) -> Result<Option<Event>> {
    if hostname.is_empty() {
        return Ok(None);
    }
    store.put(&keys::screen_time(hostname), &0u64)?;
    Ok(Some(Event::SiteTimeReset {
        hostname: hostname.to_string(),
    }))
}

/// Hosts with recorded time, most time first, at most `limit` entries.
pub fn usage_ranking(store: &dyn KvStore, limit: usize) -> Result<Vec<SiteUsage>> {
    let mut usage: Vec<SiteUsage> = store
        .get_all()?
        .into_iter()
        .filter_map(|(key, value)| {
            let hostname = key.strip_prefix(keys::SCREEN_TIME_PREFIX)?;
            let seconds = value.as_u64().filter(|s| *s > 0)?;
            Some(SiteUsage {
                hostname: hostname.to_string(),
                seconds,
                display: format_hms(seconds),
            })
        })
        .collect();
    usage.sort_by(|a, b| {
        b.seconds
            .cmp(&a.seconds)
            .then_with(|| a.hostname.cmp(&b.hostname))
    });
    usage.truncate(limit);
    Ok(usage)
}

/// Live interval bookkeeping for the focused host. In memory only.
#[derive(Debug, Clone)]
pub struct SiteTracker {
    current: String,
    started_ms: u64,
    top_n: usize,
}

impl SiteTracker {
    pub fn new(now_ms: u64, top_n: usize) -> Self {
        Self {
            current: String::new(),
            started_ms: now_ms,
            top_n,
        }
    }

    pub fn current_hostname(&self) -> &str {
        &self.current
    }

    /// Whole seconds on the current host so far.
    pub fn current_elapsed_secs(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.started_ms) / 1000
    }

    /// Feed the latest observed hostname (empty for none). Returns the
    /// switch event when the host changed.
    pub fn observe(
        &mut self,
        store: &dyn KvStore,
        hostname: &str,
        now_ms: u64,
    ) -> Result<Option<Event>> {
        if hostname == self.current {
            return Ok(None);
        }
        let flushed_secs = self.current_elapsed_secs(now_ms);
        let from = std::mem::replace(&mut self.current, hostname.to_string());
        self.started_ms = now_ms;
        // State moves to the new host before the write so a failed write
        // does not re-flush the same interval on the next poll.
        add_site_time(store, &from, flushed_secs)?;
        tracing::debug!(from = %from, to = hostname, flushed_secs, "site switched");
        Ok(Some(Event::SiteSwitched {
            from,
            to: hostname.to_string(),
            flushed_secs,
        }))
    }

    /// One poll: query the tab, handle a host change, and build the sample
    /// for rendering.
    pub fn poll(
        &mut self,
        store: &dyn KvStore,
        tabs: &dyn TabSource,
        now_ms: u64,
    ) -> Result<Vec<Event>> {
        let hostname = current_tab_url(tabs)
            .and_then(|url| tab_hostname(&url))
            .unwrap_or_default();
        let mut events = Vec::new();
        if let Some(switch) = self.observe(store, &hostname, now_ms)? {
            events.push(switch);
        }
        events.push(self.sample(store, now_ms)?);
        Ok(events)
    }

    pub fn sample(&self, store: &dyn KvStore, now_ms: u64) -> Result<Event> {
        let elapsed_secs = if self.current.is_empty() {
            0
        } else {
            self.current_elapsed_secs(now_ms)
        };
        Ok(Event::ScreenTimeSample {
            hostname: self.current.clone(),
            elapsed_secs,
            display: format_hms(elapsed_secs),
            usage: usage_ranking(store, self.top_n)?,
        })
    }

    /// Zero the current host's counter and restart its live interval.
    pub fn reset_current(&mut self, store: &dyn KvStore, now_ms: u64) -> Result<Option<Event>> {
        if self.current.is_empty() {
            return Ok(None);
        }
        let event = reset_site_time(store, &self.current)?;
        self.started_ms = now_ms;
        Ok(event)
    }

    /// Flush the open interval. Called on teardown; the tracker keeps the
    /// host but restarts its interval, so a second flush adds nothing.
    pub fn flush(&mut self, store: &dyn KvStore, now_ms: u64) -> Result<u64> {
        let secs = self.current_elapsed_secs(now_ms);
        self.started_ms = now_ms;
        if self.current.is_empty() || secs == 0 {
            return Ok(0);
        }
        add_site_time(store, &self.current, secs)?;
        tracing::debug!(hostname = %self.current, secs, "flushed screen time");
        Ok(secs)
    }
}
