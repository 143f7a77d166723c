//! Active-tab query port.
//!
//! The core never talks to a browser. Whatever hosts it supplies the URL of
//! the focused tab through [`TabSource`]; failures there are absorbed and
//! read as "no current site".

use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::{CoreError, Result};

pub trait TabSource: Send + Sync {
    /// URL of the focused tab, `None` when there is none.
    fn active_tab_url(&self) -> Result<Option<String>>;
}

/// Query the tab source, downgrading failures to `None` with a warning.
pub fn current_tab_url(tabs: &dyn TabSource) -> Option<String> {
    match tabs.active_tab_url() {
        Ok(url) => url.filter(|u| !u.trim().is_empty()),
        Err(e) => {
            tracing::warn!(error = %e, "failed to get current tab");
            None
        }
    }
}

/// No browser attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTabs;

impl TabSource for NoTabs {
    fn active_tab_url(&self) -> Result<Option<String>> {
        Ok(None)
    }
}

/// A tab URL set by hand. Handy for tests and scripted sessions.
#[derive(Debug, Default)]
pub struct FixedTab {
    url: Mutex<Option<String>>,
}

impl FixedTab {
    pub fn new(url: Option<&str>) -> Self {
        Self {
            url: Mutex::new(url.map(str::to_string)),
        }
    }

    pub fn navigate(&self, url: Option<&str>) {
        if let Ok(mut cur) = self.url.lock() {
            *cur = url.map(str::to_string);
        }
    }
}

impl TabSource for FixedTab {
    fn active_tab_url(&self) -> Result<Option<String>> {
        let cur = self
            .url
            .lock()
            .map_err(|_| CoreError::collaborator("tab query", "lock poisoned"))?;
        Ok(cur.clone())
    }
}

/// Reads the active URL from the first line of a file on every query. An
/// external helper (browser native-messaging host, window watcher) keeps
/// the file current.
#[derive(Debug, Clone)]
pub struct FileTabSource {
    path: PathBuf,
}

impl FileTabSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TabSource for FileTabSource {
    fn active_tab_url(&self) -> Result<Option<String>> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            CoreError::collaborator("tab query", format!("{}: {e}", self.path.display()))
        })?;
        Ok(content
            .lines()
            .next()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string))
    }
}
