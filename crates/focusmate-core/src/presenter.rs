//! Presentation port.
//!
//! The core holds no rendering logic. After each transition it hands the
//! resulting [`Event`] to a [`Presenter`].

use crate::events::Event;

pub trait Presenter: Send {
    fn render(&mut self, event: &Event);
}

/// Discards everything.
#[derive(Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn render(&mut self, _event: &Event) {}
}

/// Keeps every rendered event, in order.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    events: std::sync::Arc<std::sync::Mutex<Vec<Event>>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle that stays readable after the presenter has been moved into
    /// a session.
    pub fn handle(&self) -> EventLog {
        EventLog {
            events: self.events.clone(),
        }
    }
}

impl Presenter for RecordingPresenter {
    fn render(&mut self, event: &Event) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventLog {
    events: std::sync::Arc<std::sync::Mutex<Vec<Event>>>,
}

impl EventLog {
    pub fn snapshot(&self) -> Vec<Event> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
