use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::focus::Visibility;
use crate::sites::SiteUsage;
use crate::timer::Phase;

/// Every state change in the core produces an Event.
/// The presentation port renders them; the CLI prints them as JSON lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    StopwatchStarted {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    StopwatchPaused {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    StopwatchReset {
        at: DateTime<Utc>,
    },
    /// Periodic read-only sample for re-rendering.
    StopwatchSample {
        running: bool,
        elapsed_secs: u64,
        display: String,
    },
    PomodoroStarted {
        phase: Phase,
        seconds_left: u64,
        at: DateTime<Utc>,
    },
    PomodoroPaused {
        phase: Phase,
        seconds_left: u64,
        at: DateTime<Utc>,
    },
    PomodoroReset {
        seconds_left: u64,
        at: DateTime<Utc>,
    },
    PomodoroTick {
        phase: Phase,
        seconds_left: u64,
        cycles: u32,
        running: bool,
        display: String,
    },
    PhaseChanged {
        from: Phase,
        to: Phase,
        cycles: u32,
        seconds_left: u64,
        at: DateTime<Utc>,
    },
    PomodoroConfigured {
        work_minutes: u32,
        break_minutes: u32,
        seconds_left: u64,
    },
    FocusModeChanged {
        focused: bool,
        visibility: Visibility,
        at: DateTime<Utc>,
    },
    BlocklistChanged {
        sites: Vec<String>,
    },
    TopicsChanged {
        topics: Vec<String>,
        active: String,
    },
    /// The focused host changed; `flushed_secs` went to `from`'s counter.
    SiteSwitched {
        from: String,
        to: String,
        flushed_secs: u64,
    },
    ScreenTimeSample {
        hostname: String,
        elapsed_secs: u64,
        display: String,
        usage: Vec<SiteUsage>,
    },
    SiteTimeReset {
        hostname: String,
    },
    PanelActivated {
        panel: String,
    },
    AllowRelayed {
        domain: String,
        minutes: f64,
    },
}
