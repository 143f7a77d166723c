//! Work/Break countdown.
//!
//! Tick-driven: every effective tick removes exactly one second. The caller
//! may keep ticking while the cycle is paused; those ticks change nothing.
//!
//! ## State Transitions
//!
//! ```text
//! Work --(seconds_left hits 0, cycles += 1)--> Break
//! Break --(seconds_left hits 0)--> Work
//! ```
//!
//! Duration changes re-arm the countdown only when paused and in the phase
//! they belong to. Otherwise they wait for the next transition into that
//! phase.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::format::format_mmss;

pub const DEFAULT_WORK_MINUTES: u32 = 25;
pub const DEFAULT_BREAK_MINUTES: u32 = 5;
pub const WORK_MINUTES_MAX: u32 = 180;
pub const BREAK_MINUTES_MAX: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Break,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PomodoroCycle {
    phase: Phase,
    seconds_left: u64,
    /// Completed work phases this session.
    cycles: u32,
    running: bool,
    work_minutes: u32,
    break_minutes: u32,
}

impl Default for PomodoroCycle {
    fn default() -> Self {
        Self::new(DEFAULT_WORK_MINUTES.into(), DEFAULT_BREAK_MINUTES.into())
    }
}

impl PomodoroCycle {
    /// Paused, in Work, with durations run through the usual clamp. Invalid
    /// values fall back to the defaults.
    pub fn new(work_minutes: i64, break_minutes: i64) -> Self {
        let work_minutes = resolve_minutes(Some(work_minutes), WORK_MINUTES_MAX, DEFAULT_WORK_MINUTES);
        let break_minutes =
            resolve_minutes(Some(break_minutes), BREAK_MINUTES_MAX, DEFAULT_BREAK_MINUTES);
        Self {
            phase: Phase::Work,
            seconds_left: u64::from(work_minutes) * 60,
            cycles: 0,
            running: false,
            work_minutes,
            break_minutes,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn seconds_left(&self) -> u64 {
        self.seconds_left
    }

    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn work_minutes(&self) -> u32 {
        self.work_minutes
    }

    pub fn break_minutes(&self) -> u32 {
        self.break_minutes
    }

    pub fn display(&self) -> String {
        format_mmss(self.seconds_left)
    }

    pub fn snapshot(&self) -> Event {
        Event::PomodoroTick {
            phase: self.phase,
            seconds_left: self.seconds_left,
            cycles: self.cycles,
            running: self.running,
            display: self.display(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.running {
            return None;
        }
        self.running = true;
        Some(Event::PomodoroStarted {
            phase: self.phase,
            seconds_left: self.seconds_left,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        Some(Event::PomodoroPaused {
            phase: self.phase,
            seconds_left: self.seconds_left,
            at: Utc::now(),
        })
    }

    pub fn toggle(&mut self) -> Option<Event> {
        if self.running {
            self.pause()
        } else {
            self.start()
        }
    }

    pub fn reset(&mut self) -> Event {
        self.running = false;
        self.cycles = 0;
        self.phase = Phase::Work;
        self.seconds_left = self.phase_secs(Phase::Work);
        Event::PomodoroReset {
            seconds_left: self.seconds_left,
            at: Utc::now(),
        }
    }

    /// One second of countdown. `None` while paused.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.seconds_left = self.seconds_left.saturating_sub(1);
        if self.seconds_left > 0 {
            return Some(self.snapshot());
        }

        let from = self.phase;
        let to = match from {
            Phase::Work => {
                self.cycles += 1;
                Phase::Break
            }
            Phase::Break => Phase::Work,
        };
        self.phase = to;
        self.seconds_left = self.phase_secs(to);
        tracing::debug!(?from, ?to, cycles = self.cycles, "pomodoro phase change");
        Some(Event::PhaseChanged {
            from,
            to,
            cycles: self.cycles,
            seconds_left: self.seconds_left,
            at: Utc::now(),
        })
    }

    pub fn set_work_minutes(&mut self, minutes: i64) -> Event {
        self.work_minutes = resolve_minutes(Some(minutes), WORK_MINUTES_MAX, self.work_minutes);
        self.rearm(Phase::Work);
        self.configured()
    }

    pub fn set_break_minutes(&mut self, minutes: i64) -> Event {
        self.break_minutes = resolve_minutes(Some(minutes), BREAK_MINUTES_MAX, self.break_minutes);
        self.rearm(Phase::Break);
        self.configured()
    }

    /// Raw text from an input field. Non-numeric text keeps the last value.
    pub fn set_work_minutes_input(&mut self, raw: &str) -> Event {
        match parse_minutes(raw) {
            Some(n) => self.set_work_minutes(n),
            None => self.configured(),
        }
    }

    pub fn set_break_minutes_input(&mut self, raw: &str) -> Event {
        match parse_minutes(raw) {
            Some(n) => self.set_break_minutes(n),
            None => self.configured(),
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn phase_secs(&self, phase: Phase) -> u64 {
        let minutes = match phase {
            Phase::Work => self.work_minutes,
            Phase::Break => self.break_minutes,
        };
        u64::from(minutes) * 60
    }

    fn rearm(&mut self, phase: Phase) {
        if !self.running && self.phase == phase {
            self.seconds_left = self.phase_secs(phase);
        }
    }

    fn configured(&self) -> Event {
        Event::PomodoroConfigured {
            work_minutes: self.work_minutes,
            break_minutes: self.break_minutes,
            seconds_left: self.seconds_left,
        }
    }
}

/// Values below 1 (or missing) keep `last_valid`; values above `max` clamp.
fn resolve_minutes(input: Option<i64>, max: u32, last_valid: u32) -> u32 {
    match input {
        Some(n) if n >= 1 => n.min(i64::from(max)) as u32,
        _ => last_valid,
    }
}

/// Lenient integer parse for minute fields. Fractions are truncated.
pub fn parse_minutes(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<i64>() {
        return Some(n);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(|f| f.trunc() as i64)
}
