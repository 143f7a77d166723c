//! Free-running stopwatch.
//!
//! Elapsed time is derived from timestamps, never from tick counts, so the
//! render cadence has no influence on accuracy. Nothing here is persisted.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::format::format_hms;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stopwatch {
    running: bool,
    /// Clock reading when the current running interval began.
    start_ms: u64,
    /// Sum of all completed running intervals.
    accumulated_ms: u64,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        if self.running {
            self.accumulated_ms + now_ms.saturating_sub(self.start_ms)
        } else {
            self.accumulated_ms
        }
    }

    /// Whole seconds elapsed. Read-only.
    pub fn elapsed_secs(&self, now_ms: u64) -> u64 {
        self.elapsed_ms(now_ms) / 1000
    }

    pub fn display(&self, now_ms: u64) -> String {
        format_hms(self.elapsed_secs(now_ms))
    }

    pub fn sample(&self, now_ms: u64) -> Event {
        Event::StopwatchSample {
            running: self.running,
            elapsed_secs: self.elapsed_secs(now_ms),
            display: self.display(now_ms),
        }
    }

    pub fn start(&mut self, now_ms: u64) -> Option<Event> {
        if self.running {
            return None;
        }
        self.running = true;
        self.start_ms = now_ms;
        Some(Event::StopwatchStarted {
            elapsed_secs: self.elapsed_secs(now_ms),
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self, now_ms: u64) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.accumulated_ms += now_ms.saturating_sub(self.start_ms);
        self.running = false;
        Some(Event::StopwatchPaused {
            elapsed_secs: self.elapsed_secs(now_ms),
            at: Utc::now(),
        })
    }

    /// Start when paused, pause when running.
    pub fn toggle(&mut self, now_ms: u64) -> Option<Event> {
        if self.running {
            self.pause(now_ms)
        } else {
            self.start(now_ms)
        }
    }

    pub fn reset(&mut self) -> Event {
        self.running = false;
        self.accumulated_ms = 0;
        self.start_ms = 0;
        Event::StopwatchReset { at: Utc::now() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn start_is_noop_when_running() {
        let mut sw = Stopwatch::new();
        assert!(sw.start(1_000).is_some());
        assert!(sw.start(5_000).is_none());
        // The second start must not move the interval origin.
        assert_eq!(sw.elapsed_secs(11_000), 10);
    }

    #[test]
    fn pause_is_noop_when_paused() {
        let mut sw = Stopwatch::new();
        assert!(sw.pause(1_000).is_none());
        assert_eq!(sw.elapsed_ms(1_000), 0);
    }

    #[test]
    fn paused_elapsed_is_sum_of_intervals() {
        let mut sw = Stopwatch::new();
        sw.start(0);
        sw.pause(3_500);
        sw.start(10_000);
        sw.pause(12_000);
        assert_eq!(sw.elapsed_ms(99_999), 5_500);
        assert_eq!(sw.elapsed_secs(99_999), 5);
    }

    #[test]
    fn sampling_does_not_mutate() {
        let mut sw = Stopwatch::new();
        sw.start(0);
        for t in (0..10_000).step_by(500) {
            let _ = sw.sample(t);
        }
        assert_eq!(sw.elapsed_ms(10_000), 10_000);
        sw.pause(10_000);
        assert_eq!(sw.elapsed_ms(50_000), 10_000);
    }

    #[test]
    fn reset_zeroes_even_while_running() {
        let mut sw = Stopwatch::new();
        sw.start(0);
        sw.reset();
        assert!(!sw.is_running());
        assert_eq!(sw.elapsed_secs(60_000), 0);
        assert_eq!(sw.display(60_000), "00:00:00");
    }

    #[test]
    fn toggle_alternates() {
        let mut sw = Stopwatch::new();
        sw.toggle(0);
        assert!(sw.is_running());
        sw.toggle(2_000);
        assert!(!sw.is_running());
        assert_eq!(sw.elapsed_secs(9_000), 2);
    }

    #[derive(Debug, Clone, Copy)]
    enum Op {
        Start,
        Pause,
        Reset,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![Just(Op::Start), Just(Op::Pause), Just(Op::Reset)]
    }

    proptest! {
        #[test]
        fn elapsed_matches_running_intervals(
            steps in proptest::collection::vec((op(), 0u64..10_000), 0..40),
            sample_every in 250u64..2_000,
        ) {
            let mut sw = Stopwatch::new();
            let mut now = 0u64;
            let mut expected = 0u64;
            let mut running_since: Option<u64> = None;

            for (op, gap) in steps {
                // Samples between operations must not disturb the total.
                let mut t = now;
                while t < now + gap {
                    let _ = sw.sample(t);
                    t += sample_every;
                }
                now += gap;

                match op {
                    Op::Start => {
                        sw.start(now);
                        running_since.get_or_insert(now);
                    }
                    Op::Pause => {
                        sw.pause(now);
                        if let Some(since) = running_since.take() {
                            expected += now - since;
                        }
                    }
                    Op::Reset => {
                        sw.reset();
                        expected = 0;
                        running_since = None;
                        prop_assert_eq!(sw.elapsed_ms(now), 0);
                    }
                }

                if running_since.is_none() {
                    prop_assert_eq!(sw.elapsed_ms(now + 123_456), expected);
                }
            }
        }
    }
}
