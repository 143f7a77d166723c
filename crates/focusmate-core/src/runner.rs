//! Tick driver for a [`Session`].
//!
//! Three independent periodic callbacks (stopwatch render, pomodoro second,
//! screen-time poll) multiplexed on one task, so each callback runs to
//! completion before the next one starts. The shutdown future cancels all
//! of them and the session is detached with its final flush.

use std::future::Future;
use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};

use crate::config::CadenceConfig;
use crate::error::Result;
use crate::session::Session;

/// The pomodoro counts down in whole seconds, one per tick.
pub const POMODORO_TICK: Duration = Duration::from_secs(1);

/// Drive `session` until `shutdown` resolves. Returns the seconds flushed
/// on detach.
///
/// # Errors
/// Returns an error only if the final flush fails.
pub async fn run_session<F>(mut session: Session, cadence: &CadenceConfig, shutdown: F) -> Result<u64>
where
    F: Future<Output = ()>,
{
    let mut stopwatch = interval(cadence.stopwatch_render());
    stopwatch.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // Burst keeps the pomodoro's tick count equal to elapsed seconds when
    // the loop falls behind.
    let mut pomodoro = interval(POMODORO_TICK);
    pomodoro.set_missed_tick_behavior(MissedTickBehavior::Burst);
    let mut screen_time = interval(cadence.screen_time_poll());
    screen_time.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // First ticks complete immediately; attach already rendered and polled.
    stopwatch.tick().await;
    pomodoro.tick().await;
    screen_time.tick().await;

    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => break,
            _ = pomodoro.tick() => session.tick_pomodoro(),
            _ = screen_time.tick() => session.tick_screen_time(),
            _ = stopwatch.tick() => session.tick_stopwatch(),
        }
    }

    tracing::debug!("session loop cancelled");
    session.detach()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Clock;
    use crate::config::Config;
    use crate::events::Event;
    use crate::presenter::RecordingPresenter;
    use crate::sites::site_time;
    use crate::store::MemoryStore;
    use crate::tabs::FixedTab;
    use std::sync::Arc;

    /// Follows tokio's (pausable) clock.
    struct TokioClock(tokio::time::Instant);

    impl Clock for TokioClock {
        fn now_ms(&self) -> u64 {
            self.0.elapsed().as_millis() as u64
        }
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_until_shutdown_then_flushes() {
        let store = Arc::new(MemoryStore::new());
        let presenter = RecordingPresenter::new();
        let log = presenter.handle();
        let mut config = Config::default();
        config.pomodoro.work_minutes = 1;

        let mut session = Session::attach(
            store.clone(),
            Arc::new(TokioClock(tokio::time::Instant::now())),
            Arc::new(FixedTab::new(Some("https://www.example.com/"))),
            Box::new(presenter),
            &config,
        )
        .unwrap();
        session.pomodoro_start();
        session.stopwatch_start();

        let flushed = run_session(
            session,
            &config.cadence,
            tokio::time::sleep(Duration::from_millis(10_500)),
        )
        .await
        .unwrap();

        assert_eq!(flushed, 10);
        assert_eq!(site_time(store.as_ref(), "example.com").unwrap(), 10);

        let events = log.snapshot();
        let last_pomodoro = events
            .iter()
            .rev()
            .find_map(|e| match e {
                Event::PomodoroTick { seconds_left, .. } => Some(*seconds_left),
                _ => None,
            })
            .unwrap();
        assert_eq!(last_pomodoro, 50);

        let last_stopwatch = events
            .iter()
            .rev()
            .find_map(|e| match e {
                Event::StopwatchSample { elapsed_secs, .. } => Some(*elapsed_secs),
                _ => None,
            })
            .unwrap();
        assert_eq!(last_stopwatch, 10);
    }
}
