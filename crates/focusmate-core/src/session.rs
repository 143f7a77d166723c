//! Session state owned by one UI instance.
//!
//! Built on attach, consumed on detach. Holds the in-memory timers and the
//! site tracker, talks to the store, and renders every resulting event
//! through its [`Presenter`]. There is no process-wide state; two sessions
//! over the same store are independent apart from the data they share.

use std::sync::Arc;

use crate::clock::Clock;
use crate::config::Config;
use crate::error::Result;
use crate::events::Event;
use crate::focus;
use crate::panel;
use crate::presenter::Presenter;
use crate::sites::{self, SiteTracker};
use crate::store::KvStore;
use crate::tabs::TabSource;
use crate::timer::{PomodoroCycle, Stopwatch};

pub struct Session {
    store: Arc<dyn KvStore>,
    clock: Arc<dyn Clock>,
    tabs: Arc<dyn TabSource>,
    presenter: Box<dyn Presenter>,
    stopwatch: Stopwatch,
    pomodoro: PomodoroCycle,
    tracker: SiteTracker,
}

impl Session {
    /// Build a session and render the persisted state once.
    ///
    /// # Errors
    /// Returns an error if the initial store reads fail.
    pub fn attach(
        store: Arc<dyn KvStore>,
        clock: Arc<dyn Clock>,
        tabs: Arc<dyn TabSource>,
        presenter: Box<dyn Presenter>,
        config: &Config,
    ) -> Result<Self> {
        let now = clock.now_ms();
        let mut session = Self {
            pomodoro: PomodoroCycle::new(config.pomodoro.work_minutes, config.pomodoro.break_minutes),
            stopwatch: Stopwatch::new(),
            tracker: SiteTracker::new(now, config.usage.top_n),
            store,
            clock,
            tabs,
            presenter,
        };

        let initial = vec![
            focus::focus_snapshot(session.store.as_ref())?,
            Event::BlocklistChanged {
                sites: sites::blocklist(session.store.as_ref())?,
            },
            {
                let t = sites::topics(session.store.as_ref())?;
                Event::TopicsChanged {
                    topics: t.topics,
                    active: t.active,
                }
            },
            session.stopwatch.sample(now),
            session.pomodoro.snapshot(),
        ];
        for event in &initial {
            session.presenter.render(event);
        }

        session.tick_screen_time();

        let panel = panel::active_panel(session.store.as_ref())?;
        session.render(Event::PanelActivated { panel });

        tracing::info!("session attached");
        Ok(session)
    }

    /// Final screen-time flush, then drop. Returns the flushed seconds.
    ///
    /// # Errors
    /// Returns an error if the flush cannot be written.
    pub fn detach(mut self) -> Result<u64> {
        let now = self.clock.now_ms();
        let flushed = self.tracker.flush(self.store.as_ref(), now)?;
        tracing::info!(
            hostname = %self.tracker.current_hostname(),
            flushed_secs = flushed,
            "session detached"
        );
        Ok(flushed)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn store(&self) -> &dyn KvStore {
        self.store.as_ref()
    }

    pub fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    pub fn pomodoro(&self) -> &PomodoroCycle {
        &self.pomodoro
    }

    pub fn tracker(&self) -> &SiteTracker {
        &self.tracker
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    // ── Stopwatch ────────────────────────────────────────────────────

    pub fn stopwatch_start(&mut self) {
        let event = self.stopwatch.start(self.clock.now_ms());
        self.render_opt(event);
    }

    pub fn stopwatch_pause(&mut self) {
        let event = self.stopwatch.pause(self.clock.now_ms());
        self.render_opt(event);
    }

    pub fn stopwatch_toggle(&mut self) {
        let event = self.stopwatch.toggle(self.clock.now_ms());
        self.render_opt(event);
    }

    pub fn stopwatch_reset(&mut self) {
        let event = self.stopwatch.reset();
        self.render(event);
        let sample = self.stopwatch.sample(self.clock.now_ms());
        self.render(sample);
    }

    // ── Pomodoro ─────────────────────────────────────────────────────

    pub fn pomodoro_start(&mut self) {
        let event = self.pomodoro.start();
        self.render_opt(event);
    }

    pub fn pomodoro_pause(&mut self) {
        let event = self.pomodoro.pause();
        self.render_opt(event);
    }

    pub fn pomodoro_toggle(&mut self) {
        let event = self.pomodoro.toggle();
        self.render_opt(event);
    }

    pub fn pomodoro_reset(&mut self) {
        let event = self.pomodoro.reset();
        self.render(event);
    }

    pub fn set_work_minutes(&mut self, minutes: i64) {
        let event = self.pomodoro.set_work_minutes(minutes);
        self.render(event);
    }

    pub fn set_break_minutes(&mut self, minutes: i64) {
        let event = self.pomodoro.set_break_minutes(minutes);
        self.render(event);
    }

    pub fn set_work_minutes_input(&mut self, raw: &str) {
        let event = self.pomodoro.set_work_minutes_input(raw);
        self.render(event);
    }

    pub fn set_break_minutes_input(&mut self, raw: &str) {
        let event = self.pomodoro.set_break_minutes_input(raw);
        self.render(event);
    }

    // ── Focus mode ───────────────────────────────────────────────────

    pub fn set_focus_mode(&mut self, is_on: bool) -> Result<()> {
        let event = focus::set_focus_mode(self.store.as_ref(), is_on)?;
        self.render(event);
        Ok(())
    }

    pub fn toggle_focus_mode(&mut self) -> Result<()> {
        let event = focus::toggle_focus_mode(self.store.as_ref())?;
        self.render(event);
        Ok(())
    }

    // ── Blocklist and topics ─────────────────────────────────────────

    pub fn add_to_blocklist(&mut self, input: &str) -> Result<()> {
        let event = sites::add_to_blocklist(self.store.as_ref(), input)?;
        self.render_opt(event);
        Ok(())
    }

    pub fn remove_from_blocklist(&mut self, site: &str) -> Result<()> {
        let event = sites::remove_from_blocklist(self.store.as_ref(), site)?;
        self.render(event);
        Ok(())
    }

    pub fn block_current_tab(&mut self) -> Result<()> {
        let event = sites::block_current_tab(self.store.as_ref(), self.tabs.as_ref())?;
        self.render_opt(event);
        Ok(())
    }

    pub fn add_recommended(&mut self, site: &str) -> Result<()> {
        let event = sites::add_recommended(self.store.as_ref(), site)?;
        self.render_opt(event);
        Ok(())
    }

    pub fn add_topic(&mut self, topic: &str) -> Result<()> {
        let event = sites::add_topic(self.store.as_ref(), topic)?;
        self.render_opt(event);
        Ok(())
    }

    pub fn remove_topic(&mut self, topic: &str) -> Result<()> {
        let event = sites::remove_topic(self.store.as_ref(), topic)?;
        self.render(event);
        Ok(())
    }

    pub fn select_topic(&mut self, topic: &str) -> Result<()> {
        let event = sites::select_topic(self.store.as_ref(), topic)?;
        self.render_opt(event);
        Ok(())
    }

    // ── Screen time and panels ───────────────────────────────────────

    pub fn reset_current_site_time(&mut self) -> Result<()> {
        let now = self.clock.now_ms();
        let event = self.tracker.reset_current(self.store.as_ref(), now)?;
        self.render_opt(event);
        let sample = self.tracker.sample(self.store.as_ref(), now)?;
        self.render(sample);
        Ok(())
    }

    pub fn activate_panel(&mut self, id: &str) -> Result<()> {
        let event = panel::activate_panel(self.store.as_ref(), id)?;
        self.render_opt(event);
        Ok(())
    }

    // ── Ticks ────────────────────────────────────────────────────────

    /// Re-render the stopwatch while it runs.
    pub fn tick_stopwatch(&mut self) {
        if self.stopwatch.is_running() {
            let sample = self.stopwatch.sample(self.clock.now_ms());
            self.render(sample);
        }
    }

    /// One second of pomodoro countdown. Paused cycles ignore the tick.
    pub fn tick_pomodoro(&mut self) {
        let event = self.pomodoro.tick();
        self.render_opt(event);
    }

    /// Poll the focused tab. Store trouble is logged, never raised.
    pub fn tick_screen_time(&mut self) {
        let now = self.clock.now_ms();
        match self
            .tracker
            .poll(self.store.as_ref(), self.tabs.as_ref(), now)
        {
            Ok(events) => {
                for event in &events {
                    self.presenter.render(event);
                }
            }
            Err(e) => tracing::warn!(error = %e, "screen time poll failed"),
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn render(&mut self, event: Event) {
        self.presenter.render(&event);
    }

    fn render_opt(&mut self, event: Option<Event>) {
        if let Some(event) = event {
            self.render(event);
        }
    }
}
