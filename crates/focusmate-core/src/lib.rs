//! # Focusmate Core Library
//!
//! Headless core of the Focusmate focus helper: a stopwatch, a Pomodoro
//! work/break cycle, a focus-mode gate, and a site tracker (blocklist,
//! topics, per-host screen time). Everything persists into one flat
//! key-value store whose key names match the browser extension's.
//!
//! ## Architecture
//!
//! - **Timers**: wall-clock stopwatch and tick-driven Pomodoro cycle; the
//!   caller supplies time and ticks
//! - **Store**: [`KvStore`] trait with in-memory and SQLite backends;
//!   read-modify-writes are serialized per store
//! - **Session**: explicit per-UI state object rendering [`Event`]s through a
//!   [`Presenter`]
//! - **Runner**: tokio-driven periodic callbacks with cancellation and a
//!   final flush on shutdown
//!
//! ## Key Components
//!
//! - [`Session`]: owns the in-memory timers and the site tracker
//! - [`PomodoroCycle`]: Work/Break state machine
//! - [`SiteTracker`]: screen-time accounting per normalized hostname
//! - [`Config`]: TOML configuration

pub mod allow;
pub mod clock;
pub mod config;
pub mod credentials;
pub mod error;
pub mod events;
pub mod focus;
pub mod format;
pub mod panel;
pub mod presenter;
pub mod runner;
pub mod session;
pub mod sites;
pub mod store;
pub mod tabs;
pub mod timer;

pub use allow::{relay_allow, MessageSink, PageMessage, RuntimeMessage};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use error::{ConfigError, CoreError, StoreError, ValidationError};
pub use events::Event;
pub use focus::Visibility;
pub use presenter::{NullPresenter, Presenter, RecordingPresenter};
pub use runner::run_session;
pub use session::Session;
pub use sites::{normalize_domain, SiteTracker, SiteUsage};
pub use store::{KvStore, MemoryStore, SqliteStore, StoreExt};
pub use tabs::{FileTabSource, FixedTab, NoTabs, TabSource};
pub use timer::{Phase, PomodoroCycle, Stopwatch};
