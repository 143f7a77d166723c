use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use focusmate_core::{
    run_session, Config, Event, FileTabSource, FixedTab, NoTabs, Presenter, Session, SystemClock,
    TabSource,
};

use super::{open_store, CmdResult};

#[derive(Args)]
pub struct SessionArgs {
    /// File whose first line is the focused tab's URL, re-read on every poll
    #[arg(long, conflicts_with = "tab_url")]
    tab_url_file: Option<PathBuf>,
    /// Fixed focused tab URL for the whole session
    #[arg(long)]
    tab_url: Option<String>,
    /// Start the stopwatch on attach
    #[arg(long)]
    stopwatch: bool,
    /// Start the pomodoro on attach
    #[arg(long)]
    pomodoro: bool,
    /// Work minutes for this session
    #[arg(long)]
    work: Option<String>,
    /// Break minutes for this session
    #[arg(long = "break")]
    break_minutes: Option<String>,
    /// Stop after this many seconds instead of waiting for Ctrl-C
    #[arg(long)]
    duration_secs: Option<u64>,
}

/// One JSON object per event on stdout.
struct JsonLines<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> Presenter for JsonLines<W> {
    fn render(&mut self, event: &Event) {
        let line = match serde_json::to_string(event) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(error = %e, "failed to encode event");
                return;
            }
        };
        if let Err(e) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            tracing::warn!(error = %e, "failed to write event");
        }
    }
}

pub fn run(args: SessionArgs) -> CmdResult {
    let config = Config::load_or_default();
    let store = Arc::new(open_store()?);
    let tabs: Arc<dyn TabSource> = match (&args.tab_url_file, &args.tab_url) {
        (Some(path), _) => Arc::new(FileTabSource::new(path)),
        (None, Some(url)) => Arc::new(FixedTab::new(Some(url.as_str()))),
        (None, None) => Arc::new(NoTabs),
    };

    let mut session = Session::attach(
        store,
        Arc::new(SystemClock),
        tabs,
        Box::new(JsonLines {
            out: std::io::stdout(),
        }),
        &config,
    )?;
    if let Some(raw) = &args.work {
        session.set_work_minutes_input(raw);
    }
    if let Some(raw) = &args.break_minutes {
        session.set_break_minutes_input(raw);
    }
    if args.stopwatch {
        session.stopwatch_start();
    }
    if args.pomodoro {
        session.pomodoro_start();
    }

    let runtime = tokio::runtime::Runtime::new()?;
    let flushed = runtime.block_on(async {
        let shutdown = async {
            match args.duration_secs {
                Some(secs) => {
                    tokio::select! {
                        _ = tokio::time::sleep(Duration::from_secs(secs)) => {}
                        _ = tokio::signal::ctrl_c() => {}
                    }
                }
                None => {
                    if let Err(e) = tokio::signal::ctrl_c().await {
                        tracing::warn!(error = %e, "failed to listen for Ctrl-C");
                    }
                }
            }
        };
        run_session(session, &config.cadence, shutdown).await
    })?;

    tracing::info!(flushed_secs = flushed, "session ended");
    Ok(())
}
