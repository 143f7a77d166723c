use clap::{CommandFactory, Parser, Subcommand};
use focusmate_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "focusmate", version, about = "Focusmate CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Blocklist management
    Block {
        #[command(subcommand)]
        action: commands::block::BlockAction,
    },
    /// Study topics
    Topic {
        #[command(subcommand)]
        action: commands::topic::TopicAction,
    },
    /// Focus mode gate
    Focus {
        #[command(subcommand)]
        action: commands::focus::FocusAction,
    },
    /// Per-site screen time
    Screentime {
        #[command(subcommand)]
        action: commands::screentime::ScreentimeAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// API key from the options page
    Key {
        #[command(subcommand)]
        action: commands::key::KeyAction,
    },
    /// Last viewed panel
    Panel {
        #[command(subcommand)]
        action: commands::panel::PanelAction,
    },
    /// Relay a page's temporary-allow request
    Allow(commands::allow::AllowArgs),
    /// Run a live session, printing events as JSON lines
    Session(commands::session::SessionArgs),
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

/// Filter precedence: `RUST_LOG`, then `log.level` from an existing config
/// file, then `info`. Never creates the data directory.
fn init_tracing() {
    let (level, unreadable) = match Config::read_existing() {
        Ok(cfg) => (cfg.unwrap_or_default().log.level, None),
        Err(e) => (Config::default().log.level, Some(e)),
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    if let Some(e) = unreadable {
        tracing::warn!(error = %e, "ignoring unreadable configuration");
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result = match cli.command {
        Commands::Block { action } => commands::block::run(action),
        Commands::Topic { action } => commands::topic::run(action),
        Commands::Focus { action } => commands::focus::run(action),
        Commands::Screentime { action } => commands::screentime::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Key { action } => commands::key::run(action),
        Commands::Panel { action } => commands::panel::run(action),
        Commands::Allow(args) => commands::allow::run(args),
        Commands::Session(args) => commands::session::run(args),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "focusmate", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
