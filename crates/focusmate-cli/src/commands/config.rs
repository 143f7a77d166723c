use clap::Subcommand;
use focusmate_core::Config;

use super::{invalid, CmdResult};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one value by dotted key, e.g. "pomodoro.work_minutes"
    Get { key: String },
    /// Change one value and save the file
    Set { key: String, value: String },
    /// Print the whole file as TOML, or JSON with --json
    List {
        #[arg(long)]
        json: bool,
    },
    /// Overwrite the file with defaults
    Reset,
    /// Print where the file lives
    Path,
}

pub fn run(action: ConfigAction) -> CmdResult {
    match action {
        ConfigAction::Get { key } => {
            let value = Config::load()?
                .get(&key)
                .ok_or_else(|| invalid("key", format!("unknown key '{key}'")))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            // Echo the stored form so coerced values are visible.
            println!("{key} = {}", config.get(&key).unwrap_or(value));
        }
        ConfigAction::List { json } => {
            let config = Config::load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print!("{}", toml::to_string_pretty(&config)?);
            }
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("ok");
        }
        ConfigAction::Path => println!("{}", Config::path()?.display()),
    }
    Ok(())
}
