use clap::Subcommand;
use focusmate_core::format::format_hms;
use focusmate_core::sites::{self, normalize_domain};
use focusmate_core::Config;

use super::{invalid, open_store, CmdResult};

#[derive(Subcommand)]
pub enum ScreentimeAction {
    /// Most-visited sites by recorded time
    Top {
        /// Number of entries (defaults to usage.top_n)
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Recorded time for one site
    Show { site: String },
    /// Zero a site's counter
    Reset { site: String },
}

pub fn run(action: ScreentimeAction) -> CmdResult {
    let store = open_store()?;
    match action {
        ScreentimeAction::Top { limit, json } => {
            let limit = limit.unwrap_or_else(|| Config::load_or_default().usage.top_n);
            let usage = sites::usage_ranking(&store, limit)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&usage)?);
            } else if usage.is_empty() {
                println!("No usage recorded.");
            } else {
                for entry in usage {
                    println!("{}  {}", entry.display, entry.hostname);
                }
            }
        }
        ScreentimeAction::Show { site } => {
            let host = normalize_domain(&site);
            println!("{}", format_hms(sites::site_time(&store, &host)?));
        }
        ScreentimeAction::Reset { site } => {
            let host = normalize_domain(&site);
            if sites::reset_site_time(&store, &host)?.is_none() {
                return Err(invalid("site", format!("'{site}' has no hostname")));
            }
            println!("ok");
        }
    }
    Ok(())
}
