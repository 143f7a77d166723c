use clap::Subcommand;
use focusmate_core::sites::{self, RECOMMENDED_SITES};
use focusmate_core::FixedTab;

use super::{invalid, open_store, CmdResult};

#[derive(Subcommand)]
pub enum BlockAction {
    /// Add one or more comma-separated sites
    Add {
        /// e.g. "youtube.com, https://www.reddit.com/r/all"
        sites: String,
    },
    /// Remove a site
    Remove { site: String },
    /// List blocked sites
    List {
        #[arg(long)]
        json: bool,
    },
    /// Block the host of the given tab URL
    Current {
        #[arg(long)]
        url: String,
    },
    /// Show suggestions, or add one
    Recommended { site: Option<String> },
    /// Check whether a site is blocked
    Check { site: String },
}

pub fn run(action: BlockAction) -> CmdResult {
    let store = open_store()?;
    match action {
        BlockAction::Add { sites: input } => {
            match sites::add_to_blocklist(&store, &input)? {
                Some(_) => println!("ok"),
                None => println!("nothing to add"),
            }
        }
        BlockAction::Remove { site } => {
            sites::remove_from_blocklist(&store, &site)?;
            println!("ok");
        }
        BlockAction::List { json } => {
            let list = sites::blocklist(&store)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&list)?);
            } else if list.is_empty() {
                println!("No blocked sites.");
            } else {
                for site in list {
                    println!("{site}");
                }
            }
        }
        BlockAction::Current { url } => {
            let tab = FixedTab::new(Some(url.as_str()));
            match sites::block_current_tab(&store, &tab)? {
                Some(_) => println!("ok"),
                None => return Err(invalid("url", format!("'{url}' is not a blockable web page"))),
            }
        }
        BlockAction::Recommended { site: Some(site) } => {
            match sites::add_recommended(&store, &site)? {
                Some(_) => println!("ok"),
                None => println!("already blocked"),
            }
        }
        BlockAction::Recommended { site: None } => {
            let blocked = sites::blocklist(&store)?;
            for site in RECOMMENDED_SITES {
                let mark = if blocked.iter().any(|b| b == site) { "x" } else { " " };
                println!("[{mark}] {site}");
            }
        }
        BlockAction::Check { site } => {
            println!("{}", sites::is_blocked(&store, &site)?);
        }
    }
    Ok(())
}
