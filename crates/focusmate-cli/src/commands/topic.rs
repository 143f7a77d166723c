use clap::Subcommand;
use focusmate_core::sites;

use super::{invalid, open_store, CmdResult};

#[derive(Subcommand)]
pub enum TopicAction {
    /// Add a topic and make it active
    Add { topic: String },
    /// Remove a topic
    Remove { topic: String },
    /// Make an existing topic active
    Use { topic: String },
    /// List topics, marking the active one
    List {
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: TopicAction) -> CmdResult {
    let store = open_store()?;
    match action {
        TopicAction::Add { topic } => match sites::add_topic(&store, &topic)? {
            Some(_) => println!("ok"),
            None => println!("nothing to add"),
        },
        TopicAction::Remove { topic } => {
            sites::remove_topic(&store, &topic)?;
            println!("ok");
        }
        TopicAction::Use { topic } => {
            if sites::select_topic(&store, &topic)?.is_none() {
                return Err(invalid("topic", format!("no topic named '{}'", topic.trim())));
            }
            println!("ok");
        }
        TopicAction::List { json } => {
            let current = sites::topics(&store)?;
            if json {
                let value = serde_json::json!({
                    "topics": current.topics,
                    "active": current.active,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else if current.topics.is_empty() {
                println!("No topics.");
            } else {
                for topic in &current.topics {
                    let mark = if *topic == current.active { "*" } else { " " };
                    println!("{mark} {topic}");
                }
            }
        }
    }
    Ok(())
}
