use clap::Args;
use focusmate_core::{relay_allow, MessageSink, PageMessage, RuntimeMessage};

use super::{invalid, CmdResult};

#[derive(Args)]
pub struct AllowArgs {
    /// Page message JSON, e.g. '{"type":"FOCUSMATE_ALLOW","minutes":5}'
    message: String,
    /// Domain of the page that posted the message
    #[arg(long)]
    domain: String,
    /// Treat the message as posted by another window
    #[arg(long)]
    foreign: bool,
}

/// Hands relayed messages to whatever reads our stdout.
struct StdoutSink;

impl MessageSink for StdoutSink {
    fn send(&self, message: &RuntimeMessage) -> focusmate_core::error::Result<()> {
        println!("{}", serde_json::to_string(message)?);
        Ok(())
    }
}

pub fn run(args: AllowArgs) -> CmdResult {
    let data: serde_json::Value = serde_json::from_str(&args.message)?;
    let message = PageMessage {
        from_same_window: !args.foreign,
        data,
    };
    if relay_allow(&message, &args.domain, &StdoutSink).is_none() {
        return Err(invalid("message", "not an allow request from this window"));
    }
    Ok(())
}
