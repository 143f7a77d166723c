use clap::Subcommand;
use focusmate_core::focus;
use focusmate_core::Event;

use super::{open_store, CmdResult};

#[derive(Subcommand)]
pub enum FocusAction {
    /// Turn focus mode on
    On,
    /// Turn focus mode off (break)
    Off,
    /// Flip focus mode
    Toggle,
    /// Print focus mode as JSON
    Status,
}

pub fn run(action: FocusAction) -> CmdResult {
    let store = open_store()?;
    let event = match action {
        FocusAction::On => focus::set_focus_mode(&store, true)?,
        FocusAction::Off => focus::set_focus_mode(&store, false)?,
        FocusAction::Toggle => focus::toggle_focus_mode(&store)?,
        FocusAction::Status => focus::focus_snapshot(&store)?,
    };
    if let Event::FocusModeChanged {
        focused,
        visibility,
        ..
    } = event
    {
        let value = serde_json::json!({ "focused": focused, "visibility": visibility });
        println!("{}", serde_json::to_string_pretty(&value)?);
    }
    Ok(())
}
