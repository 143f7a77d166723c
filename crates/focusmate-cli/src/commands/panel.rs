use clap::Subcommand;
use focusmate_core::{panel, ValidationError};

use super::{open_store, CmdResult};

#[derive(Subcommand)]
pub enum PanelAction {
    /// Print the last viewed panel
    Get,
    /// Remember a panel as last viewed
    Set { id: String },
}

pub fn run(action: PanelAction) -> CmdResult {
    let store = open_store()?;
    match action {
        PanelAction::Get => println!("{}", panel::active_panel(&store)?),
        PanelAction::Set { id } => {
            if panel::activate_panel(&store, &id)?.is_none() {
                return Err(ValidationError::EmptyInput("panel id".into()).into());
            }
            println!("ok");
        }
    }
    Ok(())
}
