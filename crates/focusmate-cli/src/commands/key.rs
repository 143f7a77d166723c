use clap::Subcommand;
use focusmate_core::credentials;

use super::{open_store, CmdResult};

#[derive(Subcommand)]
pub enum KeyAction {
    /// Store the API key
    Set { key: String },
    /// Print the stored key, masked unless --reveal
    Show {
        #[arg(long)]
        reveal: bool,
    },
    /// Forget the stored key
    Clear,
}

pub fn run(action: KeyAction) -> CmdResult {
    let store = open_store()?;
    match action {
        KeyAction::Set { key } => {
            credentials::save_api_key(&store, &key)?;
            println!("ok");
        }
        KeyAction::Show { reveal } => match credentials::load_api_key(&store)? {
            Some(key) => println!("{}", credentials::display_api_key(&key, reveal)),
            None => println!("No API key set."),
        },
        KeyAction::Clear => {
            credentials::clear_api_key(&store)?;
            println!("ok");
        }
    }
    Ok(())
}
