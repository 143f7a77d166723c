pub mod allow;
pub mod block;
pub mod config;
pub mod focus;
pub mod key;
pub mod panel;
pub mod screentime;
pub mod session;
pub mod topic;

use focusmate_core::{SqliteStore, ValidationError};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// The shared store under the data directory.
pub fn open_store() -> Result<SqliteStore, Box<dyn std::error::Error>> {
    Ok(SqliteStore::open()?)
}

/// A rejected argument, reported through the usual `error:` path.
pub fn invalid(field: &str, message: impl Into<String>) -> Box<dyn std::error::Error> {
    Box::new(ValidationError::InvalidValue {
        field: field.to_string(),
        message: message.into(),
    })
}
