//! Temporary-allow relay.
//!
//! A page asks for its own domain to be unblocked for a while by posting
//! `{type: "FOCUSMATE_ALLOW", minutes: <number>}` to its window. The relay
//! validates that message and forwards
//! `{type: "ALLOW_DOMAIN", minutes, domain}` to the background process.
//! Enforcing the allowance is the background's job.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

pub const PAGE_ALLOW_TYPE: &str = "FOCUSMATE_ALLOW";

/// Messages sent to the background process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RuntimeMessage {
    #[serde(rename = "ALLOW_DOMAIN")]
    AllowDomain { minutes: f64, domain: String },
}

/// Channel to the background process.
pub trait MessageSink: Send + Sync {
    fn send(&self, message: &RuntimeMessage) -> Result<()>;
}

/// A message as received from the page context.
#[derive(Debug, Clone)]
pub struct PageMessage {
    /// Whether the message was posted by the page's own window.
    pub from_same_window: bool,
    pub data: Value,
}

impl PageMessage {
    pub fn from_window(data: Value) -> Self {
        Self {
            from_same_window: true,
            data,
        }
    }
}

/// Requested minutes, if this is a well-formed allow request. `minutes`
/// must be a JSON number; numeric strings do not count.
pub fn parse_allow_request(message: &PageMessage) -> Option<f64> {
    if !message.from_same_window {
        return None;
    }
    let obj = message.data.as_object()?;
    if obj.get("type").and_then(Value::as_str) != Some(PAGE_ALLOW_TYPE) {
        return None;
    }
    obj.get("minutes").filter(|m| m.is_number())?.as_f64()
}

/// Validate and forward. Returns the relayed message, or `None` when the
/// page message was rejected or the sink failed (logged, never raised).
pub fn relay_allow(
    message: &PageMessage,
    domain: &str,
    sink: &dyn MessageSink,
) -> Option<RuntimeMessage> {
    let minutes = parse_allow_request(message)?;
    let relayed = RuntimeMessage::AllowDomain {
        minutes,
        domain: domain.to_string(),
    };
    match sink.send(&relayed) {
        Ok(()) => {
            tracing::info!(domain, minutes, "relayed allow request");
            Some(relayed)
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to send allow message");
            None
        }
    }
}
