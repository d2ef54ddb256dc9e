//! Replies sent to the game manager.
//!
//! The `Display` impl is the exact wire text of each reply, one line each.

use std::fmt;

use crate::board::Point;
use crate::constants::{ENGINE_AUTHOR, ENGINE_COUNTRY, ENGINE_NAME};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    Ok,
    Error,
    Unknown,
    /// Our move, sent as `x,y`.
    Move(Point),
    /// Engine metadata for `ABOUT`.
    About,
    /// Free text for the manager's debug log.
    Debug(String),
    /// Informational note shown by the manager.
    Message(String),
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Ok => write!(f, "OK"),
            Reply::Error => write!(f, "ERROR"),
            Reply::Unknown => write!(f, "UNKNOWN"),
            Reply::Move((x, y)) => write!(f, "{x},{y}"),
            Reply::About => write!(
                f,
                "name=\"{ENGINE_NAME}\", version=\"{}\", author=\"{ENGINE_AUTHOR}\", country=\"{ENGINE_COUNTRY}\"",
                env!("CARGO_PKG_VERSION")
            ),
            Reply::Debug(text) => write!(f, "DEBUG {text}"),
            Reply::Message(text) => write!(f, "MESSAGE {text}"),
        }
    }
}
