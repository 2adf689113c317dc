//! Timestamped status messages

use crate::core::clock::Clock;
use serde::{Deserialize, Serialize};

/// A free-text status update paired with the time it was recorded
///
/// Messages are never mutated once created; logs grow by appending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    /// The message text
    pub message: String,

    /// When the message was recorded, as ISO-8601 text
    pub time: String,
}

impl StatusMessage {
    /// Record `message` stamped with the clock's current time
    pub fn now(message: impl Into<String>, clock: &dyn Clock) -> Self {
        Self {
            message: message.into(),
            time: clock.timestamp(),
        }
    }

    /// Record `message` with an explicit timestamp
    pub fn at(message: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            time: time.into(),
        }
    }
}
