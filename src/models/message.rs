use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// One chat message as scraped from the chat surface or read back from the log.
///
/// Identity is the `uid` alone: a message whose text was edited after it was
/// first seen still compares equal to the original and is not re-emitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub timestamp: String,
    pub text: String,
    pub sender: String,
    pub uid: String,
}

impl ChatMessage {
    pub fn new(
        uid: impl Into<String>,
        text: impl Into<String>,
        sender: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            text: text.into(),
            sender: sender.into(),
            uid: uid.into(),
        }
    }
}

impl PartialEq for ChatMessage {
    fn eq(&self, other: &Self) -> bool {
        self.uid == other.uid
    }
}

impl Eq for ChatMessage {}

impl Hash for ChatMessage {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uid.hash(state);
    }
}

impl fmt::Display for ChatMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.sender, self.timestamp, self.text)
    }
}
