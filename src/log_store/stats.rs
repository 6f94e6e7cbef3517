use std::collections::HashMap;

use crate::models::ChatMessage;

/// Summary of a message log for the `stats` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogStats {
    pub total: usize,
    /// Message count per sender, most active first, ties broken by name
    pub senders: Vec<(String, usize)>,
    pub first: Option<ChatMessage>,
    pub last: Option<ChatMessage>,
}

pub fn summarize(messages: &[ChatMessage]) -> LogStats {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for message in messages {
        *counts.entry(message.sender.as_str()).or_default() += 1;
    }

    let mut senders: Vec<(String, usize)> =
        counts.into_iter().map(|(sender, count)| (sender.to_string(), count)).collect();
    senders.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    LogStats {
        total: messages.len(),
        senders,
        first: messages.first().cloned(),
        last: messages.last().cloned(),
    }
}
