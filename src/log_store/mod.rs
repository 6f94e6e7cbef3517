//! Append-only message log.
//!
//! The log is a newline-delimited JSON file with one [`ChatMessage`] per line. Lines
//! are only ever appended; nothing is rewritten or compacted. Reading the log back
//! at start-up seeds the tracker's seen-set, which is what makes delivery
//! exactly-once per uid across restarts.
//!
//! [`ChatMessage`]: crate::models::ChatMessage

pub mod persistence;
pub mod stats;

pub use persistence::{append_log, read_log};
pub use stats::{LogStats, summarize};

/// File name used when no log path is configured
pub const DEFAULT_LOG_FILENAME: &str = "last_messages_log.jsonl";
