//! Parser for the sender/timestamp annotation attached to message text.
//!
//! The chat surface stores time, date and author of each message in a single
//! attribute on the copyable text element:
//!
//! ```text
//! annotation := ws* '[' time ',' ws* date ']' ws* sender ws* (':' ws*)?
//! ```
//!
//! - The bracketed group ends at the first `]`, so time and date cannot contain one.
//! - `time` is everything before the first comma of the group, `date` everything
//!   after the last comma. Both are trimmed and must be non-empty.
//! - `sender` is the rest of the input with one trailing `:` removed. It may itself
//!   contain `]` or `:`. An empty sender is accepted.
//!
//! # Examples
//!
//! ```rust
//! # use chat_tracker::parsers::annotation::parse_annotation;
//! let annotation = parse_annotation("[6:34 pm, 01/03/2024] Dmytro Karpovych: ").unwrap();
//! assert_eq!(annotation.sender, "Dmytro Karpovych");
//! assert_eq!(annotation.timestamp(), "01/03/2024 6:34 pm");
//! ```

use thiserror::Error;

/// Failure modes of [`parse_annotation`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnotationError {
    #[error("annotation does not start with '['")]
    MissingOpenBracket,

    #[error("annotation has no closing ']'")]
    UnterminatedGroup,

    #[error("bracketed group has no ',' between time and date")]
    MissingSeparator,

    #[error("bracketed group has an empty {0}")]
    EmptyField(&'static str),
}

/// Time, date and sender decoded from one annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub time: String,
    pub date: String,
    pub sender: String,
}

impl Annotation {
    /// Date and time joined the way they are persisted: `"<date> <time>"`
    pub fn timestamp(&self) -> String {
        format!("{} {}", self.date, self.time)
    }
}

pub fn parse_annotation(input: &str) -> Result<Annotation, AnnotationError> {
    let rest = input.trim_start().strip_prefix('[').ok_or(AnnotationError::MissingOpenBracket)?;

    let close = rest.find(']').ok_or(AnnotationError::UnterminatedGroup)?;
    let group = &rest[..close];
    let tail = &rest[close + 1..];

    let first_comma = group.find(',').ok_or(AnnotationError::MissingSeparator)?;
    // A group with a single comma has first == last
    let last_comma = group.rfind(',').unwrap_or(first_comma);

    let time = group[..first_comma].trim();
    let date = group[last_comma + 1..].trim();
    if time.is_empty() {
        return Err(AnnotationError::EmptyField("time"));
    }
    if date.is_empty() {
        return Err(AnnotationError::EmptyField("date"));
    }

    let sender = tail.trim();
    let sender = sender.strip_suffix(':').unwrap_or(sender).trim();

    Ok(Annotation { time: time.to_string(), date: date.to_string(), sender: sender.to_string() })
}
