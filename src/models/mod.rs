//! Data models for scraped chat messages.
//!
//! - [`ChatMessage`] - One message, identified by the uid the chat surface assigns it
//!
//! The same struct is used for live extraction and for the persisted log, so the
//! JSON field names double as the on-disk format.

pub mod message;

pub use message::ChatMessage;
