//! Chat Tracker - Forward new messages from a web chat open in a browser
//!
//! This library attaches to a chat rendered in a browser tab and turns it into a
//! stream of new messages. It supports:
//!
//! - Extracting messages (uid, text, sender, timestamp) from the rendered rows
//! - Parsing the `[time, date] sender: ` annotation carried by each message
//! - Deduplicating against an append-only JSON-lines log that survives restarts
//! - Polling on a fixed interval and handing each new message to a handler
//!
//! The browser is reached through the [`surface::ChatSurface`] trait, so the core
//! can be driven by synthetic rows as well as by a live Chromium tab.
//!
//! # Example
//!
//! ```no_run
//! use chat_tracker::config::{BrowserConfig, TrackerConfig};
//! use chat_tracker::surface::chrome::ChromeSurface;
//! use chat_tracker::tracker::{PrintHandler, track};
//!
//! if let Some(surface) = ChromeSurface::connect(&BrowserConfig::default())? {
//!     track(&surface, TrackerConfig::default(), PrintHandler)?;
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod inspector;
pub mod log_store;
pub mod models;
pub mod parsers;
pub mod surface;
pub mod tracker;

// Re-export commonly used types
pub use inspector::{check_ready, extract_messages};
pub use log_store::{append_log, read_log};
pub use models::ChatMessage;
pub use parsers::parse_annotation;
pub use tracker::{MessageHandler, Tracker, track};
