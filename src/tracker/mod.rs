//! The polling loop.
//!
//! A [`Tracker`] is built once per run: it checks that the chat is open, seeds its
//! seen-set from the message log, then repeatedly extracts the visible messages,
//! appends the unseen ones to the log and hands them to a [`MessageHandler`].
//!
//! # Error Handling Strategy
//!
//! - **Start-up**: a chat that is not ready ends the run quietly; a malformed log
//!   line is fatal.
//! - **Per row**: rows that are not messages are skipped during extraction; a
//!   message row without an identity aborts the cycle and the run.
//! - **Handler**: failures are logged and the loop continues.

pub mod handler;
pub mod poller;

pub use handler::{JsonLinesHandler, MessageHandler, PrintHandler};
pub use poller::{Tracker, track};
