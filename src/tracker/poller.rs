use std::collections::HashSet;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use super::handler::MessageHandler;
use crate::config::TrackerConfig;
use crate::inspector::{Readiness, check_ready, extract_messages};
use crate::log_store::{append_log, read_log};
use crate::models::ChatMessage;
use crate::surface::ChatSurface;

/// Polls a chat surface and forwards messages it has not seen before.
///
/// The seen-set holds the uid of every logged message and is never pruned, so
/// memory grows with the length of the conversation history.
pub struct Tracker<H> {
    config: TrackerConfig,
    handler: H,
    seen: HashSet<String>,
}

impl<H: MessageHandler> Tracker<H> {
    /// Create a tracker whose seen-set is seeded with `known` messages
    pub fn new(config: TrackerConfig, handler: H, known: &[ChatMessage]) -> Self {
        let seen = known.iter().map(|message| message.uid.clone()).collect();
        Self { config, handler, seen }
    }

    /// Check the surface once and load the message log.
    ///
    /// Returns `Ok(None)` when the chat is not ready; readiness is not retried.
    ///
    /// # Errors
    ///
    /// Fails when the browser cannot be queried or the log contains a malformed line.
    pub fn start<S: ChatSurface>(
        surface: &S,
        config: TrackerConfig,
        handler: H,
    ) -> Result<Option<Self>> {
        let title = surface.title()?;
        info!(%title, url = %surface.url(), "attached to chat page");

        match check_ready(surface)? {
            Readiness::Ready => {}
            Readiness::MissingMain => {
                warn!("Main element not found");
                warn!("Chat is not open");
                return Ok(None);
            }
            Readiness::NoRows => {
                warn!("Chat is not open");
                return Ok(None);
            }
        }

        let known = read_log(&config.log_path).with_context(|| {
            format!("Failed to load message log: {}", config.log_path.display())
        })?;
        info!(path = %config.log_path.display(), known = known.len(), "loaded message log");

        Ok(Some(Self::new(config, handler, &known)))
    }

    /// Run one poll cycle and return the messages that were new.
    ///
    /// New messages are persisted before the handler sees them. A handler error is
    /// logged and does not stop the cycle; the message stays logged and is not
    /// delivered again.
    pub fn poll_once<S: ChatSurface>(&mut self, surface: &S) -> Result<Vec<ChatMessage>> {
        let extracted = extract_messages(surface)?;
        debug!(count = extracted.len(), "extracted messages");

        // A uid repeated within one extraction is delivered once, first occurrence wins
        let mut batch = HashSet::new();
        let mut fresh = Vec::new();
        for message in extracted {
            if self.seen.contains(&message.uid) || !batch.insert(message.uid.clone()) {
                continue;
            }
            fresh.push(message);
        }

        if fresh.is_empty() {
            return Ok(fresh);
        }

        append_log(&self.config.log_path, &fresh)?;
        self.seen.extend(batch);

        for message in &fresh {
            info!(uid = %message.uid, sender = %message.sender, "new message");
            if let Err(e) = self.handler.on_message(message) {
                warn!(uid = %message.uid, "message handler failed: {:#}", e);
            }
        }

        Ok(fresh)
    }

    /// Poll forever, pausing `poll_interval` between cycles.
    ///
    /// Only returns when a poll cycle fails.
    pub fn run<S: ChatSurface>(&mut self, surface: &S) -> Result<()> {
        loop {
            self.poll_once(surface)?;
            surface.wait(self.config.poll_interval);
        }
    }

    /// Number of distinct uids seen so far, including those loaded from the log
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    pub fn has_seen(&self, uid: &str) -> bool {
        self.seen.contains(uid)
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }
}

/// Start a tracker on `surface` and poll until an error occurs.
///
/// Returns `Ok(())` right away when the chat is not ready at start-up.
pub fn track<S: ChatSurface, H: MessageHandler>(
    surface: &S,
    config: TrackerConfig,
    handler: H,
) -> Result<()> {
    match Tracker::start(surface, config, handler)? {
        Some(mut tracker) => tracker.run(surface),
        None => Ok(()),
    }
}
