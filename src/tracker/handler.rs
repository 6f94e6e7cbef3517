use std::io::Write;

use anyhow::{Context, Result};

use crate::models::ChatMessage;

/// Receives each newly detected message, once, in detection order
pub trait MessageHandler {
    fn on_message(&mut self, message: &ChatMessage) -> Result<()>;
}

impl<F> MessageHandler for F
where
    F: FnMut(&ChatMessage) -> Result<()>,
{
    fn on_message(&mut self, message: &ChatMessage) -> Result<()> {
        self(message)
    }
}

/// Prints a human-readable line per message to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct PrintHandler;

impl MessageHandler for PrintHandler {
    fn on_message(&mut self, message: &ChatMessage) -> Result<()> {
        println!("New message: {}", message);
        Ok(())
    }
}

/// Writes each message as one JSON line, for piping into other tools
pub struct JsonLinesHandler<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesHandler<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MessageHandler for JsonLinesHandler<W> {
    fn on_message(&mut self, message: &ChatMessage) -> Result<()> {
        serde_json::to_writer(&mut self.writer, message).context("Failed to serialize message")?;
        self.writer.write_all(b"\n").context("Failed to write message")?;
        self.writer.flush().context("Failed to flush message output")
    }
}
