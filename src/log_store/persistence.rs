//! Log persistence: read-back and batched appends of JSON lines

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::models::ChatMessage;

/// Read every message recorded in the log at `path`, in file order.
///
/// A missing file is an empty log. Blank lines are skipped; any other line that
/// fails to parse aborts the whole read, since a seen-set built from a partially
/// read log would re-deliver messages.
pub fn read_log(path: &Path) -> Result<Vec<ChatMessage>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "message log does not exist yet");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to open message log: {}", path.display()));
        }
    };

    let reader = BufReader::new(file);
    let mut messages = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read line from message log")?;

        if line.trim().is_empty() {
            continue;
        }

        let message: ChatMessage = serde_json::from_str(&line).with_context(|| {
            format!("Malformed entry on line {} of message log {}", line_num + 1, path.display())
        })?;
        messages.push(message);
    }

    debug!(path = %path.display(), count = messages.len(), "loaded message log");
    Ok(messages)
}

/// Append `messages` to the log at `path`, one JSON object per line.
///
/// Every line goes out in a single `write_all` and the file is synced before
/// returning, so lines from earlier batches are never left half-written.
pub fn append_log(path: &Path, messages: &[ChatMessage]) -> Result<()> {
    if messages.is_empty() {
        return Ok(());
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open message log for append: {}", path.display()))?;

    for message in messages {
        let mut line = serde_json::to_string(message).context("Failed to serialize message")?;
        line.push('\n');
        file.write_all(line.as_bytes())
            .with_context(|| format!("Failed to write to message log: {}", path.display()))?;
    }

    file.flush().context("Failed to flush message log")?;
    file.sync_data().context("Failed to sync message log")?;

    debug!(path = %path.display(), count = messages.len(), "appended to message log");
    Ok(())
}
