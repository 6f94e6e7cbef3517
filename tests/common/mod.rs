//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Result, anyhow};
use chat_tracker::models::ChatMessage;
use chat_tracker::surface::{
    ANNOTATION_ATTRIBUTE, COPYABLE_SELECTOR, ChatSurface, IDENTITY_ATTRIBUTE, IDENTITY_SELECTOR,
    MAIN_SELECTOR, ROW_SELECTOR, SurfaceElement,
};
use tempfile::TempDir;

/// In-memory chat surface made of synthetic rows
pub struct FakeSurface {
    title: String,
    url: String,
    has_main: bool,
    rows: Vec<RowBuilder>,
    waits: RefCell<Vec<Duration>>,
    /// Row queries fail once this many waits have happened
    fail_after_waits: Option<usize>,
    row_queries: Cell<usize>,
}

impl FakeSurface {
    /// An open chat with no rows yet
    pub fn new() -> Self {
        Self {
            title: "(3) WhatsApp".to_string(),
            url: "https://web.whatsapp.com/".to_string(),
            has_main: true,
            rows: Vec::new(),
            waits: RefCell::new(Vec::new()),
            fail_after_waits: None,
            row_queries: Cell::new(0),
        }
    }

    /// A page where no conversation is open
    pub fn without_main() -> Self {
        Self { has_main: false, ..Self::new() }
    }

    pub fn with_row(mut self, row: RowBuilder) -> Self {
        self.rows.push(row);
        self
    }

    pub fn with_rows(mut self, rows: impl IntoIterator<Item = RowBuilder>) -> Self {
        self.rows.extend(rows);
        self
    }

    /// Simulate the browser connection dropping after `waits` poll cycles
    pub fn failing_after_waits(mut self, waits: usize) -> Self {
        self.fail_after_waits = Some(waits);
        self
    }

    pub fn push_row(&mut self, row: RowBuilder) {
        self.rows.push(row);
    }

    pub fn waits(&self) -> Vec<Duration> {
        self.waits.borrow().clone()
    }

    pub fn row_queries(&self) -> usize {
        self.row_queries.get()
    }
}

impl Default for FakeSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSurface for FakeSurface {
    type Element<'a> = FakeElement<'a>;

    fn url(&self) -> String {
        self.url.clone()
    }

    fn title(&self) -> Result<String> {
        Ok(self.title.clone())
    }

    fn query(&self, selector: &str) -> Result<Option<FakeElement<'_>>> {
        Ok(self.query_all(selector)?.into_iter().next())
    }

    fn query_all(&self, selector: &str) -> Result<Vec<FakeElement<'_>>> {
        match selector {
            MAIN_SELECTOR if self.has_main => Ok(vec![FakeElement::Main]),
            ROW_SELECTOR => {
                if let Some(limit) = self.fail_after_waits {
                    if self.waits.borrow().len() >= limit {
                        return Err(anyhow!("browser connection closed"));
                    }
                }
                self.row_queries.set(self.row_queries.get() + 1);
                Ok(self.rows.iter().map(FakeElement::Row).collect())
            }
            _ => Ok(Vec::new()),
        }
    }

    fn wait(&self, duration: Duration) {
        self.waits.borrow_mut().push(duration);
    }
}

pub enum FakeElement<'a> {
    Main,
    Row(&'a RowBuilder),
    Copyable(&'a CopyableText),
    Identity(&'a str),
}

impl SurfaceElement for FakeElement<'_> {
    fn query(&self, selector: &str) -> Result<Option<Self>> {
        Ok(self.query_all(selector)?.into_iter().next())
    }

    fn query_all(&self, selector: &str) -> Result<Vec<Self>> {
        let FakeElement::Row(row) = *self else {
            return Ok(Vec::new());
        };

        let found = match selector {
            COPYABLE_SELECTOR => row.copyable.as_ref().map(FakeElement::Copyable),
            IDENTITY_SELECTOR => row.uid.as_deref().map(FakeElement::Identity),
            _ => None,
        };
        Ok(found.into_iter().collect())
    }

    fn inner_text(&self) -> Result<String> {
        Ok(match self {
            FakeElement::Copyable(copyable) => copyable.text.clone(),
            FakeElement::Row(row) => row.label.clone(),
            _ => String::new(),
        })
    }

    fn attribute(&self, name: &str) -> Result<Option<String>> {
        Ok(match (self, name) {
            (FakeElement::Copyable(copyable), ANNOTATION_ATTRIBUTE) => copyable.annotation.clone(),
            (FakeElement::Identity(uid), IDENTITY_ATTRIBUTE) => Some(uid.to_string()),
            _ => None,
        })
    }
}

/// The copyable text element of a message row
#[derive(Clone)]
pub struct CopyableText {
    text: String,
    annotation: Option<String>,
}

/// Builder for rows of a [`FakeSurface`]
#[derive(Clone)]
pub struct RowBuilder {
    uid: Option<String>,
    copyable: Option<CopyableText>,
    label: String,
}

impl RowBuilder {
    /// A regular message row
    pub fn message(uid: &str, annotation: &str, text: &str) -> Self {
        Self {
            uid: Some(uid.to_string()),
            copyable: Some(CopyableText {
                text: text.to_string(),
                annotation: Some(annotation.to_string()),
            }),
            label: String::new(),
        }
    }

    /// A message row with the annotation built from parts
    pub fn from_parts(uid: &str, sender: &str, time: &str, date: &str, text: &str) -> Self {
        Self::message(uid, &format!("[{}, {}] {}: ", time, date, sender), text)
    }

    /// A date divider: no copyable text, no identity
    pub fn divider(label: &str) -> Self {
        Self { uid: None, copyable: None, label: label.to_string() }
    }

    /// Drop the annotation attribute from the copyable element
    pub fn without_annotation(mut self) -> Self {
        if let Some(copyable) = self.copyable.as_mut() {
            copyable.annotation = None;
        }
        self
    }

    /// Drop the identity element
    pub fn without_uid(mut self) -> Self {
        self.uid = None;
        self
    }
}

/// A temp directory holding the message log
pub struct LogDir {
    temp_dir: TempDir,
}

impl LogDir {
    pub fn new() -> Self {
        Self { temp_dir: TempDir::new().expect("Failed to create temp dir") }
    }

    pub fn path(&self) -> PathBuf {
        self.temp_dir.path().join("messages.jsonl")
    }

    /// Write raw content to the log file
    pub fn with_content(self, content: &str) -> Self {
        fs::write(self.path(), content).expect("Failed to write message log");
        self
    }

    pub fn lines(&self) -> Vec<String> {
        read_lines(&self.path())
    }
}

impl Default for LogDir {
    fn default() -> Self {
        Self::new()
    }
}

pub fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .map(|content| content.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Serialized log line for a message
pub fn log_line(uid: &str, text: &str, sender: &str, timestamp: &str) -> String {
    serde_json::to_string(&ChatMessage::new(uid, text, sender, timestamp))
        .expect("Failed to serialize message")
}

pub fn uids(messages: &[ChatMessage]) -> Vec<&str> {
    messages.iter().map(|message| message.uid.as_str()).collect()
}
