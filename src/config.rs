//! Runtime settings for the tracker and the browser connection.
//!
//! Values come from the command line (with environment fallbacks, see
//! [`crate::cli`]); the `Default` impls hold the conventional values.

use std::path::PathBuf;
use std::time::Duration;

use crate::log_store::DEFAULT_LOG_FILENAME;

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_CDP_ENDPOINT: &str = "http://localhost:21220";
pub const DEFAULT_URL_MATCH: &str = "web.whatsapp.com";

/// Settings consumed by the polling loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Pause between two poll cycles
    pub poll_interval: Duration,
    pub log_path: PathBuf,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            log_path: PathBuf::from(DEFAULT_LOG_FILENAME),
        }
    }
}

/// Where the browser is and which tab holds the chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserConfig {
    /// Remote-debugging endpoint, `http://host:port` or a `ws://` URL
    pub cdp_endpoint: String,
    /// Substring of the chat tab's URL
    pub url_match: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            cdp_endpoint: DEFAULT_CDP_ENDPOINT.to_string(),
            url_match: DEFAULT_URL_MATCH.to_string(),
        }
    }
}
