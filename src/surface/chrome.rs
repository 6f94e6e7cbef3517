//! [`ChatSurface`] backed by a tab of an already running Chromium.
//!
//! The browser has to be started with `--remote-debugging-port`. We attach to it
//! over the DevTools protocol and pick the first tab whose URL contains the
//! configured fragment.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use headless_chrome::browser::tab::NoElementFound;
use headless_chrome::{Browser, Element, Tab};
use serde::Deserialize;
use tracing::{debug, info};

use super::{ChatSurface, SurfaceElement};
use crate::config::BrowserConfig;

// Without browser-level events for this long, headless_chrome drops the connection
const IDLE_BROWSER_TIMEOUT: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Deserialize)]
struct DevToolsVersion {
    #[serde(rename = "webSocketDebuggerUrl")]
    web_socket_debugger_url: String,
}

/// Resolve a remote-debugging endpoint to the browser's WebSocket URL.
///
/// `ws://` and `wss://` endpoints are used as they are; an `http(s)://` endpoint
/// is asked for its `/json/version` document.
pub fn resolve_websocket_url(endpoint: &str) -> Result<String> {
    if endpoint.starts_with("ws://") || endpoint.starts_with("wss://") {
        return Ok(endpoint.to_string());
    }

    let version_url = format!("{}/json/version", endpoint.trim_end_matches('/'));
    let version: DevToolsVersion = reqwest::blocking::get(&version_url)
        .with_context(|| format!("Failed to reach DevTools endpoint: {}", version_url))?
        .error_for_status()
        .context("DevTools endpoint returned an error status")?
        .json()
        .context("Failed to parse DevTools version document")?;

    Ok(version.web_socket_debugger_url)
}

/// A connected browser plus the tab holding the chat
pub struct ChromeSurface {
    // Keeps the DevTools connection open for as long as the tab is used
    _browser: Browser,
    tab: Arc<Tab>,
}

impl ChromeSurface {
    /// Attach to the browser at `config.cdp_endpoint` and locate the chat tab.
    ///
    /// Returns `Ok(None)` when no open tab matches `config.url_match`.
    pub fn connect(config: &BrowserConfig) -> Result<Option<Self>> {
        let ws_url = resolve_websocket_url(&config.cdp_endpoint)?;
        debug!(%ws_url, "connecting to browser");

        let browser = Browser::connect_with_timeout(ws_url, IDLE_BROWSER_TIMEOUT)
            .context("Failed to connect to browser over DevTools")?;
        browser.register_missing_tabs();

        let tab = find_tab(&browser, &config.url_match)?;
        Ok(tab.map(|tab| Self { _browser: browser, tab }))
    }
}

fn find_tab(browser: &Browser, url_match: &str) -> Result<Option<Arc<Tab>>> {
    let tabs = browser.get_tabs().lock().map_err(|_| anyhow!("Browser tab list lock poisoned"))?;

    for tab in tabs.iter() {
        let url = tab.get_url();
        debug!(%url, "inspecting tab");
        if url.contains(url_match) {
            info!(%url, "found chat tab");
            return Ok(Some(Arc::clone(tab)));
        }
    }

    Ok(None)
}

/// `headless_chrome` reports "no match" as an error; the surface traits use `None`
fn none_if_missing<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.downcast_ref::<NoElementFound>().is_some() => Ok(None),
        Err(e) => Err(e),
    }
}

impl ChatSurface for ChromeSurface {
    type Element<'a> = ChromeElement<'a>;

    fn url(&self) -> String {
        self.tab.get_url()
    }

    fn title(&self) -> Result<String> {
        self.tab.get_title()
    }

    fn query(&self, selector: &str) -> Result<Option<ChromeElement<'_>>> {
        Ok(none_if_missing(self.tab.find_element(selector))?.map(ChromeElement))
    }

    fn query_all(&self, selector: &str) -> Result<Vec<ChromeElement<'_>>> {
        let elements = none_if_missing(self.tab.find_elements(selector))?.unwrap_or_default();
        Ok(elements.into_iter().map(ChromeElement).collect())
    }

    fn wait(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// An element of the chat tab
pub struct ChromeElement<'a>(Element<'a>);

impl SurfaceElement for ChromeElement<'_> {
    fn query(&self, selector: &str) -> Result<Option<Self>> {
        Ok(none_if_missing(self.0.find_element(selector))?.map(ChromeElement))
    }

    fn query_all(&self, selector: &str) -> Result<Vec<Self>> {
        let elements = none_if_missing(self.0.find_elements(selector))?.unwrap_or_default();
        Ok(elements.into_iter().map(ChromeElement).collect())
    }

    fn inner_text(&self) -> Result<String> {
        self.0.get_inner_text()
    }

    fn attribute(&self, name: &str) -> Result<Option<String>> {
        self.0.get_attribute_value(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_websocket_endpoint_is_used_directly() {
        let url = "ws://127.0.0.1:9222/devtools/browser/abc";
        assert_eq!(resolve_websocket_url(url).unwrap(), url);
    }

    #[test]
    fn test_devtools_version_document() {
        let json = r#"{
            "Browser": "Chrome/120.0.6099.109",
            "Protocol-Version": "1.3",
            "webSocketDebuggerUrl": "ws://localhost:21220/devtools/browser/7c1c"
        }"#;

        let version: DevToolsVersion = serde_json::from_str(json).unwrap();
        assert_eq!(version.web_socket_debugger_url, "ws://localhost:21220/devtools/browser/7c1c");
    }

    #[test]
    fn test_none_if_missing() {
        let missing: Result<u32> = Err(NoElementFound {}.into());
        assert!(none_if_missing(missing).unwrap().is_none());

        let other: Result<u32> = Err(anyhow!("connection closed"));
        assert!(none_if_missing(other).is_err());

        assert_eq!(none_if_missing(Ok(3)).unwrap(), Some(3));
    }
}
