//! Capabilities the tracker needs from a rendered chat.
//!
//! The core never talks to a browser directly. It works against [`ChatSurface`] and
//! [`SurfaceElement`], which cover exactly what the scraper uses: selector queries,
//! visible text, attribute reads and a blocking pause. The [`chrome`] module
//! implements them on a live `headless_chrome` tab; tests implement them on
//! synthetic rows.

pub mod chrome;

use std::time::Duration;

use anyhow::Result;

/// Anchor element that only exists while a conversation is open
pub const MAIN_SELECTOR: &str = "#main";
/// One chat-log entry: a message, a date divider or a system notice
pub const ROW_SELECTOR: &str = "[role=\"row\"]";
/// Child of a row carrying the plain message text and its annotation
pub const COPYABLE_SELECTOR: &str = ".copyable-text";
/// Element within a row carrying the message identity
pub const IDENTITY_SELECTOR: &str = "[data-id]";

/// Attribute on the copyable element, e.g. `[6:34 pm, 01/03/2024] Dmytro Karpovych: `
pub const ANNOTATION_ATTRIBUTE: &str = "data-pre-plain-text";
/// Attribute holding the uid the chat assigned to the message
pub const IDENTITY_ATTRIBUTE: &str = "data-id";

/// A handle to the rendered chat, typically one browser tab
pub trait ChatSurface {
    type Element<'a>: SurfaceElement
    where
        Self: 'a;

    /// Current address of the surface
    fn url(&self) -> String;

    fn title(&self) -> Result<String>;

    /// First element matching `selector`, or `None` when nothing matches
    fn query(&self, selector: &str) -> Result<Option<Self::Element<'_>>>;

    /// All elements matching `selector` in document order
    fn query_all(&self, selector: &str) -> Result<Vec<Self::Element<'_>>>;

    /// Block the calling thread for `duration`
    fn wait(&self, duration: Duration);
}

/// An element found on a [`ChatSurface`]
pub trait SurfaceElement: Sized {
    /// First descendant matching `selector`
    fn query(&self, selector: &str) -> Result<Option<Self>>;

    fn query_all(&self, selector: &str) -> Result<Vec<Self>>;

    /// Rendered (visible) text of the element
    fn inner_text(&self) -> Result<String>;

    /// Value of attribute `name`, `None` when the attribute is absent
    fn attribute(&self, name: &str) -> Result<Option<String>>;
}
