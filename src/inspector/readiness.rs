use anyhow::Result;
use tracing::debug;

use crate::surface::{ChatSurface, MAIN_SELECTOR, ROW_SELECTOR};

/// Whether a chat surface can be scraped right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    /// No conversation is open (the main content anchor is missing)
    MissingMain,
    /// A conversation is open but no rows have rendered
    NoRows,
}

impl Readiness {
    pub fn is_ready(self) -> bool {
        matches!(self, Readiness::Ready)
    }
}

/// Check the surface for the main anchor, then for at least one row.
///
/// The result is never cached: the user can close or switch the chat at any time.
pub fn check_ready<S: ChatSurface>(surface: &S) -> Result<Readiness> {
    if surface.query(MAIN_SELECTOR)?.is_none() {
        debug!("main content element not found");
        return Ok(Readiness::MissingMain);
    }

    if surface.query_all(ROW_SELECTOR)?.is_empty() {
        debug!("chat has no rows");
        return Ok(Readiness::NoRows);
    }

    Ok(Readiness::Ready)
}
