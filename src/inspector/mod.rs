//! Reading messages off a chat surface.
//!
//! - [`check_ready`] - Is a conversation open with rows rendered?
//! - [`extract_messages`] - Turn the rendered rows into [`ChatMessage`]s
//!
//! [`ChatMessage`]: crate::models::ChatMessage

pub mod extract;
pub mod readiness;

pub use extract::extract_messages;
pub use readiness::{Readiness, check_ready};
