//! Parsers for the text formats found on the chat surface.
//!
//! # Error Handling Strategy
//!
//! Parsers here return a typed error ([`AnnotationError`]) instead of `anyhow::Error`
//! because the caller decides per variant what to do: the page inspector treats a
//! malformed annotation as "not a message row" and skips it with a warning.

pub mod annotation;

pub use annotation::{Annotation, AnnotationError, parse_annotation};
