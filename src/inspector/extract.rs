use anyhow::{Context, Result, anyhow};
use tracing::{trace, warn};

use crate::models::ChatMessage;
use crate::parsers::parse_annotation;
use crate::surface::{
    ANNOTATION_ATTRIBUTE, COPYABLE_SELECTOR, ChatSurface, IDENTITY_ATTRIBUTE, IDENTITY_SELECTOR,
    ROW_SELECTOR, SurfaceElement,
};

/// Extract every message currently rendered on the surface, in document order.
///
/// Rows without a copyable text element, or whose copyable element has no
/// annotation, are not messages (date dividers, system notices) and are skipped.
/// A row with an unparsable annotation is skipped with a warning.
///
/// # Errors
///
/// Fails when a message row has no identity attribute, since without a uid the
/// message cannot be deduplicated. The whole extraction is aborted in that case.
pub fn extract_messages<S: ChatSurface>(surface: &S) -> Result<Vec<ChatMessage>> {
    let rows = surface.query_all(ROW_SELECTOR)?;
    let mut messages = Vec::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        if let Some(message) = extract_row(row, index)? {
            messages.push(message);
        }
    }

    Ok(messages)
}

fn extract_row<E: SurfaceElement>(row: &E, index: usize) -> Result<Option<ChatMessage>> {
    let Some(copyable) = row.query(COPYABLE_SELECTOR)? else {
        trace!(row = index, "row has no copyable text");
        return Ok(None);
    };

    let text = copyable.inner_text()?;

    let Some(raw_annotation) = copyable.attribute(ANNOTATION_ATTRIBUTE)? else {
        trace!(row = index, "row has no annotation");
        return Ok(None);
    };

    let annotation = match parse_annotation(&raw_annotation) {
        Ok(annotation) => annotation,
        Err(e) => {
            warn!(row = index, annotation = %raw_annotation, "skipping row: {}", e);
            return Ok(None);
        }
    };

    let uid = row
        .query(IDENTITY_SELECTOR)?
        .map(|element| element.attribute(IDENTITY_ATTRIBUTE))
        .transpose()?
        .flatten()
        .ok_or_else(|| anyhow!("Message row {} has no {} attribute", index, IDENTITY_ATTRIBUTE))
        .with_context(|| format!("Failed to identify message from {}", annotation.sender))?;

    let timestamp = annotation.timestamp();
    Ok(Some(ChatMessage::new(uid, text, annotation.sender, timestamp)))
}
