//! System clipboard access for copying article links.

use arboard::Clipboard;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(#[source] arboard::Error),

    #[error("Failed to set clipboard text: {0}")]
    Write(#[source] arboard::Error),

    #[error("Article has no link")]
    NoLink,
}

/// Copies `link` to the system clipboard.
///
/// A fresh handle is opened per copy; headless sessions have no clipboard
/// and report `Unavailable`.
pub fn copy_link(link: Option<&str>) -> Result<(), ClipboardError> {
    let link = link
        .filter(|l| !l.trim().is_empty())
        .ok_or(ClipboardError::NoLink)?;
    let mut clipboard = Clipboard::new().map_err(ClipboardError::Unavailable)?;
    clipboard
        .set_text(link.to_string())
        .map_err(ClipboardError::Write)?;
    tracing::debug!(link, "copied link to clipboard");
    Ok(())
}
