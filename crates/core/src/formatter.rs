//! Inline markup applied at a caret-defined selection.
//!
//! Each command splices the buffer at the selection and reports where the
//! caret should land afterwards. An empty selection inserts a ready-to-type
//! template (empty delimiter pair or placeholder) instead of wrapping text.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::text::{byte_offset, char_count};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Delimiter placed on each side of bold text.
pub const BOLD_DELIMITER: &str = "**";

/// Delimiter placed on each side of italic text.
pub const ITALIC_DELIMITER: &str = "*";

/// Inserted after `#` when a hashtag is requested with nothing selected.
pub const HASHTAG_PLACEHOLDER: &str = "hashtag";

/// Inserted after `@` when a mention is requested with nothing selected.
pub const MENTION_PLACEHOLDER: &str = "username";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Half-open character range `[start, end)` within a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// A collapsed selection (plain caret) at `position`.
    pub fn caret(position: usize) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A formatting command issued from the editor toolbar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatCommand {
    Bold,
    Italic,
    Hashtag,
    Mention,
    /// Replace the selection with arbitrary text (emoji picker, paste).
    Insert(String),
    /// Any command name the formatter does not know. Always a no-op.
    Unknown(String),
}

impl FormatCommand {
    /// Resolve a command by its toolbar name.
    ///
    /// `payload` is only read for `insert`; a missing payload inserts nothing.
    pub fn from_name(name: &str, payload: Option<String>) -> Self {
        match name {
            "bold" => FormatCommand::Bold,
            "italic" => FormatCommand::Italic,
            "hashtag" => FormatCommand::Hashtag,
            "mention" => FormatCommand::Mention,
            "insert" => FormatCommand::Insert(payload.unwrap_or_default()),
            other => FormatCommand::Unknown(other.to_string()),
        }
    }
}

/// Result of a formatting operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Formatted {
    pub text: String,
    /// Caret position in characters within `text`.
    pub caret: usize,
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Apply `command` to `text` at `selection`.
///
/// Returns `Ok(None)` for unknown commands: the buffer and caret stay as they
/// are and no save should be triggered. A reversed or out-of-bounds selection
/// is a validation error.
pub fn apply_format(
    text: &str,
    selection: Selection,
    command: &FormatCommand,
) -> Result<Option<Formatted>, CoreError> {
    let (start_byte, end_byte) = resolve_selection(text, selection)?;
    let selected = &text[start_byte..end_byte];

    let insertion = match command {
        FormatCommand::Bold => wrap(selected, BOLD_DELIMITER),
        FormatCommand::Italic => wrap(selected, ITALIC_DELIMITER),
        FormatCommand::Hashtag => prefix(selected, '#', HASHTAG_PLACEHOLDER),
        FormatCommand::Mention => prefix(selected, '@', MENTION_PLACEHOLDER),
        FormatCommand::Insert(inserted) => Insertion {
            caret: char_count(inserted),
            text: inserted.clone(),
        },
        FormatCommand::Unknown(_) => return Ok(None),
    };

    let mut result =
        String::with_capacity(text.len() - selected.len() + insertion.text.len());
    result.push_str(&text[..start_byte]);
    result.push_str(&insertion.text);
    result.push_str(&text[end_byte..]);

    Ok(Some(Formatted {
        text: result,
        caret: selection.start + insertion.caret,
    }))
}

/// Text to splice in, with the caret offset relative to its start.
struct Insertion {
    text: String,
    caret: usize,
}

fn wrap(selected: &str, delimiter: &str) -> Insertion {
    if selected.is_empty() {
        Insertion {
            text: delimiter.repeat(2),
            caret: char_count(delimiter),
        }
    } else {
        let text = format!("{delimiter}{selected}{delimiter}");
        Insertion {
            caret: char_count(&text),
            text,
        }
    }
}

fn prefix(selected: &str, marker: char, placeholder: &str) -> Insertion {
    let body = if selected.is_empty() {
        placeholder
    } else {
        selected
    };
    let text = format!("{marker}{body}");
    Insertion {
        caret: char_count(&text),
        text,
    }
}

/// Map a character selection onto byte offsets, rejecting invalid ranges.
fn resolve_selection(text: &str, selection: Selection) -> Result<(usize, usize), CoreError> {
    if selection.start > selection.end {
        return Err(CoreError::Validation(format!(
            "Selection start {} is after end {}",
            selection.start, selection.end
        )));
    }
    let out_of_bounds = || {
        CoreError::Validation(format!(
            "Selection {}..{} is outside a buffer of {} characters",
            selection.start,
            selection.end,
            char_count(text)
        ))
    };
    let start = byte_offset(text, selection.start).ok_or_else(out_of_bounds)?;
    let end = byte_offset(text, selection.end).ok_or_else(out_of_bounds)?;
    Ok((start, end))
}
