//! Applying AI style suggestions to a slide's text.

use serde::{Deserialize, Serialize};

/// Category of a style suggestion. Unrecognised categories map to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum SuggestionKind {
    Emphasis,
    Hashtag,
    Emoji,
    Mention,
    Structure,
    Other,
}

impl From<String> for SuggestionKind {
    fn from(value: String) -> Self {
        SuggestionKind::from(value.as_str())
    }
}

impl From<&str> for SuggestionKind {
    fn from(value: &str) -> Self {
        match value {
            "emphasis" => SuggestionKind::Emphasis,
            "hashtag" => SuggestionKind::Hashtag,
            "emoji" => SuggestionKind::Emoji,
            "mention" => SuggestionKind::Mention,
            "structure" => SuggestionKind::Structure,
            _ => SuggestionKind::Other,
        }
    }
}

/// A transient suggestion produced by the style assistant. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StyleSuggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    /// Fragment of the current text the suggestion refers to. May be empty.
    #[serde(default)]
    pub original: String,
    pub suggestion: String,
}

/// Produce the new buffer after applying `suggestion` to `text`.
///
/// - `structure` replaces the whole buffer.
/// - `hashtag`, `emoji` and `mention` append to the trimmed buffer.
/// - Everything else replaces the first occurrence of `original`, falling
///   back to appending when `original` is empty or absent.
pub fn apply_suggestion(text: &str, suggestion: &StyleSuggestion) -> String {
    match suggestion.kind {
        SuggestionKind::Structure => suggestion.suggestion.clone(),
        SuggestionKind::Hashtag | SuggestionKind::Emoji | SuggestionKind::Mention => {
            append(text, &suggestion.suggestion)
        }
        SuggestionKind::Emphasis | SuggestionKind::Other => {
            if !suggestion.original.is_empty() && text.contains(&suggestion.original) {
                text.replacen(&suggestion.original, &suggestion.suggestion, 1)
            } else {
                append(text, &suggestion.suggestion)
            }
        }
    }
}

/// Append with exactly one separating space.
fn append(text: &str, addition: &str) -> String {
    let base = text.trim();
    let addition = addition.trim_start();
    if base.is_empty() {
        addition.to_string()
    } else {
        format!("{base} {addition}")
    }
}
