//! Character-offset helpers.
//!
//! Lengths, carets and selections are all measured in Unicode scalar values
//! so that a caret never lands inside a multi-byte character.

/// Number of characters in `text`. This is the value stored as `char_count`.
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Convert a character offset into a byte offset.
///
/// The offset equal to the character count maps to `text.len()`. Returns
/// `None` past the end.
pub fn byte_offset(text: &str, char_offset: usize) -> Option<usize> {
    text.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .nth(char_offset)
}
