//! Slide value type as seen by the editor.

use serde::{Deserialize, Serialize};

use crate::text::char_count;
use crate::types::{DbId, Timestamp};

/// Hard cap on the number of slides in one carousel.
pub const MAX_SLIDES: usize = 10;

/// A slide as returned by the API and held in editor state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub id: DbId,
    pub project_id: DbId,
    pub slide_number: i32,
    pub title: Option<String>,
    pub content: String,
    pub char_count: i32,
    pub tone: Option<String>,
    /// Revision of the last save applied to this row.
    pub revision: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Slide {
    /// Replace the content, keeping `char_count` and `updated_at` in step.
    pub fn set_content(&mut self, content: String, now: Timestamp) {
        self.char_count = stored_char_count(&content);
        self.content = content;
        self.updated_at = now;
    }
}

/// Request to create a slide under a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSlide {
    pub project_id: DbId,
    pub slide_number: i32,
    pub content: String,
    pub title: Option<String>,
    pub tone: Option<String>,
}

/// Character count as stored in the `char_count` INTEGER column.
pub fn stored_char_count(content: &str) -> i32 {
    i32::try_from(char_count(content)).unwrap_or(i32::MAX)
}

/// Sort slides into display order: `slide_number`, ties broken by `id`.
pub fn sort_for_display(slides: &mut [Slide]) {
    slides.sort_by_key(|s| (s.slide_number, s.id));
}

/// Next slide number for a collection of `len` slides.
pub fn next_slide_number(len: usize) -> i32 {
    i32::try_from(len + 1).unwrap_or(i32::MAX)
}
