//! Slide entity model and DTOs.

use carousel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `slides` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Slide {
    pub id: DbId,
    pub project_id: DbId,
    pub slide_number: i32,
    pub title: Option<String>,
    pub content: String,
    /// Always derived from `content` on write.
    pub char_count: i32,
    pub tone: Option<String>,
    pub revision: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a slide. `project_id` comes from the URL path.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSlide {
    pub slide_number: i32,
    #[serde(default)]
    pub content: String,
    pub title: Option<String>,
    pub tone: Option<String>,
}

/// DTO for the auto-save path. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSlide {
    pub content: Option<String>,
    pub title: Option<String>,
    /// `Some("")` clears the tone; `None` leaves it unchanged.
    pub tone: Option<String>,
    /// Save sequence number. When present the write only applies if it is
    /// newer than the stored revision.
    pub revision: Option<i64>,
}

/// Result of a revision-guarded slide update.
#[derive(Debug)]
pub enum SlideUpdate {
    Updated(Slide),
    /// The stored revision is at least as new as the incoming one.
    Stale,
    NotFound,
}
