//! Template catalog model. Templates are shared and read-only.

use carousel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `templates` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Template {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub background_color: String,
    pub text_color: String,
    pub font_family: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
