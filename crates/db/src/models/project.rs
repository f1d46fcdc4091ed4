//! Project entity model and DTOs.

use carousel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::document::Document;
use crate::models::slide::Slide;
use crate::models::template::Template;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Project {
    pub id: DbId,
    /// Owner. Every query is scoped by this column.
    pub user_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub template_id: Option<DbId>,
    pub document_id: Option<DbId>,
    pub target_audience: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project. The owner comes from the session.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub description: Option<String>,
    pub template_id: Option<DbId>,
    pub document_id: Option<DbId>,
    pub target_audience: Option<String>,
}

/// DTO for updating project metadata. All fields are optional.
///
/// An absent reference is left as is; `clear_template` / `clear_document`
/// detach one and win over a new id sent alongside.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub template_id: Option<DbId>,
    pub document_id: Option<DbId>,
    pub target_audience: Option<String>,
    #[serde(default)]
    pub clear_template: bool,
    #[serde(default)]
    pub clear_document: bool,
}

/// How a [`ProjectDetails`] was assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchStrategy {
    /// One aggregated query returned everything.
    PreferredJoin,
    /// The aggregated query failed; pieces were fetched separately.
    ManualComposition,
}

/// A project with its slides (display order), template and document.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetails {
    #[serde(flatten)]
    pub project: Project,
    pub slides: Vec<Slide>,
    pub template: Option<Template>,
    pub document: Option<Document>,
    pub fetch_strategy: FetchStrategy,
}
