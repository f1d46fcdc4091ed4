//! Repository for the `projects` table.

use carousel_core::types::DbId;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use crate::models::document::Document;
use crate::models::project::{
    CreateProject, FetchStrategy, Project, ProjectDetails, UpdateProject,
};
use crate::models::slide::Slide;
use crate::models::template::Template;
use crate::repositories::{DocumentRepo, SlideRepo, TemplateRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, title, description, template_id, document_id, \
                       target_audience, created_at, updated_at";

/// Row shape of the aggregated project query.
#[derive(FromRow)]
struct JoinedProjectRow {
    #[sqlx(flatten)]
    project: Project,
    slides: Json<Vec<Slide>>,
    template: Option<Json<Template>>,
    document: Option<Json<Document>>,
}

/// Provides owner-scoped CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project for `user_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (user_id, title, description, template_id, document_id, target_audience)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.template_id)
            .bind(input.document_id)
            .bind(&input.target_audience)
            .fetch_one(pool)
            .await
    }

    /// Find a project by ID if it belongs to `user_id`.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List the caller's projects, most recently updated first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE user_id = $1 ORDER BY updated_at DESC, id DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update project metadata. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if the caller owns no project with the given `id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                template_id = CASE WHEN $8 THEN NULL ELSE COALESCE($5, template_id) END,
                document_id = CASE WHEN $9 THEN NULL ELSE COALESCE($6, document_id) END,
                target_audience = COALESCE($7, target_audience)
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.template_id)
            .bind(input.document_id)
            .bind(&input.target_audience)
            .bind(input.clear_template)
            .bind(input.clear_document)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project. Its slides go with it via `ON DELETE CASCADE`.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Fetch a project with its slides, template and document.
    ///
    /// Tries the single aggregated query first. If that query fails, the
    /// pieces are fetched independently and composed here; the result's
    /// `fetch_strategy` records which path produced it.
    pub async fn find_with_details(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<ProjectDetails>, sqlx::Error> {
        match Self::fetch_joined(pool, id, user_id).await {
            Ok(details) => Ok(details),
            Err(e) => {
                tracing::warn!(
                    project_id = id,
                    error = %e,
                    "Aggregated project query failed, composing from separate queries"
                );
                Self::fetch_composed(pool, id, user_id).await
            }
        }
    }

    /// Step one: a single query aggregating slides and references as JSON.
    pub async fn fetch_joined(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<ProjectDetails>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS},
                COALESCE(
                    (SELECT json_agg(s ORDER BY s.slide_number, s.id)
                     FROM slides s WHERE s.project_id = p.id),
                    '[]'::json
                ) AS slides,
                (SELECT row_to_json(t) FROM templates t WHERE t.id = p.template_id) AS template,
                (SELECT row_to_json(d) FROM documents d
                 WHERE d.id = p.document_id AND d.user_id = p.user_id) AS document
             FROM projects p
             WHERE p.id = $1 AND p.user_id = $2"
        );
        let row = sqlx::query_as::<_, JoinedProjectRow>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(|row| ProjectDetails {
            project: row.project,
            slides: row.slides.0,
            template: row.template.map(|t| t.0),
            document: row.document.map(|d| d.0),
            fetch_strategy: FetchStrategy::PreferredJoin,
        }))
    }

    /// Step two: independent fetches of each piece, composed in Rust.
    pub async fn fetch_composed(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<ProjectDetails>, sqlx::Error> {
        let Some(project) = Self::find_owned(pool, id, user_id).await? else {
            return Ok(None);
        };

        let slides = SlideRepo::list_by_project(pool, project.id).await?;
        let template = match project.template_id {
            Some(template_id) => TemplateRepo::find_by_id(pool, template_id).await?,
            None => None,
        };
        let document = match project.document_id {
            Some(document_id) => DocumentRepo::find_owned(pool, document_id, user_id).await?,
            None => None,
        };

        Ok(Some(ProjectDetails {
            project,
            slides,
            template,
            document,
            fetch_strategy: FetchStrategy::ManualComposition,
        }))
    }
}
