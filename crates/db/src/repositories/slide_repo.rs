//! Repository for the `slides` table.
//!
//! Slides are owned through their project: every scoped query joins
//! `projects` and filters on `projects.user_id`.

use carousel_core::slide::{stored_char_count, MAX_SLIDES};
use carousel_core::types::DbId;
use sqlx::PgPool;

use crate::models::slide::{CreateSlide, Slide, SlideUpdate, UpdateSlide};

const COLUMNS: &str = "id, project_id, slide_number, title, content, char_count, tone, \
                       revision, created_at, updated_at";

/// [`COLUMNS`] qualified with the `s` alias for joined statements.
const S_COLUMNS: &str = "s.id, s.project_id, s.slide_number, s.title, s.content, s.char_count, \
                         s.tone, s.revision, s.created_at, s.updated_at";

pub struct SlideRepo;

impl SlideRepo {
    /// Insert a slide under a project owned by `user_id`.
    ///
    /// Returns `None` when the project is not owned by the caller or already
    /// holds [`MAX_SLIDES`] slides. The project row is locked for the count
    /// and insert, so concurrent creates on one project are serialized.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        project_id: DbId,
        input: &CreateSlide,
    ) -> Result<Option<Slide>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let owned: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM projects WHERE id = $1 AND user_id = $2 FOR UPDATE")
                .bind(project_id)
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await?;
        if owned.is_none() {
            return Ok(None);
        }

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM slides WHERE project_id = $1")
            .bind(project_id)
            .fetch_one(&mut *tx)
            .await?;
        if count >= MAX_SLIDES as i64 {
            tracing::debug!(project_id, count, "Slide cap reached");
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO slides (project_id, slide_number, title, content, char_count, tone)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let slide = sqlx::query_as::<_, Slide>(&query)
            .bind(project_id)
            .bind(input.slide_number)
            .bind(&input.title)
            .bind(&input.content)
            .bind(stored_char_count(&input.content))
            .bind(input.tone.as_deref().filter(|t| !t.is_empty()))
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(slide))
    }

    /// List a project's slides in display order.
    ///
    /// Not owner-scoped: callers must have verified project ownership.
    pub async fn list_by_project(pool: &PgPool, project_id: DbId) -> Result<Vec<Slide>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM slides WHERE project_id = $1 ORDER BY slide_number, id"
        );
        sqlx::query_as::<_, Slide>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    pub async fn count_by_project(pool: &PgPool, project_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM slides WHERE project_id = $1")
            .bind(project_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Slide>, sqlx::Error> {
        let query = format!(
            "SELECT {S_COLUMNS} FROM slides s
             JOIN projects p ON p.id = s.project_id
             WHERE s.id = $1 AND p.user_id = $2"
        );
        sqlx::query_as::<_, Slide>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Apply an auto-save. Only non-`None` fields are written and
    /// `char_count` is recomputed from the new content.
    ///
    /// With a revision, the row is only touched when the stored revision is
    /// older; otherwise the result is [`SlideUpdate::Stale`].
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateSlide,
    ) -> Result<SlideUpdate, sqlx::Error> {
        let query = format!(
            "UPDATE slides s SET
                content = COALESCE($3, s.content),
                char_count = COALESCE($4, s.char_count),
                title = COALESCE($5, s.title),
                tone = CASE WHEN $6::text IS NULL THEN s.tone ELSE NULLIF($6::text, '') END,
                revision = COALESCE($7, s.revision)
             FROM projects p
             WHERE s.id = $1 AND s.project_id = p.id AND p.user_id = $2
               AND ($7::bigint IS NULL OR s.revision < $7::bigint)
             RETURNING {S_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Slide>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.content)
            .bind(input.content.as_deref().map(stored_char_count))
            .bind(&input.title)
            .bind(&input.tone)
            .bind(input.revision)
            .fetch_optional(pool)
            .await?;

        if let Some(slide) = updated {
            return Ok(SlideUpdate::Updated(slide));
        }

        // No row matched: either the slide is gone/foreign or the revision lost.
        if input.revision.is_some() && Self::find_owned(pool, id, user_id).await?.is_some() {
            tracing::debug!(slide_id = id, revision = ?input.revision, "Ignoring stale slide save");
            return Ok(SlideUpdate::Stale);
        }
        Ok(SlideUpdate::NotFound)
    }

    /// Delete a slide owned (through its project) by `user_id`.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM slides s USING projects p
             WHERE s.id = $1 AND s.project_id = p.id AND p.user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
