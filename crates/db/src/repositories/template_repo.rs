//! Repository for the `templates` catalog.

use carousel_core::types::DbId;
use sqlx::PgPool;

use crate::models::template::Template;

const COLUMNS: &str =
    "id, name, description, background_color, text_color, font_family, created_at, updated_at";

pub struct TemplateRepo;

impl TemplateRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<Template>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM templates ORDER BY name");
        sqlx::query_as::<_, Template>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Template>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM templates WHERE id = $1");
        sqlx::query_as::<_, Template>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
