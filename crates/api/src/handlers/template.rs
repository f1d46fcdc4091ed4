//! Read-only handlers for the `/templates` catalog.

use axum::extract::{Path, State};
use axum::Json;
use carousel_core::types::DbId;
use carousel_db::models::template::Template;
use carousel_db::repositories::TemplateRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/templates
pub async fn list(State(state): State<AppState>, _auth: AuthUser) -> AppResult<Json<Vec<Template>>> {
    Ok(Json(TemplateRepo::list(&state.pool).await?))
}

/// GET /api/v1/templates/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Template>> {
    let template = TemplateRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Template", id))?;
    Ok(Json(template))
}
