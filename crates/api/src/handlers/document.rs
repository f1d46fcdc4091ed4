//! Handlers for the `/documents` resource (source material for carousels).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use carousel_core::error::CoreError;
use carousel_core::types::DbId;
use carousel_db::models::document::{CreateDocument, Document, UpdateDocument};
use carousel_db::repositories::DocumentRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/v1/documents
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateDocument>,
) -> AppResult<(StatusCode, Json<Document>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Document title must not be empty".into(),
        )));
    }
    let document = DocumentRepo::create(&state.pool, auth.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

/// GET /api/v1/documents
pub async fn list(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<Vec<Document>>> {
    Ok(Json(
        DocumentRepo::list_for_user(&state.pool, auth.user_id).await?,
    ))
}

/// GET /api/v1/documents/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Document>> {
    let document = DocumentRepo::find_owned(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::not_found("Document", id))?;
    Ok(Json(document))
}

/// PUT /api/v1/documents/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDocument>,
) -> AppResult<Json<Document>> {
    let document = DocumentRepo::update(&state.pool, id, auth.user_id, &input)
        .await?
        .ok_or(AppError::not_found("Document", id))?;
    Ok(Json(document))
}

/// DELETE /api/v1/documents/{id}
///
/// Projects referencing the document keep existing with `document_id` cleared.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if DocumentRepo::delete(&state.pool, id, auth.user_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Document", id))
    }
}
