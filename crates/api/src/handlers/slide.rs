//! Handlers for slides: nested under `/projects/{project_id}/slides` for
//! listing and creation, flat under `/slides/{id}` for auto-save and delete.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use carousel_core::error::CoreError;
use carousel_core::slide::MAX_SLIDES;
use carousel_core::types::DbId;
use carousel_db::models::slide::{CreateSlide, Slide, SlideUpdate, UpdateSlide};
use carousel_db::repositories::{ProjectRepo, SlideRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/projects/{project_id}/slides
pub async fn list_by_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<Slide>>> {
    ensure_project_owned(&state, project_id, auth.user_id).await?;
    let slides = SlideRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(slides))
}

/// POST /api/v1/projects/{project_id}/slides
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateSlide>,
) -> AppResult<(StatusCode, Json<Slide>)> {
    if input.slide_number < 1 {
        return Err(AppError::Core(CoreError::Validation(
            "slide_number must be positive".into(),
        )));
    }
    ensure_project_owned(&state, project_id, auth.user_id).await?;

    if SlideRepo::count_by_project(&state.pool, project_id).await? >= MAX_SLIDES as i64 {
        return Err(capacity_reached());
    }

    // Re-checked under the project row lock.
    let slide = SlideRepo::create(&state.pool, auth.user_id, project_id, &input)
        .await?
        .ok_or_else(capacity_reached)?;

    tracing::info!(
        user_id = auth.user_id,
        project_id,
        slide_id = slide.id,
        slide_number = slide.slide_number,
        "Created slide"
    );
    Ok((StatusCode::CREATED, Json(slide)))
}

/// PUT /api/v1/slides/{id}
///
/// The auto-save target. A save whose revision is not newer than the stored
/// one is rejected with 409 and leaves the row untouched.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSlide>,
) -> AppResult<Json<Slide>> {
    match SlideRepo::update(&state.pool, id, auth.user_id, &input).await? {
        SlideUpdate::Updated(slide) => Ok(Json(slide)),
        SlideUpdate::Stale => Err(AppError::Core(CoreError::Conflict(format!(
            "Slide {id} already has a newer save"
        )))),
        SlideUpdate::NotFound => Err(AppError::not_found("Slide", id)),
    }
}

/// DELETE /api/v1/slides/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if SlideRepo::delete(&state.pool, id, auth.user_id).await? {
        tracing::info!(user_id = auth.user_id, slide_id = id, "Deleted slide");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Slide", id))
    }
}

async fn ensure_project_owned(state: &AppState, project_id: DbId, user_id: DbId) -> AppResult<()> {
    ProjectRepo::find_owned(&state.pool, project_id, user_id)
        .await?
        .ok_or(AppError::not_found("Project", project_id))?;
    Ok(())
}

fn capacity_reached() -> AppError {
    AppError::Core(CoreError::Conflict(format!(
        "A carousel holds at most {MAX_SLIDES} slides"
    )))
}
