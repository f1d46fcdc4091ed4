//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use carousel_core::error::CoreError;
use carousel_core::types::DbId;
use carousel_db::models::project::{CreateProject, Project, ProjectDetails, UpdateProject};
use carousel_db::repositories::{DocumentRepo, ProjectRepo, TemplateRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    validate_title(Some(&input.title))?;
    check_references(&state, auth.user_id, input.template_id, input.document_id).await?;

    let project = ProjectRepo::create(&state.pool, auth.user_id, &input).await?;
    tracing::info!(user_id = auth.user_id, project_id = project.id, "Created project");
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects
pub async fn list(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(projects))
}

/// GET /api/v1/projects/{id}
///
/// The project with its slides in display order, template and document.
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectDetails>> {
    let details = ProjectRepo::find_with_details(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::not_found("Project", id))?;
    Ok(Json(details))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    validate_title(input.title.as_deref())?;
    check_references(&state, auth.user_id, input.template_id, input.document_id).await?;

    let project = ProjectRepo::update(&state.pool, id, auth.user_id, &input)
        .await?
        .ok_or(AppError::not_found("Project", id))?;
    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id}
///
/// Slides go with the project through `ON DELETE CASCADE`.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ProjectRepo::delete(&state.pool, id, auth.user_id).await? {
        tracing::info!(user_id = auth.user_id, project_id = id, "Deleted project");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Project", id))
    }
}

fn validate_title(title: Option<&str>) -> AppResult<()> {
    match title {
        Some(t) if t.trim().is_empty() => Err(AppError::Core(CoreError::Validation(
            "Project title must not be empty".into(),
        ))),
        _ => Ok(()),
    }
}

/// A referenced template must exist and a referenced document must belong
/// to the caller.
async fn check_references(
    state: &AppState,
    user_id: DbId,
    template_id: Option<DbId>,
    document_id: Option<DbId>,
) -> AppResult<()> {
    if let Some(template_id) = template_id {
        TemplateRepo::find_by_id(&state.pool, template_id)
            .await?
            .ok_or(AppError::not_found("Template", template_id))?;
    }
    if let Some(document_id) = document_id {
        DocumentRepo::find_owned(&state.pool, document_id, user_id)
            .await?
            .ok_or(AppError::not_found("Document", document_id))?;
    }
    Ok(())
}
