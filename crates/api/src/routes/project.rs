//! Route definitions for the `/projects` resource and its nested slides.

use axum::routing::get;
use axum::Router;

use crate::handlers::{project, slide};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /{id}                      -> get_by_id (with slides, template, document)
/// PUT    /{id}                      -> update
/// DELETE /{id}                      -> delete
///
/// GET    /{project_id}/slides       -> slide::list_by_project
/// POST   /{project_id}/slides       -> slide::create
/// ```
pub fn router() -> Router<AppState> {
    let slide_routes =
        Router::new().route("/", get(slide::list_by_project).post(slide::create));

    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .nest("/{project_id}/slides", slide_routes)
}
