pub mod auth;
pub mod document;
pub mod editor;
pub mod health;
pub mod project;
pub mod slide;
pub mod template;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/register, /auth/login, /auth/refresh      public
/// /auth/logout
///
/// /projects                                       list, create
/// /projects/{id}                                  get (with details), update, delete
/// /projects/{project_id}/slides                   list, create
/// /slides/{id}                                    update (auto-save), delete
///
/// /templates, /templates/{id}                     read-only catalog
/// /documents, /documents/{id}                     CRUD
///
/// /editor/format                                  inline formatter
/// /editor/suggestions/apply                       style suggestions
/// /editor/analyze                                 readability report
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/projects", project::router())
        .nest("/slides", slide::router())
        .nest("/templates", template::router())
        .nest("/documents", document::router())
        .nest("/editor", editor::router())
}
