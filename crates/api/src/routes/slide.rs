use axum::routing::put;
use axum::Router;

use crate::handlers::slide;
use crate::state::AppState;

/// Routes mounted at `/slides`.
///
/// ```text
/// PUT    /{id} -> update (auto-save)
/// DELETE /{id} -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", put(slide::update).delete(slide::delete))
}
