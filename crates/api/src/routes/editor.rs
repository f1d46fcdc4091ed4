use axum::routing::post;
use axum::Router;

use crate::handlers::editor;
use crate::state::AppState;

/// Routes mounted at `/editor`.
///
/// ```text
/// POST /format            -> format
/// POST /suggestions/apply -> apply_style_suggestion
/// POST /analyze           -> analyze
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/format", post(editor::format))
        .route("/suggestions/apply", post(editor::apply_style_suggestion))
        .route("/analyze", post(editor::analyze))
}
