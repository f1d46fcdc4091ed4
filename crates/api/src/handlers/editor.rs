//! Stateless text operations backing the editor toolbar.
//!
//! These do not touch storage; the client persists the returned buffer
//! through the normal slide auto-save.

use axum::Json;
use carousel_core::formatter::{apply_format, FormatCommand, Selection};
use carousel_core::readability::{analyze as analyze_text, ReadabilityReport};
use carousel_core::suggestion::{apply_suggestion, StyleSuggestion};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;

#[derive(Debug, Deserialize)]
pub struct FormatRequest {
    pub text: String,
    pub selection: Selection,
    /// Toolbar command name: `bold`, `italic`, `hashtag`, `mention`, `insert`.
    pub command: String,
    /// Text to splice in for `insert`.
    pub payload: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FormatResponse {
    pub text: String,
    pub caret: usize,
    /// `false` when the command was not recognised and nothing changed.
    pub applied: bool,
}

#[derive(Debug, Deserialize)]
pub struct SuggestionRequest {
    pub text: String,
    pub suggestion: StyleSuggestion,
}

#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

/// POST /api/v1/editor/format
pub async fn format(
    _auth: AuthUser,
    Json(input): Json<FormatRequest>,
) -> AppResult<Json<DataResponse<FormatResponse>>> {
    let command = FormatCommand::from_name(&input.command, input.payload);
    let data = match apply_format(&input.text, input.selection, &command)? {
        Some(formatted) => FormatResponse {
            text: formatted.text,
            caret: formatted.caret,
            applied: true,
        },
        None => {
            tracing::debug!(command = %input.command, "Ignoring unknown format command");
            FormatResponse {
                text: input.text,
                caret: input.selection.end,
                applied: false,
            }
        }
    };
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/editor/suggestions/apply
pub async fn apply_style_suggestion(
    _auth: AuthUser,
    Json(input): Json<SuggestionRequest>,
) -> AppResult<Json<DataResponse<SuggestionResponse>>> {
    let text = apply_suggestion(&input.text, &input.suggestion);
    Ok(Json(DataResponse {
        data: SuggestionResponse { text },
    }))
}

/// POST /api/v1/editor/analyze
pub async fn analyze(
    _auth: AuthUser,
    Json(input): Json<AnalyzeRequest>,
) -> AppResult<Json<DataResponse<ReadabilityReport>>> {
    Ok(Json(DataResponse {
        data: analyze_text(&input.text),
    }))
}
