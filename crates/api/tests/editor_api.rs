//! Stateless editor endpoints: formatting, suggestions and readability.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json, post_json_auth, register};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn bold_wraps_the_selection(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "ada").await;

    let response = post_json_auth(
        app,
        "/api/v1/editor/format",
        json!({ "text": "hello world", "selection": { "start": 0, "end": 5 }, "command": "bold" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["text"], "**hello** world");
    assert_eq!(json["data"]["caret"], 9);
    assert_eq!(json["data"]["applied"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_command_leaves_text_alone(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "ada").await;

    let response = post_json_auth(
        app,
        "/api/v1/editor/format",
        json!({ "text": "hello", "selection": { "start": 1, "end": 3 }, "command": "strike" }),
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["text"], "hello");
    assert_eq!(json["data"]["caret"], 3);
    assert_eq!(json["data"]["applied"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn out_of_bounds_selection_is_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "ada").await;

    let response = post_json_auth(
        app,
        "/api/v1/editor/format",
        json!({ "text": "hi", "selection": { "start": 0, "end": 9 }, "command": "italic" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn structure_suggestion_replaces_buffer(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "ada").await;

    let response = post_json_auth(
        app,
        "/api/v1/editor/suggestions/apply",
        json!({
            "text": "old draft",
            "suggestion": { "type": "structure", "original": "", "suggestion": "New text" }
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["text"], "New text");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn analyze_reports_readability(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "ada").await;

    let response = post_json_auth(
        app,
        "/api/v1/editor/analyze",
        json!({ "text": "The cat sat on the mat." }),
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["word_count"], 6);
    assert_eq!(json["data"]["level"], "very_easy");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn editor_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/editor/analyze", json!({ "text": "hi" })).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
