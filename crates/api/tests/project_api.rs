//! Project and slide endpoints: ownership scoping, the slide cap, revision
//! guarded auto-save and project details.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_project, create_slide, delete_auth, get_auth, post_json_auth, put_json_auth,
    register,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn projects_are_invisible_to_other_users(pool: PgPool) {
    let app = common::build_test_app(pool);
    let owner = register(app.clone(), "owner").await;
    let intruder = register(app.clone(), "intruder").await;
    let project_id = create_project(app.clone(), &owner, "Launch week").await;

    let uri = format!("/api/v1/projects/{project_id}");
    let response = get_auth(app.clone(), &uri, &intruder).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = put_json_auth(app.clone(), &uri, json!({ "title": "Mine now" }), &intruder).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app.clone(), &uri, &intruder).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let list = body_json(get_auth(app.clone(), "/api/v1/projects", &intruder).await).await;
    assert_eq!(list.as_array().unwrap().len(), 0);

    let list = body_json(get_auth(app, "/api/v1/projects", &owner).await).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn project_details_nest_sorted_slides_and_template(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "ada").await;

    let templates = body_json(get_auth(app.clone(), "/api/v1/templates", &token).await).await;
    let template_id = templates[0]["id"].as_i64().unwrap();

    let response = post_json_auth(
        app.clone(),
        "/api/v1/projects",
        json!({ "title": "Tips", "template_id": template_id, "target_audience": "founders" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let project_id = body_json(response).await["id"].as_i64().unwrap();

    for (number, content) in [(2, "second"), (1, "first")] {
        let response = create_slide(app.clone(), &token, project_id, number, content).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let details =
        body_json(get_auth(app, &format!("/api/v1/projects/{project_id}"), &token).await).await;
    assert_eq!(details["title"], "Tips");
    assert_eq!(details["template"]["id"], template_id);
    assert!(details["document"].is_null());
    assert_eq!(details["fetch_strategy"], "preferred_join");
    let slides = details["slides"].as_array().unwrap();
    assert_eq!(slides[0]["content"], "first");
    assert_eq!(slides[1]["content"], "second");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_template_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "ada").await;
    let response = post_json_auth(
        app,
        "/api/v1/projects",
        json!({ "title": "Tips", "template_id": 999_999 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn another_users_document_cannot_be_attached(pool: PgPool) {
    let app = common::build_test_app(pool);
    let owner = register(app.clone(), "owner").await;
    let other = register(app.clone(), "other").await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/documents",
        json!({ "title": "Notes", "content": "raw material" }),
        &owner,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let document_id = body_json(response).await["id"].as_i64().unwrap();

    let response = post_json_auth(
        app,
        "/api/v1/projects",
        json!({ "title": "Borrowed", "document_id": document_id }),
        &other,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn eleventh_slide_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "ada").await;
    let project_id = create_project(app.clone(), &token, "Full house").await;

    for number in 1..=10 {
        let response = create_slide(app.clone(), &token, project_id, number, "").await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = create_slide(app.clone(), &token, project_id, 11, "one too many").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let slides = body_json(
        get_auth(app, &format!("/api/v1/projects/{project_id}/slides"), &token).await,
    )
    .await;
    assert_eq!(slides.as_array().unwrap().len(), 10);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn slide_under_foreign_project_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let owner = register(app.clone(), "owner").await;
    let other = register(app.clone(), "other").await;
    let project_id = create_project(app.clone(), &owner, "Private").await;

    let response = create_slide(app, &other, project_id, 1, "sneaky").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn slide_save_recomputes_char_count_and_guards_revision(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(app.clone(), "ada").await;
    let project_id = create_project(app.clone(), &token, "Saves").await;
    let slide = body_json(create_slide(app.clone(), &token, project_id, 1, "").await).await;
    let uri = format!("/api/v1/slides/{}", slide["id"]);

    let response = put_json_auth(
        app.clone(),
        &uri,
        json!({ "content": "**héllo** ✨", "tone": "playful", "revision": 2 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let saved = body_json(response).await;
    assert_eq!(saved["char_count"], 11);
    assert_eq!(saved["tone"], "playful");
    assert_eq!(saved["revision"], 2);

    // A late response for an older save must not clobber the newer one.
    let response = put_json_auth(
        app.clone(),
        &uri,
        json!({ "content": "older", "revision": 1 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let slides = body_json(
        get_auth(app, &format!("/api/v1/projects/{project_id}/slides"), &token).await,
    )
    .await;
    assert_eq!(slides[0]["content"], "**héllo** ✨");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn slide_delete_is_owner_scoped(pool: PgPool) {
    let app = common::build_test_app(pool);
    let owner = register(app.clone(), "owner").await;
    let other = register(app.clone(), "other").await;
    let project_id = create_project(app.clone(), &owner, "Deck").await;
    let slide = body_json(create_slide(app.clone(), &owner, project_id, 1, "keep").await).await;
    let uri = format!("/api/v1/slides/{}", slide["id"]);

    let response = delete_auth(app.clone(), &uri, &other).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app.clone(), &uri, &owner).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(app, &uri, &owner).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deleting_a_project_removes_its_slides(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = register(app.clone(), "ada").await;
    let project_id = create_project(app.clone(), &token, "Short-lived").await;
    create_slide(app.clone(), &token, project_id, 1, "bye").await;

    let response = delete_auth(app, &format!("/api/v1/projects/{project_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM slides WHERE project_id = $1")
        .bind(project_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}
