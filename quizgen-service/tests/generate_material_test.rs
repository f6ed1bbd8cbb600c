//! End-to-end tests for `POST /generate-material` against a fake Groq API.
//!
//! Run with: cargo test -p quizgen-service --test generate_material_test

mod common;

use common::TestApp;
use quizgen_service::dtos::MaterialResponse;
use reqwest::StatusCode;
use serde_json::{json, Value};

fn material_request() -> Value {
    json!({
        "course_title": "Biology",
        "material_title": "Mitosis",
        "lesson_title": "Cell division"
    })
}

#[tokio::test]
async fn returns_wrapped_material() {
    let app = TestApp::spawn().await;
    let paragraph = "Mitosis is the process by which a single cell divides into two identical daughter cells. ".repeat(4);
    app.upstream_replies_with(&format!("# Mitosis\n\n{}", paragraph))
        .await;

    let response = app.post_json("/generate-material", &material_request()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: MaterialResponse = response.json().await.expect("Failed to parse JSON");
    assert!(body.content.starts_with("# Mitosis\n\n"));
    assert!(body.content.lines().all(|l| l.chars().count() <= 100));
    assert!(body.content.lines().count() > 3);
}

#[tokio::test]
async fn sends_no_sampling_overrides() {
    let app = TestApp::spawn().await;
    app.upstream_replies_with("Some material").await;

    let response = app.post_json("/generate-material", &material_request()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let requests = app.upstream_requests().await;
    assert_eq!(requests.len(), 1);
    assert!(requests[0].get("temperature").is_none());
    assert!(requests[0].get("max_tokens").is_none());
    let prompt = requests[0]["messages"][1]["content"].as_str().unwrap();
    assert!(prompt.contains("Material Topic: Mitosis"));
}

#[tokio::test]
async fn missing_lesson_title_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json(
            "/generate-material",
            &json!({ "course_title": "Biology", "material_title": "Mitosis" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("lesson_title"));
}

#[tokio::test]
async fn upstream_failure_is_bad_request() {
    let app = TestApp::spawn().await;
    app.upstream_fails_with(500, "internal").await;

    let response = app.post_json("/generate-material", &material_request()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Completion API error: 500 - internal");
}
