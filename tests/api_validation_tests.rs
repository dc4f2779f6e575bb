// SPDX-License-Identifier: MIT
// Copyright 2026 FantaPL Developers

//! Input validation tests: every 400 must be produced before any I/O.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;

mod common;

async fn post_json(app: axum::Router, uri: &str, body: &str) -> axum::http::Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

async fn body_json(response: axum::http::Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// ─── Sync dispatcher ─────────────────────────────────────────────

#[tokio::test]
async fn test_sync_rejects_non_json_body() {
    let (app, _state) = common::create_test_app();
    let response = post_json(app, "/api/sync", "definitely not json").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_sync_rejects_missing_action() {
    let (app, _state) = common::create_test_app();
    let response = post_json(app, "/api/sync", "{}").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_sync_rejects_unknown_action() {
    let (app, _state) = common::create_test_app();
    let response = post_json(app, "/api/sync", r#"{"action": "DROP_EVERYTHING"}"#).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["details"]
        .as_str()
        .unwrap()
        .contains("DROP_EVERYTHING"));
}

#[tokio::test]
async fn test_sync_accepts_double_encoded_action_field() {
    let (app, _state) = common::create_test_app();
    // Double-encoded body with an unknown action: must get past JSON
    // decoding and fail on the action value, proving the unwrap happened
    let response = post_json(app, "/api/sync", r#""{\"action\": \"NOPE\"}""#).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["details"].as_str().unwrap().contains("NOPE"));
}

// ─── Lineup fetch ────────────────────────────────────────────────

#[tokio::test]
async fn test_lineups_rejects_missing_fixture_id() {
    let (app, _state) = common::create_test_app();
    let response = post_json(
        app,
        "/api/lineups",
        r#"{"date": "2026-01-10", "homeTeamName": "Arsenal", "awayTeamName": "Chelsea"}"#,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["details"].as_str().unwrap().contains("fixtureId"));
}

#[tokio::test]
async fn test_lineups_rejects_missing_team_names() {
    let (app, _state) = common::create_test_app();
    let response = post_json(
        app,
        "/api/lineups",
        r#"{"fixtureId": "fix_1", "date": "2026-01-10", "homeTeamName": "Arsenal"}"#,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["details"].as_str().unwrap().contains("awayTeamName"));
}

#[tokio::test]
async fn test_lineups_rejects_invalid_date() {
    let (app, _state) = common::create_test_app();
    let response = post_json(
        app,
        "/api/lineups",
        r#"{"fixtureId": "fix_1", "date": "next saturday", "homeTeamName": "Arsenal", "awayTeamName": "Chelsea"}"#,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
