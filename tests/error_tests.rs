// SPDX-License-Identifier: MIT
// Copyright 2026 FantaPL Developers

//! Error envelope and health endpoint tests against the offline app.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use tower::ServiceExt;

mod common;

async fn body_json(response: axum::http::Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_fixtures_read_surfaces_database_error() {
    let (app, _state) = common::create_test_app();

    // Offline mock store: the read endpoint must fail with a 500 envelope,
    // not panic or hang
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/fixtures?gameweek=5")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "database_error");
    assert!(body["details"].as_str().unwrap().contains("offline"));
}
