// SPDX-License-Identifier: MIT
// Copyright 2026 FantaPL Developers

//! HTTP route handlers.

pub mod fixtures;
pub mod lineups;
pub mod sync;

use crate::error::AppError;
use crate::AppState;
use axum::http::{header, Method};
use axum::{routing::get, Json, Router};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
}

/// Health check response
async fn health_check() -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
    })
}

/// Decode a trigger body that may arrive double-encoded.
///
/// Some schedulers deliver the configured JSON payload as a JSON *string*
/// (`"{\"action\":\"SYNC_TEAMS\"}"`); unwrap one level of string nesting
/// before deserializing.
pub(crate) fn decode_body<T: DeserializeOwned>(raw: &str) -> Result<T, AppError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))?;

    let value = match value {
        Value::String(inner) => serde_json::from_str(&inner)
            .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))?,
        v => v,
    };

    serde_json::from_value(value)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS layer - allow requests from frontend URL and localhost (for dev)
    let frontend_url = state.config.frontend_url.clone();
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::AllowOrigin::predicate(
            move |origin: &axum::http::HeaderValue, _request_parts: &axum::http::request::Parts| {
                let origin_str = origin.to_str().unwrap_or("");
                origin_str == frontend_url
                    || origin_str.starts_with("http://localhost")
                    || origin_str.starts_with("http://127.0.0.1")
            },
        ))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(health_check))
        .merge(sync::routes())
        .merge(lineups::routes())
        .merge(fixtures::routes())
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
