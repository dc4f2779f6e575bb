// SPDX-License-Identifier: MIT
// Copyright 2026 FantaPL Developers

//! Sync dispatcher and scheduled-sync trigger.
//!
//! `POST /api/sync` is the manual/HTTP-triggered dispatcher; `POST
//! /tasks/scheduled-sync` is the cron entry point, gated by the polling
//! window so quiet days cost nothing.

use crate::error::{AppError, Result};
use crate::routes::decode_body;
use crate::services::schedule::should_poll;
use crate::services::SyncReport;
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/sync", post(trigger_sync))
        .route("/tasks/scheduled-sync", post(scheduled_sync))
}

/// Inbound sync trigger body.
#[derive(Deserialize)]
struct SyncTrigger {
    action: Option<String>,
}

/// Response for one dispatched sync action.
#[derive(Serialize)]
pub struct SyncResponse {
    pub success: bool,
    pub action: String,
    pub processed: u32,
    pub errors: u32,
}

/// Dispatch a sync action.
async fn trigger_sync(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<SyncResponse>> {
    let trigger: SyncTrigger = decode_body(&body)?;
    let action = trigger
        .action
        .ok_or_else(|| AppError::BadRequest("Missing required field: action".to_string()))?;

    tracing::info!(action = %action, "Sync triggered");

    let report = match action.as_str() {
        "SYNC_TEAMS" => state.sync_engine.sync_teams().await?,
        "SYNC_FIXTURES" => state.sync_engine.sync_fixtures().await?,
        "LIVE_UPDATES" => state.sync_engine.sync_live().await?,
        "TODAY_MATCHES" => state.sync_engine.sync_today(chrono::Utc::now()).await?,
        other => {
            return Err(AppError::BadRequest(format!("Unknown action: {}", other)));
        }
    };

    Ok(Json(SyncResponse {
        success: true,
        action,
        processed: report.processed,
        errors: report.errors,
    }))
}

/// Response for a scheduled run.
#[derive(Serialize)]
pub struct ScheduledSyncResponse {
    pub success: bool,
    /// True when the run was outside the active gameweek's window
    pub skipped: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixtures: Option<SyncReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live: Option<SyncReport>,
}

/// Scheduled (cron) sync: refresh fixtures and live matches, but only inside
/// the active gameweek's polling window.
async fn scheduled_sync(State(state): State<Arc<AppState>>) -> Result<Json<ScheduledSyncResponse>> {
    let now = chrono::Utc::now();

    if !should_poll(&state.db, &state.config.fixtures_collection, now).await {
        tracing::info!("Outside polling window, skipping scheduled sync");
        return Ok(Json(ScheduledSyncResponse {
            success: true,
            skipped: true,
            fixtures: None,
            live: None,
        }));
    }

    let fixtures = state.sync_engine.sync_fixtures().await?;
    let live = state.sync_engine.sync_live().await?;

    Ok(Json(ScheduledSyncResponse {
        success: true,
        skipped: false,
        fixtures: Some(fixtures),
        live: Some(live),
    }))
}
