// SPDX-License-Identifier: MIT
// Copyright 2026 FantaPL Developers

//! Lineup fetch endpoint.

use crate::error::{AppError, Result};
use crate::models::Lineup;
use crate::routes::decode_body;
use crate::services::lineup::{LineupFetchOutcome, LineupRequest};
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/lineups", post(fetch_lineups))
}

/// Inbound lineup fetch body.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LineupTrigger {
    fixture_id: Option<String>,
    date: Option<String>,
    home_team_name: Option<String>,
    away_team_name: Option<String>,
    home_team_short: Option<String>,
    away_team_short: Option<String>,
}

/// Lineup fetch response. A match that cannot be located (or has no content
/// yet) is a business outcome: 200 with `success: false` and no write.
#[derive(Serialize)]
pub struct LineupResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lineup: Option<Lineup>,
}

fn require(field: Option<String>, name: &str) -> Result<String> {
    field.ok_or_else(|| AppError::BadRequest(format!("Missing required field: {}", name)))
}

/// Parse the caller-supplied target date: full RFC3339 or a bare
/// `YYYY-MM-DD` (interpreted as UTC midnight).
fn parse_target_date(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|d| d.and_hms_opt(0, 0, 0).expect("midnight is always valid").and_utc())
        .map_err(|_| {
            AppError::BadRequest("Invalid 'date': expected RFC3339 or YYYY-MM-DD".to_string())
        })
}

/// Fetch lineups and events for one fixture.
async fn fetch_lineups(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<LineupResponse>> {
    let trigger: LineupTrigger = decode_body(&body)?;

    let fixture_id = require(trigger.fixture_id, "fixtureId")?;
    let date = parse_target_date(&require(trigger.date, "date")?)?;
    let home_team_name = require(trigger.home_team_name, "homeTeamName")?;
    let away_team_name = require(trigger.away_team_name, "awayTeamName")?;

    tracing::info!(
        fixture_id = %fixture_id,
        home = %home_team_name,
        away = %away_team_name,
        "Lineup fetch requested"
    );

    let request = LineupRequest {
        fixture_id,
        date,
        home_team_name,
        away_team_name,
        home_team_short: trigger.home_team_short,
        away_team_short: trigger.away_team_short,
    };

    let outcome = state.lineup_service.fetch_and_store(&request).await?;

    let response = match outcome {
        LineupFetchOutcome::Stored(lineup) => LineupResponse {
            success: true,
            message: None,
            lineup: Some(*lineup),
        },
        LineupFetchOutcome::MatchNotFound => LineupResponse {
            success: false,
            message: Some("No fixture matched the supplied teams and date".to_string()),
            lineup: None,
        },
        LineupFetchOutcome::ContentMissing { match_id } => LineupResponse {
            success: false,
            message: Some(format!("Match {} has no lineup content yet", match_id)),
            lineup: None,
        },
    };

    Ok(Json(response))
}
