// SPDX-License-Identifier: MIT
// Copyright 2026 FantaPL Developers

//! Fixture read endpoint for the UI layer.

use crate::error::Result;
use crate::models::fixture::MatchStatus;
use crate::models::Fixture;
use crate::time_utils::same_utc_day;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Internal page size when walking the fixtures collection.
const READ_PAGE_SIZE: u32 = 50;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/fixtures", get(get_fixtures))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FixturesQuery {
    /// Filter by gameweek number
    gameweek: Option<u32>,
    /// Only fixtures currently in play
    #[serde(default)]
    live_only: bool,
    /// Only fixtures kicking off today (UTC)
    #[serde(default)]
    today_only: bool,
}

#[derive(Serialize)]
pub struct FixturesResponse {
    pub success: bool,
    pub count: usize,
    pub fixtures: Vec<Fixture>,
}

/// List fixtures, optionally filtered by gameweek / live / today.
async fn get_fixtures(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FixturesQuery>,
) -> Result<Json<FixturesResponse>> {
    tracing::debug!(
        gameweek = ?params.gameweek,
        live_only = params.live_only,
        today_only = params.today_only,
        "Fetching fixtures"
    );

    let all: Vec<Fixture> = state
        .db
        .list_all(&state.config.fixtures_collection, READ_PAGE_SIZE)
        .await?;

    let now = chrono::Utc::now();
    let mut fixtures: Vec<Fixture> = all
        .into_iter()
        .filter(|f| params.gameweek.is_none_or(|gw| f.gameweek == gw))
        .filter(|f| !params.live_only || f.status == MatchStatus::InPlay)
        .filter(|f| {
            !params.today_only
                || f.kickoff_utc().is_some_and(|kickoff| same_utc_day(kickoff, now))
        })
        .collect();

    fixtures.sort_by(|a, b| a.kickoff.cmp(&b.kickoff).then(a.match_id.cmp(&b.match_id)));

    Ok(Json(FixturesResponse {
        success: true,
        count: fixtures.len(),
        fixtures,
    }))
}
