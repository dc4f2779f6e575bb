// SPDX-License-Identifier: MIT
// Copyright 2026 FantaPL Developers

//! FotMob API client for fetching league fixtures and match details.
//!
//! The league endpoint is not contractually stable: the same data has been
//! observed under three different shapes. `extract_matches` normalizes all of
//! them into one ordered sequence so downstream logic never sees the
//! difference.

use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// FotMob API client.
#[derive(Clone)]
pub struct FotmobClient {
    http: reqwest::Client,
    base_url: String,
}

impl FotmobClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Fetch all matches for a league's current season in one request.
    pub async fn league_matches(&self, league_id: u32) -> Result<Vec<RawMatch>, AppError> {
        let url = format!("{}/leagues", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("id", league_id.to_string())])
            .send()
            .await
            .map_err(|e| AppError::Fotmob(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Fotmob(format!("HTTP {}: {}", status, body)));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| AppError::Fotmob(format!("JSON parse error: {}", e)))?;

        extract_matches(value)
    }

    /// Fetch match detail (lineups, events) for one match.
    ///
    /// Returns `None` when the response has no `content` field: FotMob has
    /// nothing for that match yet, which is a business outcome, not an error.
    pub async fn match_details(&self, match_id: u64) -> Result<Option<Value>, AppError> {
        let url = format!("{}/matchDetails", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("matchId", match_id.to_string())])
            .send()
            .await
            .map_err(|e| AppError::Fotmob(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Fotmob(format!("HTTP {}: {}", status, body)));
        }

        let mut value: Value = response
            .json()
            .await
            .map_err(|e| AppError::Fotmob(format!("JSON parse error: {}", e)))?;

        match value.get_mut("content") {
            Some(content) if !content.is_null() => Ok(Some(content.take())),
            _ => Ok(None),
        }
    }
}

/// Normalize the league response into a flat match list, preserving source
/// order. Known shapes:
/// - `{fixtures: {allMatches: [...]}}`
/// - `{matches: [...]}` or `{matches: {allMatches: [...]}}`
/// - `{allMatches: [...]}`
pub fn extract_matches(value: Value) -> Result<Vec<RawMatch>, AppError> {
    let candidate = value
        .get("fixtures")
        .and_then(|f| f.get("allMatches"))
        .or_else(|| {
            value.get("matches").map(|m| match m.get("allMatches") {
                Some(inner) => inner,
                None => m,
            })
        })
        .or_else(|| value.get("allMatches"));

    let matches = match candidate {
        Some(v) if v.is_array() => v.clone(),
        _ => {
            return Err(AppError::Fotmob(
                "Unrecognized league response shape".to_string(),
            ))
        }
    };

    serde_json::from_value(matches)
        .map_err(|e| AppError::Fotmob(format!("Malformed match list: {}", e)))
}

/// One match record from the league endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMatch {
    #[serde(deserialize_with = "flexible_u64")]
    pub id: u64,
    /// Gameweek number (sent as a number or a string depending on endpoint)
    #[serde(default, deserialize_with = "flexible_u32")]
    pub round: u32,
    pub home: RawTeam,
    pub away: RawTeam,
    #[serde(default)]
    pub status: RawStatus,
}

impl RawMatch {
    /// Kickoff as a UTC timestamp, if the upstream string parses.
    pub fn kickoff_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.status.utc_time)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Team reference within a match record.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTeam {
    #[serde(deserialize_with = "flexible_u64")]
    pub id: u64,
    pub name: String,
    #[serde(default, rename = "shortName")]
    pub short_name: Option<String>,
}

/// Match status flags and score, as sent by FotMob.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStatus {
    #[serde(default, rename = "utcTime")]
    pub utc_time: String,
    #[serde(default)]
    pub finished: bool,
    #[serde(default)]
    pub started: bool,
    #[serde(default)]
    pub cancelled: bool,
    /// Set while the match is live
    #[serde(default)]
    pub ongoing: bool,
    /// Score display, e.g. "2 - 1"
    #[serde(default, rename = "scoreStr")]
    pub score_str: Option<String>,
    #[serde(default, rename = "liveTime")]
    pub live_time: Option<RawLiveTime>,
}

/// Elapsed-time display for live matches.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLiveTime {
    #[serde(default)]
    pub short: Option<String>,
}

/// Parse a "2 - 1" style score display into (home, away).
pub fn parse_score_str(score_str: &str) -> Option<(u32, u32)> {
    let mut parts = score_str.split('-');
    let home = parts.next()?.trim().parse().ok()?;
    let away = parts.next()?.trim().parse().ok()?;
    Some((home, away))
}

/// Accept a JSON number or numeric string.
fn flexible_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Num(u64),
        Str(String),
    }

    match NumOrStr::deserialize(deserializer)? {
        NumOrStr::Num(n) => Ok(n),
        NumOrStr::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Accept a JSON number or numeric string.
fn flexible_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let n = flexible_u64(deserializer)?;
    u32::try_from(n).map_err(serde::de::Error::custom)
}
