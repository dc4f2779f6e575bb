// SPDX-License-Identifier: MIT
// Copyright 2026 FantaPL Developers

//! Fixture/team synchronization engine.
//!
//! Three independent upsert passes, all idempotent and re-runnable:
//! - team sync (update-or-create)
//! - fixture sync (update-or-create)
//! - live/today sync (update-only; the full fixture pass is assumed to have
//!   created the documents already)
//!
//! Per-record failures are counted and logged; they never abort sibling
//! records, and partial completion is reported rather than rolled back.

use crate::config::Config;
use crate::db::AppwriteDb;
use crate::error::AppError;
use crate::models::fixture::{fixture_doc_id, Fixture, MatchStatus};
use crate::models::team::{team_doc_id, team_logo_url, Team};
use crate::services::fotmob::{parse_score_str, FotmobClient, RawMatch, RawStatus};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Tally for one sync pass.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SyncReport {
    pub processed: u32,
    pub errors: u32,
}

/// Static short-name overrides, keyed by FotMob display name.
///
/// A single shared read-only resource injected into the engine, so call
/// sites never re-declare their own copy.
pub struct ShortNameTable {
    overrides: HashMap<&'static str, &'static str>,
}

impl Default for ShortNameTable {
    fn default() -> Self {
        let overrides = HashMap::from([
            ("Manchester United", "Man Utd"),
            ("Manchester City", "Man City"),
            ("Newcastle United", "Newcastle"),
            ("Tottenham Hotspur", "Spurs"),
            ("Wolverhampton Wanderers", "Wolves"),
            ("Brighton & Hove Albion", "Brighton"),
            ("Nottingham Forest", "Forest"),
            ("West Ham United", "West Ham"),
            ("AFC Bournemouth", "Bournemouth"),
            ("Crystal Palace", "Palace"),
            ("Sheffield United", "Sheff Utd"),
            ("Leeds United", "Leeds"),
        ]);
        Self { overrides }
    }
}

impl ShortNameTable {
    /// Resolve a short display name: override table first, else the first 10
    /// characters of the full name.
    pub fn resolve(&self, name: &str) -> String {
        match self.overrides.get(name) {
            Some(short) => (*short).to_string(),
            None => name.chars().take(10).collect::<String>().trim_end().to_string(),
        }
    }
}

/// Derive fixture status from FotMob's boolean flags.
///
/// `finished` wins regardless of other flags.
pub fn derive_status(status: &RawStatus) -> MatchStatus {
    if status.finished {
        MatchStatus::Finished
    } else if status.started || status.ongoing {
        MatchStatus::InPlay
    } else if status.cancelled {
        MatchStatus::Postponed
    } else {
        MatchStatus::Scheduled
    }
}

/// Derive scores: only meaningful while in play or after full time, 0-0
/// otherwise (FotMob sometimes carries stale score strings on postponed
/// matches).
pub fn derive_scores(status: &RawStatus, match_status: MatchStatus) -> (u32, u32) {
    match match_status {
        MatchStatus::InPlay | MatchStatus::Finished => status
            .score_str
            .as_deref()
            .and_then(parse_score_str)
            .unwrap_or((0, 0)),
        _ => (0, 0),
    }
}

/// Synchronization engine: FotMob in, Appwrite out.
#[derive(Clone)]
pub struct SyncEngine {
    fotmob: FotmobClient,
    store: AppwriteDb,
    config: Config,
    short_names: std::sync::Arc<ShortNameTable>,
}

impl SyncEngine {
    pub fn new(
        fotmob: FotmobClient,
        store: AppwriteDb,
        config: Config,
        short_names: std::sync::Arc<ShortNameTable>,
    ) -> Self {
        Self {
            fotmob,
            store,
            config,
            short_names,
        }
    }

    /// Build the stored fixture document for one match record.
    fn fixture_from(&self, m: &RawMatch) -> Fixture {
        let status = derive_status(&m.status);
        let (home_score, away_score) = derive_scores(&m.status, status);
        let minute = match status {
            MatchStatus::InPlay => m
                .status
                .live_time
                .as_ref()
                .and_then(|lt| lt.short.clone()),
            _ => None,
        };

        Fixture {
            match_id: m.id,
            gameweek: m.round,
            home_team: team_doc_id(m.home.id),
            away_team: team_doc_id(m.away.id),
            kickoff: m.status.utc_time.clone(),
            status,
            home_score,
            away_score,
            minute,
            season: self.config.season.clone(),
        }
    }

    // ─── Team Sync ───────────────────────────────────────────────

    /// Upsert every team referenced by the season's matches.
    pub async fn sync_teams(&self) -> Result<SyncReport, AppError> {
        let matches = self.fotmob.league_matches(self.config.league_id).await?;

        let mut report = SyncReport::default();
        let mut seen: HashSet<u64> = HashSet::new();

        for m in &matches {
            for raw in [&m.home, &m.away] {
                if !seen.insert(raw.id) {
                    continue;
                }

                let team = Team {
                    team_id: raw.id,
                    name: raw.name.clone(),
                    short_name: self.short_names.resolve(&raw.name),
                    logo_url: team_logo_url(raw.id),
                };

                match self
                    .store
                    .upsert_document(&self.config.teams_collection, &team_doc_id(raw.id), &team)
                    .await
                {
                    Ok(outcome) => {
                        tracing::debug!(team_id = raw.id, name = %raw.name, ?outcome, "Team synced");
                        report.processed += 1;
                    }
                    Err(e) => {
                        tracing::warn!(team_id = raw.id, error = %e, "Team sync failed");
                        report.errors += 1;
                    }
                }
            }
        }

        tracing::info!(
            processed = report.processed,
            errors = report.errors,
            "Team sync complete"
        );
        Ok(report)
    }

    // ─── Fixture Sync ────────────────────────────────────────────

    /// Upsert every fixture for the season.
    pub async fn sync_fixtures(&self) -> Result<SyncReport, AppError> {
        let matches = self.fotmob.league_matches(self.config.league_id).await?;
        let report = self.upsert_fixtures(&matches).await;

        tracing::info!(
            processed = report.processed,
            errors = report.errors,
            "Fixture sync complete"
        );
        Ok(report)
    }

    async fn upsert_fixtures(&self, matches: &[RawMatch]) -> SyncReport {
        let mut report = SyncReport::default();

        for m in matches {
            let fixture = self.fixture_from(m);
            match self
                .store
                .upsert_document(
                    &self.config.fixtures_collection,
                    &fixture_doc_id(m.id),
                    &fixture,
                )
                .await
            {
                Ok(_) => report.processed += 1,
                Err(e) => {
                    tracing::warn!(match_id = m.id, error = %e, "Fixture upsert failed");
                    report.errors += 1;
                }
            }
        }

        report
    }

    // ─── Live/Today Sync ─────────────────────────────────────────

    /// Refresh status/score/minute for matches currently in play.
    ///
    /// Update-only: the fixture pass is assumed to have created the documents
    /// already, so a not-found here is counted as an error, never a create.
    pub async fn sync_live(&self) -> Result<SyncReport, AppError> {
        let matches = self.fotmob.league_matches(self.config.league_id).await?;
        let live: Vec<&RawMatch> = matches.iter().filter(|m| is_live(m)).collect();

        let report = self.update_fixtures(&live).await;
        tracing::info!(
            live = live.len(),
            processed = report.processed,
            errors = report.errors,
            "Live sync complete"
        );
        Ok(report)
    }

    /// Refresh matches that are live or scheduled for today (UTC).
    pub async fn sync_today(&self, now: chrono::DateTime<chrono::Utc>) -> Result<SyncReport, AppError> {
        let matches = self.fotmob.league_matches(self.config.league_id).await?;
        // Date-string prefix comparison matches what FotMob sends without
        // caring about sub-day formatting differences.
        let today = now.format("%Y-%m-%d").to_string();
        let subset: Vec<&RawMatch> = matches
            .iter()
            .filter(|m| is_live(m) || m.status.utc_time.starts_with(&today))
            .collect();

        let report = self.update_fixtures(&subset).await;
        tracing::info!(
            today = %today,
            matched = subset.len(),
            processed = report.processed,
            errors = report.errors,
            "Today sync complete"
        );
        Ok(report)
    }

    async fn update_fixtures(&self, matches: &[&RawMatch]) -> SyncReport {
        let mut report = SyncReport::default();

        for m in matches {
            let fixture = self.fixture_from(m);
            match self
                .store
                .update_document(
                    &self.config.fixtures_collection,
                    &fixture_doc_id(m.id),
                    &fixture,
                )
                .await
            {
                Ok(()) => report.processed += 1,
                Err(AppError::NotFound(_)) => {
                    // Full sync has not created this fixture yet; count and move on
                    tracing::warn!(match_id = m.id, "Fixture missing during update-only sync");
                    report.errors += 1;
                }
                Err(e) => {
                    tracing::warn!(match_id = m.id, error = %e, "Fixture update failed");
                    report.errors += 1;
                }
            }
        }

        report
    }

    /// Fetch the season's matches once (shared by the lineup flow).
    pub async fn season_matches(&self) -> Result<Vec<RawMatch>, AppError> {
        self.fotmob.league_matches(self.config.league_id).await
    }
}

/// True when FotMob flags the match as in progress.
fn is_live(m: &RawMatch) -> bool {
    m.status.ongoing || (m.status.started && !m.status.finished)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(finished: bool, started: bool, cancelled: bool, ongoing: bool) -> RawStatus {
        RawStatus {
            utc_time: "2026-01-10T15:00:00Z".to_string(),
            finished,
            started,
            cancelled,
            ongoing,
            score_str: None,
            live_time: None,
        }
    }

    #[test]
    fn test_finished_wins_regardless_of_other_flags() {
        let s = status(true, true, true, true);
        assert_eq!(derive_status(&s), MatchStatus::Finished);
    }

    #[test]
    fn test_started_maps_to_in_play() {
        let s = status(false, true, false, false);
        assert_eq!(derive_status(&s), MatchStatus::InPlay);
        let s = status(false, false, false, true);
        assert_eq!(derive_status(&s), MatchStatus::InPlay);
    }

    #[test]
    fn test_cancelled_maps_to_postponed() {
        let s = status(false, false, true, false);
        assert_eq!(derive_status(&s), MatchStatus::Postponed);
    }

    #[test]
    fn test_no_flags_maps_to_scheduled() {
        let s = status(false, false, false, false);
        assert_eq!(derive_status(&s), MatchStatus::Scheduled);
    }

    #[test]
    fn test_scores_zeroed_unless_live_or_finished() {
        let mut s = status(false, false, false, false);
        s.score_str = Some("2 - 1".to_string());

        assert_eq!(derive_scores(&s, MatchStatus::Scheduled), (0, 0));
        assert_eq!(derive_scores(&s, MatchStatus::Postponed), (0, 0));
        assert_eq!(derive_scores(&s, MatchStatus::InPlay), (2, 1));
        assert_eq!(derive_scores(&s, MatchStatus::Finished), (2, 1));
    }

    #[test]
    fn test_unparseable_score_defaults_to_zero() {
        let mut s = status(true, true, false, false);
        s.score_str = Some("TBD".to_string());
        assert_eq!(derive_scores(&s, MatchStatus::Finished), (0, 0));
    }

    #[test]
    fn test_short_name_override_table() {
        let table = ShortNameTable::default();
        assert_eq!(table.resolve("Manchester United"), "Man Utd");
        assert_eq!(table.resolve("Tottenham Hotspur"), "Spurs");
        assert_eq!(table.resolve("AFC Bournemouth"), "Bournemouth");
    }

    #[test]
    fn test_short_name_truncation_fallback() {
        let table = ShortNameTable::default();
        // First 10 characters, trailing whitespace trimmed
        assert_eq!(table.resolve("Arsenal"), "Arsenal");
        assert_eq!(table.resolve("Everton FC"), "Everton FC");
        assert_eq!(table.resolve("Borussia Moenchengladbach"), "Borussia M");
    }

    fn match_with_status(s: RawStatus) -> RawMatch {
        let mut m: RawMatch = serde_json::from_value(serde_json::json!({
            "id": 1,
            "round": 1,
            "home": {"id": 1, "name": "Arsenal"},
            "away": {"id": 2, "name": "Chelsea"},
        }))
        .unwrap();
        m.status = s;
        m
    }

    #[test]
    fn test_is_live() {
        assert!(is_live(&match_with_status(status(false, true, false, false))));
        assert!(is_live(&match_with_status(status(false, false, false, true))));
        // Finished matches are not live even with started still set
        assert!(!is_live(&match_with_status(status(true, true, false, false))));
        assert!(!is_live(&match_with_status(status(false, false, false, false))));
    }
}
