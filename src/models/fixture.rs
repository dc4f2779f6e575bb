// SPDX-License-Identifier: MIT
// Copyright 2026 FantaPL Developers

//! Fixture model, synced from FotMob into the `fixtures` collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Scheduled,
    InPlay,
    Finished,
    Postponed,
}

/// Stored fixture document.
///
/// Document ID is `match_<fotmob_id>`. Fixtures are mutated repeatedly as a
/// match progresses but never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixture {
    /// FotMob match ID
    pub match_id: u64,
    /// Gameweek (round) number
    pub gameweek: u32,
    /// Home team document reference (`team_<id>`)
    pub home_team: String,
    /// Away team document reference (`team_<id>`)
    pub away_team: String,
    /// Kickoff (ISO 8601, UTC)
    pub kickoff: String,
    pub status: MatchStatus,
    /// 0 unless status is IN_PLAY or FINISHED
    pub home_score: u32,
    /// 0 unless status is IN_PLAY or FINISHED
    pub away_score: u32,
    /// Elapsed minute display, e.g. "67" or "45+2" while in play
    pub minute: Option<String>,
    /// Season tag, e.g. "2025/2026"
    pub season: String,
}

impl Fixture {
    /// Kickoff as a UTC timestamp, or `None` when the stored value is not
    /// parseable (defensive: kickoff strings come straight from upstream).
    pub fn kickoff_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.kickoff)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Deterministic document ID for a fixture.
pub fn fixture_doc_id(match_id: u64) -> String {
    format!("match_{}", match_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&MatchStatus::InPlay).unwrap(),
            "\"IN_PLAY\""
        );
        assert_eq!(
            serde_json::to_string(&MatchStatus::Scheduled).unwrap(),
            "\"SCHEDULED\""
        );
        let parsed: MatchStatus = serde_json::from_str("\"POSTPONED\"").unwrap();
        assert_eq!(parsed, MatchStatus::Postponed);
    }

    #[test]
    fn test_kickoff_utc_parses_rfc3339() {
        let fixture = Fixture {
            match_id: 1,
            gameweek: 1,
            home_team: "team_1".to_string(),
            away_team: "team_2".to_string(),
            kickoff: "2026-01-10T15:00:00Z".to_string(),
            status: MatchStatus::Scheduled,
            home_score: 0,
            away_score: 0,
            minute: None,
            season: "2025/2026".to_string(),
        };
        assert!(fixture.kickoff_utc().is_some());

        let bad = Fixture {
            kickoff: "not-a-date".to_string(),
            ..fixture
        };
        assert!(bad.kickoff_utc().is_none());
    }
}
