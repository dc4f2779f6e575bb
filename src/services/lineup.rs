// SPDX-License-Identifier: MIT
// Copyright 2026 FantaPL Developers

//! Lineup/events fetching and storage.
//!
//! Given team names and an approximate date, locates the FotMob match via the
//! correlator, pulls the match detail content, and stores one lineup document
//! keyed by the caller-supplied fixture ID. The document is overwritten
//! wholesale on every refresh; there is no merge.

use crate::config::Config;
use crate::db::AppwriteDb;
use crate::error::AppError;
use crate::models::lineup::{player_image_url, Lineup, LineupPlayer, MatchEvent, TeamLineup};
use crate::services::correlate::find_match;
use crate::services::fotmob::FotmobClient;
use crate::time_utils::format_utc_rfc3339;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Validated lineup fetch request.
#[derive(Debug, Clone)]
pub struct LineupRequest {
    pub fixture_id: String,
    pub date: DateTime<Utc>,
    pub home_team_name: String,
    pub away_team_name: String,
    /// Alternate short names, tried when the full names fail to correlate
    pub home_team_short: Option<String>,
    pub away_team_short: Option<String>,
}

/// Business outcome of a lineup fetch. Only `Stored` touches the database.
#[derive(Debug)]
pub enum LineupFetchOutcome {
    Stored(Box<Lineup>),
    /// No season match correlated with the request
    MatchNotFound,
    /// Match found but FotMob has no content for it yet
    ContentMissing { match_id: u64 },
}

/// Lineup fetch/store service.
#[derive(Clone)]
pub struct LineupService {
    fotmob: FotmobClient,
    store: AppwriteDb,
    config: Config,
}

impl LineupService {
    pub fn new(fotmob: FotmobClient, store: AppwriteDb, config: Config) -> Self {
        Self {
            fotmob,
            store,
            config,
        }
    }

    /// Locate the match, fetch its detail content, and store the lineup
    /// document. Not-found outcomes perform no database write.
    pub async fn fetch_and_store(
        &self,
        request: &LineupRequest,
    ) -> Result<LineupFetchOutcome, AppError> {
        let matches = self.fotmob.league_matches(self.config.league_id).await?;

        let matched = find_match(
            &matches,
            &request.home_team_name,
            &request.away_team_name,
            request.date,
        )
        .or_else(|| match (&request.home_team_short, &request.away_team_short) {
            (Some(home), Some(away)) => find_match(&matches, home, away, request.date),
            _ => None,
        });

        let Some(matched) = matched else {
            tracing::info!(
                home = %request.home_team_name,
                away = %request.away_team_name,
                date = %request.date,
                "No match correlated for lineup request"
            );
            return Ok(LineupFetchOutcome::MatchNotFound);
        };

        let Some(content) = self.fotmob.match_details(matched.id).await? else {
            tracing::info!(match_id = matched.id, "Match detail has no content yet");
            return Ok(LineupFetchOutcome::ContentMissing {
                match_id: matched.id,
            });
        };

        let lineup = build_lineup(
            &request.fixture_id,
            matched.id,
            &matched.home.name,
            &matched.away.name,
            &content,
        );

        self.store
            .upsert_document(
                &self.config.players_collection,
                &request.fixture_id,
                &lineup,
            )
            .await?;

        tracing::info!(
            fixture_id = %request.fixture_id,
            match_id = matched.id,
            events = lineup.events.len(),
            "Lineup stored"
        );

        Ok(LineupFetchOutcome::Stored(Box::new(lineup)))
    }
}

/// Build the stored lineup document from match detail content.
///
/// Every field is extracted defensively: FotMob's detail payload varies with
/// the match state (no lineups before announcement, no events before
/// kickoff), and a partial document is still useful to the UI.
pub fn build_lineup(
    fixture_id: &str,
    match_id: u64,
    home_name: &str,
    away_name: &str,
    content: &Value,
) -> Lineup {
    let teams = content
        .get("lineup")
        .and_then(|l| l.get("lineup"))
        .and_then(Value::as_array);

    let home = teams
        .and_then(|t| t.first())
        .map(|v| parse_team_lineup(home_name, v))
        .unwrap_or_else(|| empty_lineup(home_name));
    let away = teams
        .and_then(|t| t.get(1))
        .map(|v| parse_team_lineup(away_name, v))
        .unwrap_or_else(|| empty_lineup(away_name));

    Lineup {
        fixture_id: fixture_id.to_string(),
        match_id,
        home,
        away,
        events: parse_events(content),
        fetched_at: format_utc_rfc3339(Utc::now()),
    }
}

fn empty_lineup(team_name: &str) -> TeamLineup {
    TeamLineup {
        team_name: team_name.to_string(),
        formation: None,
        starting: Vec::new(),
        bench: Vec::new(),
    }
}

fn parse_team_lineup(team_name: &str, team: &Value) -> TeamLineup {
    // Starting eleven arrives as rows of players (keeper, defence, ...)
    let starting = team
        .get("players")
        .and_then(Value::as_array)
        .map(|rows| {
            rows.iter()
                .filter_map(Value::as_array)
                .flatten()
                .filter_map(parse_player)
                .collect()
        })
        .unwrap_or_default();

    let bench = team
        .get("bench")
        .and_then(Value::as_array)
        .map(|players| players.iter().filter_map(parse_player).collect())
        .unwrap_or_default();

    TeamLineup {
        team_name: team_name.to_string(),
        formation: team
            .get("formation")
            .and_then(Value::as_str)
            .map(str::to_string),
        starting,
        bench,
    }
}

fn parse_player(player: &Value) -> Option<LineupPlayer> {
    let player_id = flexible_u64(player.get("id")?)?;

    // Name is either {"fullName": ...} or a bare string
    let name = player
        .get("name")
        .and_then(|n| {
            n.get("fullName")
                .and_then(Value::as_str)
                .or_else(|| n.as_str())
        })?
        .to_string();

    Some(LineupPlayer {
        player_id,
        name,
        shirt_number: player
            .get("shirt")
            .and_then(flexible_u64)
            .map(|n| n as u32),
        position: player
            .get("role")
            .and_then(Value::as_str)
            .map(str::to_string),
        image_url: player_image_url(player_id),
    })
}

/// Extract goal/card events from `content.matchFacts.events.events`,
/// preserving chronological source order.
fn parse_events(content: &Value) -> Vec<MatchEvent> {
    let Some(events) = content
        .get("matchFacts")
        .and_then(|mf| mf.get("events"))
        .and_then(|e| e.get("events"))
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    events.iter().filter_map(parse_event).collect()
}

fn parse_event(event: &Value) -> Option<MatchEvent> {
    let kind = match event.get("type").and_then(Value::as_str)? {
        "Goal" => "goal",
        "Card" => match event.get("card").and_then(Value::as_str) {
            Some("Red") | Some("YellowRed") => "red_card",
            _ => "yellow_card",
        },
        // Substitutions, VAR reviews etc. are not tracked
        _ => return None,
    };

    Some(MatchEvent {
        minute: event.get("time").and_then(Value::as_i64).unwrap_or(0),
        kind: kind.to_string(),
        player: event.get("nameStr").and_then(Value::as_str)?.to_string(),
        assist: event
            .get("assistStr")
            .and_then(Value::as_str)
            .map(str::to_string),
        is_home: event
            .get("isHome")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    })
}

/// Accept a JSON number or numeric string (FotMob mixes both).
fn flexible_u64(value: &Value) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_content() -> Value {
        json!({
            "lineup": {
                "lineup": [
                    {
                        "teamId": 8650,
                        "formation": "4-3-3",
                        "players": [
                            [{"id": 100, "name": {"fullName": "Alisson Becker"}, "shirt": 1, "role": "Keeper"}],
                            [
                                {"id": 101, "name": {"fullName": "Virgil van Dijk"}, "shirt": "4", "role": "Defender"},
                                {"id": 102, "name": {"fullName": "Ibrahima Konate"}, "shirt": 5, "role": "Defender"}
                            ]
                        ],
                        "bench": [
                            {"id": 110, "name": "Joe Gomez", "shirt": 2}
                        ]
                    },
                    {
                        "teamId": 8456,
                        "formation": "4-2-3-1",
                        "players": [
                            [{"id": 200, "name": {"fullName": "Ederson"}, "shirt": 31, "role": "Keeper"}]
                        ],
                        "bench": []
                    }
                ]
            },
            "matchFacts": {
                "events": {
                    "events": [
                        {"type": "Goal", "time": 23, "nameStr": "Mohamed Salah", "assistStr": "Virgil van Dijk", "isHome": true},
                        {"type": "Card", "card": "Yellow", "time": 40, "nameStr": "Ederson", "isHome": false},
                        {"type": "Substitution", "time": 60, "nameStr": "Joe Gomez"},
                        {"type": "Card", "card": "Red", "time": 77, "nameStr": "Ibrahima Konate", "isHome": true}
                    ]
                }
            }
        })
    }

    #[test]
    fn test_build_lineup_full_content() {
        let lineup = build_lineup("fix_1", 4242, "Liverpool", "Manchester City", &sample_content());

        assert_eq!(lineup.fixture_id, "fix_1");
        assert_eq!(lineup.match_id, 4242);
        assert_eq!(lineup.home.team_name, "Liverpool");
        assert_eq!(lineup.home.formation.as_deref(), Some("4-3-3"));
        // Rows are flattened into a single starting eleven list
        assert_eq!(lineup.home.starting.len(), 3);
        assert_eq!(lineup.home.starting[0].name, "Alisson Becker");
        // Shirt numbers parse from number or string
        assert_eq!(lineup.home.starting[1].shirt_number, Some(4));
        assert_eq!(lineup.home.bench.len(), 1);
        assert_eq!(lineup.home.bench[0].name, "Joe Gomez");
        assert_eq!(lineup.away.starting.len(), 1);
        assert!(lineup.home.starting[0]
            .image_url
            .contains("playerimages/100.png"));
    }

    #[test]
    fn test_events_keep_source_order_and_skip_substitutions() {
        let lineup = build_lineup("fix_1", 1, "Home", "Away", &sample_content());

        assert_eq!(lineup.events.len(), 3);
        assert_eq!(lineup.events[0].kind, "goal");
        assert_eq!(lineup.events[0].minute, 23);
        assert_eq!(lineup.events[0].assist.as_deref(), Some("Virgil van Dijk"));
        assert!(lineup.events[0].is_home);
        assert_eq!(lineup.events[1].kind, "yellow_card");
        assert!(!lineup.events[1].is_home);
        assert_eq!(lineup.events[2].kind, "red_card");
    }

    #[test]
    fn test_build_lineup_tolerates_missing_sections() {
        let lineup = build_lineup("fix_2", 2, "Home", "Away", &json!({}));

        assert_eq!(lineup.home.starting.len(), 0);
        assert_eq!(lineup.home.formation, None);
        assert_eq!(lineup.events.len(), 0);
        // Team names still come from the correlated match
        assert_eq!(lineup.away.team_name, "Away");
    }

    #[test]
    fn test_parse_player_requires_id_and_name() {
        assert!(parse_player(&json!({"name": {"fullName": "No Id"}})).is_none());
        assert!(parse_player(&json!({"id": 5})).is_none());
        let p = parse_player(&json!({"id": "77", "name": "Bare Name"})).unwrap();
        assert_eq!(p.player_id, 77);
        assert_eq!(p.name, "Bare Name");
        assert_eq!(p.shirt_number, None);
    }
}
