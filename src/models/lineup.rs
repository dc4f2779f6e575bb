// SPDX-License-Identifier: MIT
// Copyright 2026 FantaPL Developers

//! Lineup and match-event models, stored in the `players` collection.
//!
//! One document per fixture, keyed by the caller-supplied fixture ID and
//! overwritten wholesale on every refresh (no merge).

use serde::{Deserialize, Serialize};

/// Stored lineup/events document for one fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lineup {
    /// Caller-supplied fixture ID (also used as document ID)
    pub fixture_id: String,
    /// FotMob match ID the lineup was fetched from
    pub match_id: u64,
    pub home: TeamLineup,
    pub away: TeamLineup,
    /// Chronological goal/card events
    pub events: Vec<MatchEvent>,
    /// When this document was fetched (ISO 8601)
    pub fetched_at: String,
}

/// One team's lineup within a fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamLineup {
    pub team_name: String,
    /// Formation string, e.g. "4-3-3" (missing before lineups are announced)
    pub formation: Option<String>,
    pub starting: Vec<LineupPlayer>,
    pub bench: Vec<LineupPlayer>,
}

/// A player entry in a lineup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineupPlayer {
    /// FotMob player ID
    pub player_id: u64,
    pub name: String,
    pub shirt_number: Option<u32>,
    pub position: Option<String>,
    /// Headshot URL, derived from the FotMob player ID
    pub image_url: String,
}

/// A goal or card event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchEvent {
    /// Match minute
    pub minute: i64,
    /// "goal", "yellow_card" or "red_card"
    pub kind: String,
    pub player: String,
    /// Assisting player, goals only
    pub assist: Option<String>,
    /// True when the event belongs to the home side
    pub is_home: bool,
}

/// Headshot URL for a FotMob player ID.
pub fn player_image_url(player_id: u64) -> String {
    format!(
        "https://images.fotmob.com/image_resources/playerimages/{}.png",
        player_id
    )
}
