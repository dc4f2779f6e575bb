// SPDX-License-Identifier: MIT
// Copyright 2026 FantaPL Developers

//! Real-world team model, synced from FotMob into the `real_teams` collection.

use serde::{Deserialize, Serialize};

/// Stored team document.
///
/// Document ID is `team_<fotmob_id>`, so repeated sync runs converge on the
/// same document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// FotMob team ID
    pub team_id: u64,
    /// Full display name (e.g. "Manchester United")
    pub name: String,
    /// Short display name (e.g. "Man Utd")
    pub short_name: String,
    /// Crest image URL, derived from the FotMob team ID
    pub logo_url: String,
}

/// Deterministic document ID for a team.
pub fn team_doc_id(team_id: u64) -> String {
    format!("team_{}", team_id)
}

/// Crest URL for a FotMob team ID.
pub fn team_logo_url(team_id: u64) -> String {
    format!(
        "https://images.fotmob.com/image_resources/logo/teamlogo/{}.png",
        team_id
    )
}
