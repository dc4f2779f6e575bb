// SPDX-License-Identifier: MIT
// Copyright 2026 FantaPL Developers

//! Fuzzy team-name correlation.
//!
//! Human-entered team names rarely match FotMob's display names exactly
//! ("Arsenal" vs "Arsenal FC", "AFC Bournemouth" vs "Bournemouth"). The
//! correlator is deliberately permissive: case-insensitive containment in
//! either direction after stripping the FC/AFC tokens. It can false-positive
//! on very short names, so a kickoff-time bound is always applied alongside
//! it when locating a match.

use crate::services::fotmob::{RawMatch, RawTeam};
use crate::time_utils::within_hours;
use chrono::{DateTime, Utc};

/// Maximum distance between a caller-supplied date and a candidate kickoff.
const MATCH_DATE_TOLERANCE_HOURS: i64 = 48;

/// Strip FC/AFC tokens and collapse whitespace for comparison.
fn clean_name(name: &str) -> String {
    let cleaned = name.to_lowercase().replace("afc", "").replace("fc", "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True if either cleaned name contains the other.
pub fn names_correlate(a: &str, b: &str) -> bool {
    let a = clean_name(a);
    let b = clean_name(b);
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(&b) || b.contains(&a)
}

/// True if the candidate name correlates with the team's display name or its
/// FotMob short name ("Spurs" for "Tottenham Hotspur").
fn team_correlates(candidate: &str, team: &RawTeam) -> bool {
    names_correlate(candidate, &team.name)
        || team
            .short_name
            .as_deref()
            .is_some_and(|short| names_correlate(candidate, short))
}

/// Locate a match by team names and approximate date.
///
/// Returns the first record in source order where both names correlate and
/// the kickoff is within 48 hours of `target`. No ranking among multiple
/// candidates.
pub fn find_match<'a>(
    matches: &'a [RawMatch],
    home_name: &str,
    away_name: &str,
    target: DateTime<Utc>,
) -> Option<&'a RawMatch> {
    matches.iter().find(|m| {
        team_correlates(home_name, &m.home)
            && team_correlates(away_name, &m.away)
            && m.kickoff_utc()
                .is_some_and(|kickoff| within_hours(kickoff, target, MATCH_DATE_TOLERANCE_HOURS))
    })
}
