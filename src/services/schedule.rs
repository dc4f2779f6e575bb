// SPDX-License-Identifier: MIT
// Copyright 2026 FantaPL Developers

//! Polling-window estimation for scheduled syncs.
//!
//! Cron fires every few minutes all week, but matches only happen on a
//! handful of days per gameweek. The estimator derives an operating window
//! from the persisted fixtures so out-of-window invocations can skip the
//! FotMob fetch entirely.

use crate::db::AppwriteDb;
use crate::models::fixture::{Fixture, MatchStatus};
use crate::time_utils::truncate_to_midnight;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;

/// Page size when listing the whole fixtures collection.
const FIXTURE_PAGE_SIZE: u32 = 100;

/// Operating window of the active gameweek.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingWindow {
    pub gameweek: u32,
    /// One day before the earliest kickoff, truncated to UTC midnight
    pub start: DateTime<Utc>,
    /// Two days after the latest kickoff, truncated to UTC midnight
    pub end: DateTime<Utc>,
}

impl PollingWindow {
    /// Inclusive at both ends.
    pub fn contains(&self, now: DateTime<Utc>) -> bool {
        self.start <= now && now <= self.end
    }
}

/// Compute the active gameweek's window from the stored fixture list.
///
/// The active gameweek is the lowest-numbered one containing at least one
/// non-FINISHED fixture. Returns `None` when there are no fixtures or every
/// gameweek is fully finished.
pub fn active_window(fixtures: &[Fixture]) -> Option<PollingWindow> {
    let mut by_gameweek: BTreeMap<u32, Vec<&Fixture>> = BTreeMap::new();
    for fixture in fixtures {
        by_gameweek.entry(fixture.gameweek).or_default().push(fixture);
    }

    let (gameweek, gw_fixtures) = by_gameweek
        .iter()
        .find(|(_, fs)| fs.iter().any(|f| f.status != MatchStatus::Finished))?;

    let kickoffs: Vec<DateTime<Utc>> = gw_fixtures.iter().filter_map(|f| f.kickoff_utc()).collect();
    let earliest = kickoffs.iter().min().copied()?;
    let latest = kickoffs.iter().max().copied()?;

    Some(PollingWindow {
        gameweek: *gameweek,
        start: truncate_to_midnight(earliest - Duration::days(1)),
        end: truncate_to_midnight(latest + Duration::days(2)),
    })
}

/// Decide whether a scheduled run should do any work right now.
///
/// Fails open: if the fixture list cannot be read, report in-window rather
/// than silently starving legitimate syncs until someone notices.
pub async fn should_poll(store: &AppwriteDb, fixtures_collection: &str, now: DateTime<Utc>) -> bool {
    let fixtures: Vec<Fixture> = match store.list_all(fixtures_collection, FIXTURE_PAGE_SIZE).await {
        Ok(fixtures) => fixtures,
        Err(e) => {
            tracing::warn!(error = %e, "Fixture list unavailable, assuming in-window");
            return true;
        }
    };

    match active_window(&fixtures) {
        Some(window) => {
            let in_window = window.contains(now);
            tracing::debug!(
                gameweek = window.gameweek,
                start = %window.start,
                end = %window.end,
                in_window,
                "Polling window evaluated"
            );
            in_window
        }
        None => {
            tracing::debug!("No active gameweek, out of window");
            false
        }
    }
}
