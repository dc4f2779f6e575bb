// SPDX-License-Identifier: MIT
// Copyright 2026 FantaPL Developers

//! Data models for the application.

pub mod fixture;
pub mod lineup;
pub mod team;

pub use fixture::{Fixture, MatchStatus};
pub use lineup::{Lineup, LineupPlayer, MatchEvent, TeamLineup};
pub use team::Team;
