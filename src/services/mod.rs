// SPDX-License-Identifier: MIT
// Copyright 2026 FantaPL Developers

//! Services module - business logic layer.

pub mod correlate;
pub mod fotmob;
pub mod lineup;
pub mod schedule;
pub mod sync;

pub use fotmob::FotmobClient;
pub use lineup::LineupService;
pub use sync::{ShortNameTable, SyncEngine, SyncReport};
