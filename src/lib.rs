// SPDX-License-Identifier: MIT
// Copyright 2026 FantaPL Developers

//! FantaPL sync backend: scrape FotMob match data and keep the Appwrite
//! collections the fantasy-football frontend reads from up to date.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::AppwriteDb;
use services::{LineupService, SyncEngine};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: AppwriteDb,
    pub sync_engine: SyncEngine,
    pub lineup_service: LineupService,
}
