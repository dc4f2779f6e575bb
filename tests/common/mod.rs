// SPDX-License-Identifier: MIT
// Copyright 2026 FantaPL Developers

use fantapl_sync::config::Config;
use fantapl_sync::db::AppwriteDb;
use fantapl_sync::routes::create_router;
use fantapl_sync::services::{FotmobClient, LineupService, ShortNameTable, SyncEngine};
use fantapl_sync::AppState;
use std::sync::Arc;

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> AppwriteDb {
    AppwriteDb::new_mock()
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = test_db_offline();
    let fotmob = FotmobClient::new(config.fotmob_base_url.clone());
    let short_names = Arc::new(ShortNameTable::default());

    let sync_engine = SyncEngine::new(fotmob.clone(), db.clone(), config.clone(), short_names);
    let lineup_service = LineupService::new(fotmob, db.clone(), config.clone());

    let state = Arc::new(AppState {
        config,
        db,
        sync_engine,
        lineup_service,
    });

    (create_router(state.clone()), state)
}
