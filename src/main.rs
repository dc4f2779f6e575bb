// SPDX-License-Identifier: MIT
// Copyright 2026 FantaPL Developers

//! FantaPL Sync API Server
//!
//! Scrapes FotMob fixtures, lineups and live scores and synchronizes them
//! into the Appwrite collections backing the fantasy-football frontend.

use fantapl_sync::{
    config::Config,
    db::AppwriteDb,
    services::{FotmobClient, LineupService, ShortNameTable, SyncEngine},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment; a missing Appwrite API key fails
    // here, before any request work begins
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(
        port = config.port,
        league = config.league_id,
        "Starting FantaPL Sync API"
    );

    let db = AppwriteDb::new(&config);
    tracing::info!(
        endpoint = %config.appwrite_endpoint,
        database = %config.database_id,
        "Appwrite client initialized"
    );

    let fotmob = FotmobClient::new(config.fotmob_base_url.clone());

    // The short-name override table is shared by everything that needs it
    let short_names = Arc::new(ShortNameTable::default());

    let sync_engine = SyncEngine::new(fotmob.clone(), db.clone(), config.clone(), short_names);
    let lineup_service = LineupService::new(fotmob, db.clone(), config.clone());

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        sync_engine,
        lineup_service,
    });

    // Build router
    let app = fantapl_sync::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fantapl_sync=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
