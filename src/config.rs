//! Application configuration loaded from environment variables.
//!
//! The Appwrite API key is the only hard requirement: without it no database
//! call can succeed, so startup fails before any work begins. Everything else
//! has a sensible default for local development.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Appwrite endpoint (e.g. `https://cloud.appwrite.io/v1`)
    pub appwrite_endpoint: String,
    /// Appwrite project ID
    pub appwrite_project_id: String,
    /// Appwrite server API key (secret)
    pub appwrite_api_key: String,
    /// Database ID
    pub database_id: String,
    /// Collection ID for fixture documents
    pub fixtures_collection: String,
    /// Collection ID for real-team documents
    pub teams_collection: String,
    /// Collection ID for lineup/player documents
    pub players_collection: String,

    /// FotMob API base URL
    pub fotmob_base_url: String,
    /// FotMob league ID to sync (47 = Premier League)
    pub league_id: u32,
    /// Season tag written on fixture documents
    pub season: String,

    /// Frontend URL for CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            appwrite_endpoint: env::var("APPWRITE_ENDPOINT")
                .unwrap_or_else(|_| "https://cloud.appwrite.io/v1".to_string()),
            appwrite_project_id: env::var("APPWRITE_PROJECT_ID")
                .map_err(|_| ConfigError::Missing("APPWRITE_PROJECT_ID"))?,
            appwrite_api_key: env::var("APPWRITE_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("APPWRITE_API_KEY"))?,
            database_id: env::var("APPWRITE_DATABASE_ID")
                .unwrap_or_else(|_| "fantapl_db".to_string()),
            fixtures_collection: env::var("FIXTURES_COLLECTION_ID")
                .unwrap_or_else(|_| "fixtures".to_string()),
            teams_collection: env::var("TEAMS_COLLECTION_ID")
                .unwrap_or_else(|_| "real_teams".to_string()),
            players_collection: env::var("PLAYERS_COLLECTION_ID")
                .unwrap_or_else(|_| "players".to_string()),

            fotmob_base_url: env::var("FOTMOB_BASE_URL")
                .unwrap_or_else(|_| "https://www.fotmob.com/api".to_string()),
            league_id: env::var("LEAGUE_ID")
                .unwrap_or_else(|_| "47".to_string())
                .parse()
                .unwrap_or(47),
            season: env::var("SEASON").unwrap_or_else(|_| "2025/2026".to_string()),

            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            appwrite_endpoint: "http://localhost:1".to_string(),
            appwrite_project_id: "test-project".to_string(),
            appwrite_api_key: "test_api_key".to_string(),
            database_id: "fantapl_db".to_string(),
            fixtures_collection: "fixtures".to_string(),
            teams_collection: "real_teams".to_string(),
            players_collection: "players".to_string(),
            fotmob_base_url: "http://localhost:1".to_string(),
            league_id: 47,
            season: "2025/2026".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test because env vars are process-global; parallel test threads
    // would race on set/remove.
    #[test]
    fn test_config_from_env() {
        env::remove_var("APPWRITE_API_KEY");
        env::set_var("APPWRITE_PROJECT_ID", "fantapl");

        // Missing API key is a hard error before any work begins
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Missing("APPWRITE_API_KEY")));

        env::set_var("APPWRITE_API_KEY", "secret-key ");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.appwrite_project_id, "fantapl");
        // Keys are trimmed (trailing whitespace from .env files is common)
        assert_eq!(config.appwrite_api_key, "secret-key");
        assert_eq!(config.database_id, "fantapl_db");
        assert_eq!(config.teams_collection, "real_teams");
        assert_eq!(config.league_id, 47);
        assert_eq!(config.port, 8080);
    }
}
