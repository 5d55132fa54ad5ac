//! Application configuration loaded from environment variables.
//!
//! Values are read once at startup. A `.env` file is honored for local
//! development.

use crate::services::google::GoogleSignInConfig;
use std::env;
use std::path::PathBuf;

/// OAuth scopes requested from Google when none are configured.
const DEFAULT_GOOGLE_SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/calendar.readonly",
    "https://www.googleapis.com/auth/gmail.readonly",
    "https://www.googleapis.com/auth/userinfo.email",
    "https://www.googleapis.com/auth/gmail.labels",
];

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Session backend (Supabase) project URL
    pub supabase_url: String,
    /// Session backend anonymous API key (public)
    pub supabase_anon_key: String,
    /// Application backend base URL
    pub api_base_url: String,
    /// Google OAuth web client ID
    pub google_web_client_id: String,
    /// Google OAuth iOS client ID
    pub google_ios_client_id: String,
    /// Google OAuth scopes
    pub google_scopes: Vec<String>,
    /// Directory for locally persisted state
    pub state_dir: PathBuf,
}

impl Config {
    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: "test_anon_key".to_string(),
            api_base_url: "http://localhost:8080".to_string(),
            google_web_client_id: "test_web_client_id".to_string(),
            google_ios_client_id: "test_ios_client_id".to_string(),
            google_scopes: default_google_scopes(),
            state_dir: env::temp_dir().join("app-session-test"),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            supabase_url: env::var("SUPABASE_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .map_err(|_| ConfigError::Missing("SUPABASE_URL"))?,
            supabase_anon_key: env::var("SUPABASE_ANON_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("SUPABASE_ANON_KEY"))?,
            api_base_url: env::var("API_BASE_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "https://your_api_production_url.com".to_string()),
            google_web_client_id: env::var("GOOGLE_WEB_CLIENT_ID")
                .map_err(|_| ConfigError::Missing("GOOGLE_WEB_CLIENT_ID"))?,
            google_ios_client_id: env::var("GOOGLE_IOS_CLIENT_ID")
                .map_err(|_| ConfigError::Missing("GOOGLE_IOS_CLIENT_ID"))?,
            google_scopes: env::var("GOOGLE_SCOPES")
                .map(|v| parse_scopes(&v))
                .unwrap_or_else(|_| default_google_scopes()),
            state_dir: env::var("APP_STATE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".app-session")),
        })
    }

    /// Google Sign-In SDK configuration derived from this config.
    pub fn google_sign_in_config(&self) -> GoogleSignInConfig {
        GoogleSignInConfig {
            scopes: self.google_scopes.clone(),
            web_client_id: self.google_web_client_id.clone(),
            ios_client_id: self.google_ios_client_id.clone(),
        }
    }
}

fn default_google_scopes() -> Vec<String> {
    DEFAULT_GOOGLE_SCOPES.iter().map(|s| s.to_string()).collect()
}

fn parse_scopes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
