//! Process configuration, read once at startup and immutable afterwards.
//!
//! Environment variables:
//! - `PORT` - HTTP listen port (default: `3333`)
//! - `API_BASE_URL` - base URL confirmation links point at
//! - `WEB_BASE_URL` - frontend base URL confirm redirects land on
//! - `DATABASE_PATH` - SQLite file path (default: platform data dir)
//! - `MAIL_API_URL` - HTTP mail API endpoint; unset means log-only dispatch
//! - `MAIL_API_KEY` - bearer token for the mail API (optional)
//! - `MAIL_FROM_NAME` / `MAIL_FROM_ADDRESS` - sender identity

use std::path::PathBuf;

/// Default base URL for local development.
const DEFAULT_API_BASE_URL: &str = "http://localhost:3333";
/// Default frontend URL for local development.
const DEFAULT_WEB_BASE_URL: &str = "http://localhost:3000";

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub api_base_url: String,
    pub web_base_url: String,
    pub database_path: Option<PathBuf>,
    pub mail: MailConfig,
}

/// Mail transport settings and sender identity.
#[derive(Clone, Debug)]
pub struct MailConfig {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub from_name: String,
    pub from_address: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(3333);

        let api_base_url = std::env::var("API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        let web_base_url = std::env::var("WEB_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_WEB_BASE_URL.to_string());

        let database_path = std::env::var("DATABASE_PATH").ok().map(PathBuf::from);

        Self {
            port,
            api_base_url,
            web_base_url,
            database_path,
            mail: MailConfig::from_env(),
        }
    }
}

impl MailConfig {
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("MAIL_API_URL").ok(),
            api_key: std::env::var("MAIL_API_KEY").ok(),
            from_name: std::env::var("MAIL_FROM_NAME")
                .unwrap_or_else(|_| "Planner Team".to_string()),
            from_address: std::env::var("MAIL_FROM_ADDRESS")
                .unwrap_or_else(|_| "hello@planner.app".to_string()),
        }
    }
}
