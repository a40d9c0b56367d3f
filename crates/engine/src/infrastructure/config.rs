//! Environment-driven engine configuration.

use std::fmt;
use std::time::Duration;

use crate::infrastructure::spotify::{
    DEFAULT_REQUEST_TIMEOUT, DEFAULT_SPOTIFY_API_URL, DEFAULT_SPOTIFY_TOKEN_URL,
};
use crate::infrastructure::ticketmaster::DEFAULT_TICKETMASTER_API_URL;
use crate::infrastructure::token_cache::{DEFAULT_REFRESH_MARGIN, MAX_REFRESH_MARGIN};

/// Default favorites database file.
pub const DEFAULT_FAVORITES_DB: &str = "favorites.db";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),
    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Settings for the engine's storage and partner clients.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub favorites_db: String,
    pub spotify: SpotifyConfig,
    pub ticketmaster: TicketmasterConfig,
    pub token_refresh_margin: Duration,
    pub request_timeout: Duration,
}

/// Spotify client-credentials settings.
#[derive(Clone)]
pub struct SpotifyConfig {
    pub client_id: String,
    pub client_secret: String,
    pub token_url: String,
    pub api_url: String,
}

impl fmt::Debug for SpotifyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpotifyConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("token_url", &self.token_url)
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// Ticketmaster Discovery API settings.
#[derive(Clone)]
pub struct TicketmasterConfig {
    pub api_key: String,
    pub api_url: String,
}

impl fmt::Debug for TicketmasterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TicketmasterConfig")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl EngineConfig {
    /// Load `.env.local` / `.env` if present, then read the process environment.
    ///
    /// Supported environment variables:
    /// - FAVORITES_DB: SQLite file for favorites (default: favorites.db)
    /// - SPOTIFY_CLIENT_ID, SPOTIFY_CLIENT_SECRET: required
    /// - SPOTIFY_TOKEN_URL, SPOTIFY_API_URL: partner endpoints
    /// - TICKETMASTER_API_KEY: required
    /// - TICKETMASTER_API_URL: Discovery API base
    /// - TOKEN_REFRESH_MARGIN_SECS: seconds before expiry to refresh (default: 60, max: 300)
    /// - TOKEN_REQUEST_TIMEOUT_SECS: partner request timeout (default: 10)
    pub fn from_env() -> Result<Self, ConfigError> {
        load_dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));
        let seconds = |key: &'static str, default: Duration| match get(key) {
            None => Ok(default),
            Some(value) => value
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::Invalid { name: key, value }),
        };

        let request_timeout = seconds("TOKEN_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT)?;
        if request_timeout.is_zero() {
            return Err(ConfigError::Invalid {
                name: "TOKEN_REQUEST_TIMEOUT_SECS",
                value: "0".to_string(),
            });
        }

        let token_refresh_margin = seconds("TOKEN_REFRESH_MARGIN_SECS", DEFAULT_REFRESH_MARGIN)?;
        if token_refresh_margin > MAX_REFRESH_MARGIN {
            return Err(ConfigError::Invalid {
                name: "TOKEN_REFRESH_MARGIN_SECS",
                value: token_refresh_margin.as_secs().to_string(),
            });
        }

        Ok(Self {
            favorites_db: get("FAVORITES_DB").unwrap_or_else(|| DEFAULT_FAVORITES_DB.to_string()),
            spotify: SpotifyConfig {
                client_id: require("SPOTIFY_CLIENT_ID")?,
                client_secret: require("SPOTIFY_CLIENT_SECRET")?,
                token_url: get("SPOTIFY_TOKEN_URL")
                    .unwrap_or_else(|| DEFAULT_SPOTIFY_TOKEN_URL.to_string()),
                api_url: get("SPOTIFY_API_URL")
                    .unwrap_or_else(|| DEFAULT_SPOTIFY_API_URL.to_string()),
            },
            ticketmaster: TicketmasterConfig {
                api_key: require("TICKETMASTER_API_KEY")?,
                api_url: get("TICKETMASTER_API_URL")
                    .unwrap_or_else(|| DEFAULT_TICKETMASTER_API_URL.to_string()),
            },
            token_refresh_margin,
            request_timeout,
        })
    }
}

/// Load environment overrides from the working directory.
pub fn load_dotenv() {
    // Prefer local overrides; dotenvy never replaces variables already set.
    for filename in [".env.local", ".env"] {
        let path = std::path::Path::new(filename);
        if path.exists() {
            if let Err(e) = dotenvy::from_path(path) {
                tracing::warn!(error = %e, file = filename, "Failed to load env file");
            }
        }
    }
}
