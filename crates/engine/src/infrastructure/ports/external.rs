//! External service port traits.

use async_trait::async_trait;
use eventscout_domain::EventSearch;
use std::time::Duration;

use super::error::{AuthError, UpstreamError};

/// A freshly issued bearer token and its lifetime as stated by the issuer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in: Duration,
}

/// Exchanges partner credentials for a bearer token.
///
/// One call is one network round trip; caching lives in `TokenCache`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenIssuerPort: Send + Sync {
    async fn issue(&self) -> Result<IssuedToken, AuthError>;
}

/// Music-artist catalog lookups. Payloads are passed through unchanged.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArtistCatalogPort: Send + Sync {
    /// Best match for a keyword search.
    async fn search_artist(&self, keyword: &str) -> Result<serde_json::Value, UpstreamError>;
    async fn get_artist(&self, artist_id: &str) -> Result<serde_json::Value, UpstreamError>;
    async fn get_artist_albums(&self, artist_id: &str)
        -> Result<serde_json::Value, UpstreamError>;
}

/// Ticketing partner lookups. Payloads are passed through unchanged.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventCatalogPort: Send + Sync {
    /// Autocomplete suggestions for a partial keyword.
    async fn suggest(&self, keyword: &str) -> Result<serde_json::Value, UpstreamError>;
    async fn search_events(&self, search: &EventSearch)
        -> Result<serde_json::Value, UpstreamError>;
    async fn get_event(&self, event_id: &str) -> Result<serde_json::Value, UpstreamError>;
}
