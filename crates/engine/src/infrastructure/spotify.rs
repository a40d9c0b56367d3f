//! Spotify Web API adapters.
//!
//! `SpotifyTokenIssuer` runs the client-credentials exchange behind
//! `TokenIssuerPort`; `SpotifyClient` is the artist catalog pass-through that
//! borrows bearer tokens from a shared `TokenCache`.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::infrastructure::http_client::{self, read_json, transport_error};
use crate::infrastructure::ports::{
    ArtistCatalogPort, AuthError, IssuedToken, TokenIssuerPort, UpstreamError,
};
use crate::infrastructure::token_cache::TokenCache;

/// Default Spotify accounts token endpoint.
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Default Spotify Web API base URL.
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";

/// Default bound on any single partner request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// Albums shown per artist, matching the event detail page.
const ALBUM_LIMIT: &str = "8";
const ALBUM_MARKET: &str = "US";

// =============================================================================
// Token issuer
// =============================================================================

/// Client-credentials token exchange against the Spotify accounts service.
pub struct SpotifyTokenIssuer {
    client: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl SpotifyTokenIssuer {
    pub fn new(token_url: &str, client_id: &str, client_secret: &str, timeout: Duration) -> Self {
        Self {
            client: http_client::client(timeout),
            token_url: token_url.to_string(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

fn auth_transport_error(e: reqwest::Error) -> AuthError {
    if e.is_timeout() {
        AuthError::Timeout
    } else {
        AuthError::RequestFailed(e.without_url().to_string())
    }
}

#[async_trait]
impl TokenIssuerPort for SpotifyTokenIssuer {
    async fn issue(&self) -> Result<IssuedToken, AuthError> {
        let response = self
            .client
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(auth_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Spotify rejected client credentials");
            return Err(AuthError::Rejected {
                status: status.as_u16(),
            });
        }

        let body: TokenResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                AuthError::Timeout
            } else {
                AuthError::InvalidResponse(e.without_url().to_string())
            }
        })?;

        Ok(IssuedToken {
            access_token: body.access_token,
            expires_in: Duration::from_secs(body.expires_in),
        })
    }
}

// =============================================================================
// Artist catalog
// =============================================================================

/// Artist lookups against the Spotify Web API.
#[derive(Clone)]
pub struct SpotifyClient {
    client: Client,
    api_base_url: String,
    tokens: Arc<TokenCache>,
}

impl SpotifyClient {
    pub fn new(api_base_url: &str, tokens: Arc<TokenCache>, timeout: Duration) -> Self {
        Self {
            client: http_client::client(timeout),
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    async fn get_json(
        &self,
        path: &str,
        query: &[(&str, &str)],
        resource: &str,
    ) -> Result<Value, UpstreamError> {
        let token = self.tokens.get_token().await?;

        let response = self
            .client
            .get(format!("{}{}", self.api_base_url, path))
            .bearer_auth(token)
            .query(query)
            .send()
            .await
            .map_err(transport_error)?;

        read_json(response, resource, path).await
    }
}

/// Spotify ids are base62; anything else would escape the path segment.
fn validate_artist_id(artist_id: &str) -> Result<&str, UpstreamError> {
    if artist_id.is_empty() || !artist_id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(UpstreamError::InvalidRequest(format!(
            "Invalid artist ID: {artist_id:?}"
        )));
    }
    Ok(artist_id)
}

#[async_trait]
impl ArtistCatalogPort for SpotifyClient {
    async fn search_artist(&self, keyword: &str) -> Result<Value, UpstreamError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(UpstreamError::InvalidRequest("Keyword is required".to_string()));
        }

        let body = self
            .get_json(
                "/search",
                &[("q", keyword), ("type", "artist"), ("limit", "1")],
                "Artist",
            )
            .await?;

        let Some(items) = body.pointer("/artists/items") else {
            return Err(UpstreamError::InvalidResponse(
                "search response has no artists".to_string(),
            ));
        };

        match items.get(0) {
            Some(artist) => {
                tracing::debug!(keyword, artist = %artist["name"], "Found artist");
                Ok(artist.clone())
            }
            None => Err(UpstreamError::NotFound(format!("Artist matching {keyword:?}"))),
        }
    }

    async fn get_artist(&self, artist_id: &str) -> Result<Value, UpstreamError> {
        let artist_id = validate_artist_id(artist_id)?;
        self.get_json(&format!("/artists/{artist_id}"), &[], "Artist")
            .await
    }

    async fn get_artist_albums(&self, artist_id: &str) -> Result<Value, UpstreamError> {
        let artist_id = validate_artist_id(artist_id)?;
        let albums = self
            .get_json(
                &format!("/artists/{artist_id}/albums"),
                &[
                    ("include_groups", "album"),
                    ("market", ALBUM_MARKET),
                    ("limit", ALBUM_LIMIT),
                ],
                "Artist",
            )
            .await?;

        tracing::debug!(
            artist_id,
            count = albums["items"].as_array().map_or(0, Vec::len),
            "Fetched artist albums"
        );
        Ok(albums)
    }
}
