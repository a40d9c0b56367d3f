//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    clock::SystemClock,
    config::EngineConfig,
    error::EngineError,
    favorites::SqliteFavoriteRepo,
    ports::{ArtistCatalogPort, ClockPort, EventCatalogPort, TokenIssuerPort},
    spotify::{SpotifyClient, SpotifyTokenIssuer},
    ticketmaster::TicketmasterClient,
    token_cache::TokenCache,
};
use crate::use_cases::FavoritesOps;

/// Main application state.
///
/// Holds the favorites use case and the partner clients. An outer surface
/// (HTTP router, CLI) owns one of these and shares it across requests.
pub struct App {
    pub favorites: Arc<FavoritesOps>,
    pub events: Arc<dyn EventCatalogPort>,
    pub artists: Arc<dyn ArtistCatalogPort>,
    /// Shared by every partner call; exposed for health reporting.
    pub tokens: Arc<TokenCache>,
}

impl App {
    pub fn new(
        favorites: Arc<FavoritesOps>,
        events: Arc<dyn EventCatalogPort>,
        artists: Arc<dyn ArtistCatalogPort>,
        tokens: Arc<TokenCache>,
    ) -> Self {
        Self {
            favorites,
            events,
            artists,
            tokens,
        }
    }

    /// Open the favorites store and build the partner clients from config.
    ///
    /// Nothing is sent to a partner here; the first token is fetched lazily.
    pub async fn from_config(config: &EngineConfig) -> Result<Self, EngineError> {
        let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());

        let repo = Arc::new(SqliteFavoriteRepo::new(&config.favorites_db).await?);
        let favorites = Arc::new(FavoritesOps::new(repo, clock.clone()));

        let events: Arc<dyn EventCatalogPort> = Arc::new(TicketmasterClient::new(
            &config.ticketmaster.api_url,
            &config.ticketmaster.api_key,
            config.request_timeout,
        ));

        let issuer: Arc<dyn TokenIssuerPort> = Arc::new(SpotifyTokenIssuer::new(
            &config.spotify.token_url,
            &config.spotify.client_id,
            &config.spotify.client_secret,
            config.request_timeout,
        ));
        let tokens = Arc::new(TokenCache::new(
            issuer,
            clock,
            config.token_refresh_margin,
        ));
        let artists: Arc<dyn ArtistCatalogPort> = Arc::new(SpotifyClient::new(
            &config.spotify.api_url,
            tokens.clone(),
            config.request_timeout,
        ));

        tracing::info!(
            favorites_db = %config.favorites_db,
            api_url = %config.spotify.api_url,
            "Engine wired"
        );

        Ok(Self::new(favorites, events, artists, tokens))
    }
}
