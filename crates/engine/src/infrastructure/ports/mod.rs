//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Favorites persistence (could swap SQLite -> a document store)
//! - Partner credentials (could swap the client-credentials issuer)
//! - Artist catalog calls (could swap the music partner)
//! - Event catalog calls (could swap the ticketing partner)
//! - Clock (for testing)

mod error;
mod external;
mod repos;
mod testing;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::{FavoriteRepo, InsertOutcome};

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{ArtistCatalogPort, EventCatalogPort, IssuedToken, TokenIssuerPort};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use external::{MockArtistCatalogPort, MockEventCatalogPort, MockTokenIssuerPort};
#[cfg(test)]
pub use repos::MockFavoriteRepo;
#[cfg(test)]
pub use testing::MockClockPort;

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::ClockPort;

// =============================================================================
// Error Types
// =============================================================================
pub use error::{AuthError, RepoError, UpstreamError};
