//! Repository port traits for database access.

use async_trait::async_trait;
use eventscout_domain::{EventId, FavoriteEvent};

use super::error::RepoError;

/// Result of an atomic insert-if-absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    AlreadyPresent,
}

// =============================================================================
// Favorites Storage
// =============================================================================

/// Storage for favorite events, keyed by upstream event id.
///
/// Implementations must enforce id uniqueness themselves: `insert_if_absent`
/// is a single atomic operation, never a lookup followed by a write.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoriteRepo: Send + Sync {
    /// All favorites in insertion order.
    async fn list(&self) -> Result<Vec<FavoriteEvent>, RepoError>;
    async fn insert_if_absent(&self, favorite: &FavoriteEvent) -> Result<InsertOutcome, RepoError>;
    /// Returns the number of rows removed (0 or 1).
    async fn delete(&self, id: &EventId) -> Result<u64, RepoError>;
    async fn contains(&self, id: &EventId) -> Result<bool, RepoError>;
    async fn delete_all(&self) -> Result<u64, RepoError>;
}
