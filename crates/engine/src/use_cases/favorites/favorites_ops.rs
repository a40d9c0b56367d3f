//! Favorites store operations.
//!
//! The persistence surface request handlers call: list, add, remove,
//! exists and clear over a personal list of upstream events.

use std::sync::Arc;

use eventscout_domain::{DomainError, EventId, FavoriteDraft, FavoriteEvent};

use crate::infrastructure::ports::{ClockPort, FavoriteRepo, InsertOutcome, RepoError};

/// Favorites store use case.
///
/// Validates caller documents, stamps `addedAt`, and turns repository
/// outcomes into typed results. Uniqueness itself is enforced by the repo.
pub struct FavoritesOps {
    repo: Arc<dyn FavoriteRepo>,
    clock: Arc<dyn ClockPort>,
}

impl FavoritesOps {
    pub fn new(repo: Arc<dyn FavoriteRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self { repo, clock }
    }

    /// All favorites, oldest first.
    pub async fn list(&self) -> Result<Vec<FavoriteEvent>, FavoritesError> {
        let favorites = self.repo.list().await?;
        tracing::debug!(count = favorites.len(), "Retrieved favorites");
        Ok(favorites)
    }

    /// Add an event document to the favorites.
    ///
    /// Fails with `AlreadyExists` when the id is already stored, so callers
    /// can tell a duplicate from a fresh insert.
    pub async fn add(&self, document: serde_json::Value) -> Result<EventId, FavoritesError> {
        let draft = FavoriteDraft::from_document(document)?;
        let favorite = draft.stamp(self.clock.now());

        match self.repo.insert_if_absent(&favorite).await? {
            InsertOutcome::Inserted => {
                tracing::info!(event_id = %favorite.id(), "Added favorite");
                Ok(favorite.id().clone())
            }
            InsertOutcome::AlreadyPresent => {
                tracing::debug!(event_id = %favorite.id(), "Favorite already stored");
                Err(FavoritesError::AlreadyExists(favorite.id().clone()))
            }
        }
    }

    /// Remove one favorite. Returns the number of documents removed, which is
    /// always 1 on success.
    pub async fn remove(&self, id: &str) -> Result<u64, FavoritesError> {
        let id = EventId::new(id)?;

        match self.repo.delete(&id).await? {
            0 => Err(FavoritesError::NotFound(id)),
            1 => {
                tracing::info!(event_id = %id, "Removed favorite");
                Ok(1)
            }
            removed => {
                tracing::error!(event_id = %id, removed, "Removed more than one favorite for an id");
                Err(RepoError::constraint(format!(
                    "{removed} favorites stored under id {id}"
                ))
                .into())
            }
        }
    }

    /// Whether an event is a favorite.
    ///
    /// Only drives a display toggle, so read failures degrade to `false`.
    pub async fn exists(&self, id: &str) -> bool {
        let Ok(id) = EventId::new(id) else {
            return false;
        };

        match self.repo.contains(&id).await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    event_id = %id,
                    "Failed to check favorite, reporting not a favorite"
                );
                false
            }
        }
    }

    /// Delete every favorite. For tests and operations, not the user flow.
    pub async fn clear(&self) -> Result<u64, FavoritesError> {
        let removed = self.repo.delete_all().await?;
        tracing::info!(removed, "Cleared favorites");
        Ok(removed)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FavoritesError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Event already in favorites: {0}")]
    AlreadyExists(EventId),
    #[error("Favorite not found: {0}")]
    NotFound(EventId),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl From<DomainError> for FavoritesError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) | DomainError::InvalidId(msg) => Self::Validation(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockClockPort, MockFavoriteRepo};
    use chrono::{DateTime, TimeZone, Utc};
    use mockall::predicate::*;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 10, 30, 0)
            .single()
            .expect("valid timestamp")
    }

    fn clock() -> MockClockPort {
        let mut clock = MockClockPort::new();
        clock.expect_now().returning(now);
        clock
    }

    fn event_id(raw: &str) -> EventId {
        EventId::new(raw).expect("valid id")
    }

    #[tokio::test]
    async fn add_stamps_added_at_and_returns_id() {
        let mut repo = MockFavoriteRepo::new();
        repo.expect_insert_if_absent()
            .withf(|favorite| {
                favorite.id().as_str() == "evt-1"
                    && favorite.added_at() == now()
                    && favorite.attribute("name") == Some(&json!("Concert A"))
            })
            .times(1)
            .returning(|_| Ok(InsertOutcome::Inserted));

        let ops = FavoritesOps::new(Arc::new(repo), Arc::new(clock()));
        let id = ops
            .add(json!({ "id": "evt-1", "name": "Concert A", "addedAt": "2001-01-01T00:00:00Z" }))
            .await
            .expect("add");

        assert_eq!(id, event_id("evt-1"));
    }

    #[tokio::test]
    async fn add_without_id_never_reaches_repo() {
        // No expectations: any repo call panics.
        let repo = MockFavoriteRepo::new();
        let ops = FavoritesOps::new(Arc::new(repo), Arc::new(clock()));

        let err = ops
            .add(json!({ "name": "Concert A" }))
            .await
            .expect_err("missing id");
        assert!(matches!(err, FavoritesError::Validation(_)));
    }

    #[tokio::test]
    async fn add_reports_duplicates_as_already_exists() {
        let mut repo = MockFavoriteRepo::new();
        repo.expect_insert_if_absent()
            .returning(|_| Ok(InsertOutcome::AlreadyPresent));

        let ops = FavoritesOps::new(Arc::new(repo), Arc::new(clock()));
        let err = ops
            .add(json!({ "id": "evt-1" }))
            .await
            .expect_err("duplicate");

        assert!(matches!(err, FavoritesError::AlreadyExists(id) if id.as_str() == "evt-1"));
    }

    #[tokio::test]
    async fn remove_maps_zero_rows_to_not_found() {
        let mut repo = MockFavoriteRepo::new();
        repo.expect_delete()
            .with(eq(event_id("evt-404")))
            .returning(|_| Ok(0));

        let ops = FavoritesOps::new(Arc::new(repo), Arc::new(clock()));
        let err = ops.remove("evt-404").await.expect_err("not found");

        assert!(matches!(err, FavoritesError::NotFound(id) if id.as_str() == "evt-404"));
    }

    #[tokio::test]
    async fn remove_returns_one_on_success() {
        let mut repo = MockFavoriteRepo::new();
        repo.expect_delete()
            .with(eq(event_id("evt-1")))
            .times(1)
            .returning(|_| Ok(1));

        let ops = FavoritesOps::new(Arc::new(repo), Arc::new(clock()));
        assert_eq!(ops.remove("evt-1").await.expect("remove"), 1);
    }

    #[tokio::test]
    async fn remove_flags_multiple_rows_as_constraint_violation() {
        let mut repo = MockFavoriteRepo::new();
        repo.expect_delete().returning(|_| Ok(2));

        let ops = FavoritesOps::new(Arc::new(repo), Arc::new(clock()));
        let err = ops.remove("evt-1").await.expect_err("broken uniqueness");

        assert!(matches!(
            err,
            FavoritesError::Repo(RepoError::ConstraintViolation(_))
        ));
    }

    #[tokio::test]
    async fn remove_rejects_blank_ids() {
        let repo = MockFavoriteRepo::new();
        let ops = FavoritesOps::new(Arc::new(repo), Arc::new(clock()));

        let err = ops.remove("  ").await.expect_err("blank id");
        assert!(matches!(err, FavoritesError::Validation(_)));
    }

    #[tokio::test]
    async fn exists_degrades_to_false_on_read_errors() {
        let mut repo = MockFavoriteRepo::new();
        repo.expect_contains()
            .returning(|_| Err(RepoError::database("contains_favorite", "database is locked")));

        let ops = FavoritesOps::new(Arc::new(repo), Arc::new(clock()));
        assert!(!ops.exists("evt-1").await);
    }

    #[tokio::test]
    async fn exists_is_false_for_blank_ids() {
        let repo = MockFavoriteRepo::new();
        let ops = FavoritesOps::new(Arc::new(repo), Arc::new(clock()));
        assert!(!ops.exists("").await);
    }

    #[tokio::test]
    async fn list_propagates_repo_errors() {
        let mut repo = MockFavoriteRepo::new();
        repo.expect_list()
            .returning(|| Err(RepoError::database("list_favorites", "no such table")));

        let ops = FavoritesOps::new(Arc::new(repo), Arc::new(clock()));
        let err = ops.list().await.expect_err("repo failure");
        assert!(matches!(err, FavoritesError::Repo(_)));
    }

    #[tokio::test]
    async fn clear_returns_removed_count() {
        let mut repo = MockFavoriteRepo::new();
        repo.expect_delete_all().times(1).returning(|| Ok(4));

        let ops = FavoritesOps::new(Arc::new(repo), Arc::new(clock()));
        assert_eq!(ops.clear().await.expect("clear"), 4);
    }
}
