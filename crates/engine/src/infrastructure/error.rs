//! Unified engine error types.
//!
//! Wraps the per-layer errors so a caller (an HTTP surface, a CLI) can map
//! every failure to one outcome class without matching on each layer.

use thiserror::Error;

use super::config::ConfigError;
use super::ports::{AuthError, RepoError, UpstreamError};
use crate::use_cases::FavoritesError;

/// Unified error for everything the engine exposes.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Favorites operation failed.
    #[error("Favorites error: {0}")]
    Favorites(#[from] FavoritesError),

    /// Partner catalog request failed.
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    /// Partner credential exchange failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Storage failed outside a favorites operation (startup, migrations).
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Outcome class of an [`EngineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    AlreadyExists,
    NotFound,
    Auth,
    Upstream,
    Internal,
}

impl ErrorKind {
    /// HTTP status an outer surface should answer with.
    pub fn status_code(self) -> u16 {
        match self {
            Self::Validation => 400,
            Self::AlreadyExists => 409,
            Self::NotFound => 404,
            Self::Auth | Self::Upstream => 502,
            Self::Internal => 500,
        }
    }
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Favorites(FavoritesError::Validation(_)) => ErrorKind::Validation,
            Self::Favorites(FavoritesError::AlreadyExists(_)) => ErrorKind::AlreadyExists,
            Self::Favorites(FavoritesError::NotFound(_)) => ErrorKind::NotFound,
            Self::Favorites(FavoritesError::Repo(_)) | Self::Repo(_) => ErrorKind::Internal,
            Self::Upstream(UpstreamError::InvalidRequest(_)) => ErrorKind::Validation,
            Self::Upstream(UpstreamError::NotFound(_)) => ErrorKind::NotFound,
            Self::Upstream(UpstreamError::Auth(_)) | Self::Auth(_) => ErrorKind::Auth,
            Self::Upstream(_) => ErrorKind::Upstream,
            Self::Config(_) => ErrorKind::Internal,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventscout_domain::EventId;

    fn event_id() -> EventId {
        EventId::new("evt-1").expect("valid id")
    }

    #[test]
    fn favorites_errors_map_to_client_statuses() {
        let cases = [
            (FavoritesError::Validation("no id".into()), 400),
            (FavoritesError::AlreadyExists(event_id()), 409),
            (FavoritesError::NotFound(event_id()), 404),
            (FavoritesError::Repo(RepoError::database("insert", "disk I/O")), 500),
        ];

        for (err, status) in cases {
            let err = EngineError::from(err);
            assert_eq!(err.status_code(), status, "{err}");
        }
    }

    #[test]
    fn partner_failures_are_bad_gateway() {
        let auth = EngineError::from(AuthError::Rejected { status: 401 });
        assert_eq!(auth.kind(), ErrorKind::Auth);
        assert_eq!(auth.status_code(), 502);

        let wrapped = EngineError::from(UpstreamError::from(AuthError::Timeout));
        assert_eq!(wrapped.kind(), ErrorKind::Auth);

        let status = EngineError::from(UpstreamError::Status { status: 503 });
        assert_eq!(status.kind(), ErrorKind::Upstream);
        assert_eq!(status.status_code(), 502);
    }

    #[test]
    fn upstream_lookup_errors_keep_their_class() {
        let missing = EngineError::from(UpstreamError::NotFound("Artist not found".into()));
        assert_eq!(missing.kind(), ErrorKind::NotFound);

        let invalid = EngineError::from(UpstreamError::InvalidRequest("blank keyword".into()));
        assert_eq!(invalid.status_code(), 400);
    }

    #[test]
    fn config_errors_are_internal() {
        let err = EngineError::from(ConfigError::Missing("SPOTIFY_CLIENT_ID"));
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(err.to_string().contains("SPOTIFY_CLIENT_ID"));
    }
}
