//! Error types for port operations.

/// Repository operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Database operation failed - includes operation name for tracing.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// Serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Storage constraint violated.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

impl RepoError {
    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    /// Create a ConstraintViolation error.
    pub fn constraint(message: impl ToString) -> Self {
        Self::ConstraintViolation(message.to_string())
    }
}

/// Credential refresh failures.
///
/// Cloned so every caller waiting on one refresh sees the same outcome.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Token request failed: {0}")]
    RequestFailed(String),
    #[error("Token request timed out")]
    Timeout,
    #[error("Token issuer rejected credentials with status {status}")]
    Rejected { status: u16 },
    #[error("Invalid token response: {0}")]
    InvalidResponse(String),
}

/// Failures of pass-through calls to a partner API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpstreamError {
    #[error("Authorization failed: {0}")]
    Auth(#[from] AuthError),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Upstream request failed: {0}")]
    RequestFailed(String),
    #[error("Upstream returned status {status}")]
    Status { status: u16 },
    #[error("{0} not found upstream")]
    NotFound(String),
    #[error("Invalid upstream response: {0}")]
    InvalidResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_error_carries_context() {
        let err = RepoError::database("insert_favorite", "disk I/O error");
        assert_eq!(
            err.to_string(),
            "Database error in insert_favorite: disk I/O error"
        );
        assert!(matches!(
            RepoError::constraint("two rows for evt-1"),
            RepoError::ConstraintViolation(_)
        ));
    }

    #[test]
    fn auth_error_converts_into_upstream_error() {
        let err: UpstreamError = AuthError::Rejected { status: 401 }.into();
        assert_eq!(err, UpstreamError::Auth(AuthError::Rejected { status: 401 }));
        assert!(err.to_string().contains("401"));
    }
}
