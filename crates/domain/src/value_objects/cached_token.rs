//! Cached partner bearer token.

use chrono::{DateTime, Duration, Utc};
use std::fmt;

/// A bearer token together with the absolute time it stops being accepted.
#[derive(Clone, PartialEq, Eq)]
pub struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    pub fn new(access_token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at,
        }
    }

    /// Build a token from the issuer's relative lifetime.
    ///
    /// Returns `None` when `issued_at + lifetime` is not a representable time.
    pub fn issued_at(
        access_token: impl Into<String>,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Option<Self> {
        let expires_at = issued_at.checked_add_signed(lifetime)?;
        Some(Self::new(access_token, expires_at))
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Usable only while `now < expires_at - margin`.
    pub fn is_usable_at(&self, now: DateTime<Utc>, margin: Duration) -> bool {
        now < self.expires_at - margin
    }
}

// Keep the credential out of logs.
impl fmt::Debug for CachedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedToken")
            .field("access_token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Where a token cache stands relative to its current token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    /// No token has been issued yet.
    Empty,
    /// A token is held and usable without a refresh.
    Valid,
    /// A token is held but inside the refresh margin or past expiry.
    Stale,
}

impl TokenState {
    pub fn of(token: Option<&CachedToken>, now: DateTime<Utc>, margin: Duration) -> Self {
        match token {
            None => Self::Empty,
            Some(token) if token.is_usable_at(now, margin) => Self::Valid,
            Some(_) => Self::Stale,
        }
    }
}

impl fmt::Display for TokenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Valid => write!(f, "valid"),
            Self::Stale => write!(f, "stale"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn usable_until_margin_before_expiry() {
        let token = CachedToken::issued_at("abc", now(), Duration::seconds(3600))
            .expect("expiry in range");
        let margin = Duration::seconds(60);

        assert!(token.is_usable_at(now(), margin));
        assert!(token.is_usable_at(now() + Duration::seconds(3539), margin));
        assert!(!token.is_usable_at(now() + Duration::seconds(3540), margin));
        assert!(!token.is_usable_at(now() + Duration::seconds(4000), margin));
    }

    #[test]
    fn state_follows_token_lifecycle() {
        let margin = Duration::seconds(60);
        assert_eq!(TokenState::of(None, now(), margin), TokenState::Empty);

        let token = CachedToken::issued_at("abc", now(), Duration::seconds(3600))
            .expect("expiry in range");
        assert_eq!(TokenState::of(Some(&token), now(), margin), TokenState::Valid);
        assert_eq!(
            TokenState::of(Some(&token), now() + Duration::seconds(3600), margin),
            TokenState::Stale
        );
    }

    #[test]
    fn unrepresentable_expiry_is_rejected() {
        let lifetime = Duration::seconds(100_000_000_000_000);
        assert!(CachedToken::issued_at("abc", now(), lifetime).is_none());
    }

    #[test]
    fn debug_output_hides_the_credential() {
        let token = CachedToken::new("super-secret", now());
        let rendered = format!("{token:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("redacted"));
    }
}
