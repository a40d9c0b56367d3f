//! Partner bearer-token cache.
//!
//! Holds one token per partner API for the life of the process and refreshes
//! it through a `TokenIssuerPort` when it is missing or inside the refresh
//! margin. Refreshes are single-flight: concurrent callers that find the
//! token unusable queue on one mutex, and whoever gets there after a refresh
//! finished shares that refresh's outcome instead of starting another.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use eventscout_domain::{CachedToken, TokenState};
use tokio::sync::{Mutex, RwLock};

use crate::infrastructure::ports::{AuthError, ClockPort, TokenIssuerPort};

/// Subtracted from the issuer's lifetime so a token never expires mid-request.
pub const DEFAULT_REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Largest accepted refresh margin. Partner tokens live about an hour.
pub const MAX_REFRESH_MARGIN: Duration = Duration::from_secs(300);

/// Process-wide cache for one partner's bearer token.
pub struct TokenCache {
    issuer: Arc<dyn TokenIssuerPort>,
    clock: Arc<dyn ClockPort>,
    refresh_margin: chrono::Duration,
    current: RwLock<Option<CachedToken>>,
    refresh: Mutex<RefreshOutcome>,
    completed_refreshes: AtomicU64,
}

/// Outcome of the most recent refresh, guarded by the refresh mutex.
#[derive(Default)]
struct RefreshOutcome {
    last: Option<Result<String, AuthError>>,
}

impl TokenCache {
    pub fn new(
        issuer: Arc<dyn TokenIssuerPort>,
        clock: Arc<dyn ClockPort>,
        refresh_margin: Duration,
    ) -> Self {
        let refresh_margin = if refresh_margin > MAX_REFRESH_MARGIN {
            tracing::warn!(
                margin_secs = refresh_margin.as_secs(),
                max_secs = MAX_REFRESH_MARGIN.as_secs(),
                "Refresh margin too large, using default"
            );
            DEFAULT_REFRESH_MARGIN
        } else {
            refresh_margin
        };
        let refresh_margin = chrono::Duration::from_std(refresh_margin)
            .unwrap_or_else(|_| chrono::Duration::seconds(60));

        Self {
            issuer,
            clock,
            refresh_margin,
            current: RwLock::new(None),
            refresh: Mutex::new(RefreshOutcome::default()),
            completed_refreshes: AtomicU64::new(0),
        }
    }

    /// Bearer token for an outbound call.
    ///
    /// A valid cached token is returned without touching the issuer. Otherwise
    /// exactly one refresh runs and every concurrent caller gets its result,
    /// even when the fresh token is already inside the margin. Failures are
    /// returned as-is; retrying is the caller's decision.
    pub async fn get_token(&self) -> Result<String, AuthError> {
        if let Some(token) = self.usable_token().await {
            return Ok(token);
        }

        let seen = self.completed_refreshes.load(Ordering::Acquire);
        let mut outcome = self.refresh.lock().await;

        if let Some(token) = self.usable_token().await {
            return Ok(token);
        }

        // A refresh finished while we queued; its result is ours too.
        if self.completed_refreshes.load(Ordering::Acquire) != seen {
            if let Some(result) = &outcome.last {
                return result.clone();
            }
        }

        let result = self.refresh_token().await;
        outcome.last = Some(result.clone());
        self.completed_refreshes.fetch_add(1, Ordering::Release);
        result
    }

    /// Current cache state, for diagnostics.
    pub async fn state(&self) -> TokenState {
        let current = self.current.read().await;
        TokenState::of(current.as_ref(), self.clock.now(), self.refresh_margin)
    }

    async fn usable_token(&self) -> Option<String> {
        let now = self.clock.now();
        self.current
            .read()
            .await
            .as_ref()
            .filter(|token| token.is_usable_at(now, self.refresh_margin))
            .map(|token| token.access_token().to_string())
    }

    // Caller must hold the refresh mutex.
    async fn refresh_token(&self) -> Result<String, AuthError> {
        let state = self.state().await;
        tracing::debug!(%state, "Refreshing partner token");
        let issued_at = self.clock.now();

        let issued = match self.issuer.issue().await {
            Ok(issued) => issued,
            Err(e) => {
                tracing::warn!(error = %e, "Partner token refresh failed");
                return Err(e);
            }
        };

        if issued.access_token.trim().is_empty() {
            tracing::warn!("Partner token issuer returned an empty access token");
            return Err(AuthError::InvalidResponse("empty access token".to_string()));
        }
        if issued.expires_in.is_zero() {
            tracing::warn!("Partner token issuer returned a zero lifetime");
            return Err(AuthError::InvalidResponse("zero token lifetime".to_string()));
        }

        let lifetime = chrono::Duration::from_std(issued.expires_in)
            .map_err(|_| AuthError::InvalidResponse("token lifetime out of range".to_string()))?;
        if lifetime <= self.refresh_margin {
            // Still handed to this caller; the next call refreshes again.
            tracing::warn!(
                lifetime_secs = lifetime.num_seconds(),
                margin_secs = self.refresh_margin.num_seconds(),
                "Partner token lifetime is within the refresh margin"
            );
        }

        let Some(token) = CachedToken::issued_at(issued.access_token, issued_at, lifetime) else {
            tracing::warn!(
                lifetime_secs = lifetime.num_seconds(),
                "Partner token lifetime overflows the clock"
            );
            return Err(AuthError::InvalidResponse(
                "token lifetime out of range".to_string(),
            ));
        };
        let access_token = token.access_token().to_string();
        let expires_at = token.expires_at();
        *self.current.write().await = Some(token);

        tracing::info!(expires_at = %expires_at, "Partner access token refreshed");
        Ok(access_token)
    }
}
