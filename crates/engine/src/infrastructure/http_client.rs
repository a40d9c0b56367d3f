//! reqwest plumbing shared by the partner API adapters.

use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use std::time::Duration;

use crate::infrastructure::ports::UpstreamError;

/// Client whose every request is bounded by `timeout`.
pub(crate) fn client(timeout: Duration) -> Client {
    match Client::builder().timeout(timeout).build() {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!(
                error = %e,
                ?timeout,
                "Failed to build HTTP client, requests will run without a timeout"
            );
            Client::new()
        }
    }
}

// URLs can carry API keys, so they never reach an error message.
pub(crate) fn transport_error(e: reqwest::Error) -> UpstreamError {
    UpstreamError::RequestFailed(e.without_url().to_string())
}

/// Decode a pass-through JSON body, mapping 404 to `NotFound(resource)`
/// and any other non-2xx to `Status`.
pub(crate) async fn read_json(
    response: Response,
    resource: &str,
    path: &str,
) -> Result<Value, UpstreamError> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(UpstreamError::NotFound(resource.to_string()));
    }
    if !status.is_success() {
        tracing::warn!(status = status.as_u16(), path, "Partner request failed");
        return Err(UpstreamError::Status {
            status: status.as_u16(),
        });
    }

    response
        .json()
        .await
        .map_err(|e| UpstreamError::InvalidResponse(e.without_url().to_string()))
}
