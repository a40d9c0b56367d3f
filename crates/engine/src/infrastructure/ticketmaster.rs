//! Ticketmaster Discovery API adapter.
//!
//! Authenticates with a static API key sent as the `apikey` query parameter,
//! so no token cache is involved. Payloads pass through unchanged.

use async_trait::async_trait;
use eventscout_domain::EventSearch;
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use std::time::Duration;

use crate::infrastructure::http_client::{self, read_json, transport_error};
use crate::infrastructure::ports::{EventCatalogPort, UpstreamError};

/// Default Discovery API base URL.
pub const DEFAULT_TICKETMASTER_API_URL: &str = "https://app.ticketmaster.com/discovery/v2";

/// Event catalog lookups against the Ticketmaster Discovery API.
#[derive(Clone)]
pub struct TicketmasterClient {
    client: Client,
    api_base_url: String,
    api_key: String,
}

impl fmt::Debug for TicketmasterClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TicketmasterClient")
            .field("api_base_url", &self.api_base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl TicketmasterClient {
    pub fn new(api_base_url: &str, api_key: &str, timeout: Duration) -> Self {
        Self {
            client: http_client::client(timeout),
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    async fn get_json(
        &self,
        path: &str,
        query: &[(&str, &str)],
        resource: &str,
    ) -> Result<Value, UpstreamError> {
        let response = self
            .client
            .get(format!("{}{}", self.api_base_url, path))
            .query(&[("apikey", self.api_key.as_str())])
            .query(query)
            .send()
            .await
            .map_err(transport_error)?;

        read_json(response, resource, path).await
    }
}

/// Discovery ids are alphanumeric with `-` and `_`.
fn validate_event_id(event_id: &str) -> Result<&str, UpstreamError> {
    let valid = !event_id.is_empty()
        && event_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(UpstreamError::InvalidRequest(format!(
            "Invalid event ID: {event_id:?}"
        )));
    }
    Ok(event_id)
}

#[async_trait]
impl EventCatalogPort for TicketmasterClient {
    async fn suggest(&self, keyword: &str) -> Result<Value, UpstreamError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(UpstreamError::InvalidRequest("Keyword is required".to_string()));
        }

        self.get_json("/suggest", &[("keyword", keyword)], "Suggestions")
            .await
    }

    async fn search_events(&self, search: &EventSearch) -> Result<Value, UpstreamError> {
        let geo_point = search.geo_point();
        let radius = search.radius_miles().to_string();
        let mut query = vec![
            ("keyword", search.keyword()),
            ("geoPoint", geo_point.as_str()),
            ("radius", radius.as_str()),
            ("unit", "miles"),
        ];
        if let Some(segment_id) = search.segment_id() {
            query.push(("segmentId", segment_id));
        }

        let events = self.get_json("/events.json", &query, "Events").await?;

        tracing::debug!(
            keyword = search.keyword(),
            geo_point = %geo_point,
            count = events
                .pointer("/_embedded/events")
                .and_then(serde_json::Value::as_array)
                .map_or(0, Vec::len),
            "Searched events"
        );
        Ok(events)
    }

    async fn get_event(&self, event_id: &str) -> Result<Value, UpstreamError> {
        let event_id = validate_event_id(event_id)?;
        self.get_json(&format!("/events/{event_id}"), &[], "Event")
            .await
    }
}
