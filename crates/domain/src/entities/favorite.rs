//! Favorite event entity.
//!
//! A favorite is an opaque upstream event document plus two fields the store
//! cares about: the upstream `id` (unique across the store) and `addedAt`
//! (stamped by the store at insert time, never taken from the caller).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DomainError;
use crate::ids::EventId;

/// Document field carrying the upstream event identifier.
pub const ID_FIELD: &str = "id";

/// Document field carrying the insert timestamp.
pub const ADDED_AT_FIELD: &str = "addedAt";

/// A caller-supplied favorite that passed validation but is not stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteDraft {
    id: EventId,
    attributes: Map<String, Value>,
}

impl FavoriteDraft {
    /// Validate a raw document coming from a caller.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The document is not a JSON object
    /// - `id` is missing, null, blank, or not a string
    pub fn from_document(document: Value) -> Result<Self, DomainError> {
        let Value::Object(mut attributes) = document else {
            return Err(DomainError::validation(format!(
                "Favorite must be a JSON object, got {}",
                json_type(&document)
            )));
        };

        let id = match attributes.remove(ID_FIELD) {
            Some(Value::String(id)) => {
                EventId::new(id).map_err(|_| DomainError::validation("Event ID is required"))?
            }
            Some(Value::Null) | None => {
                return Err(DomainError::validation("Event ID is required"));
            }
            Some(other) => {
                return Err(DomainError::validation(format!(
                    "Event ID must be a string, got {}",
                    json_type(&other)
                )));
            }
        };

        // addedAt belongs to the store
        attributes.remove(ADDED_AT_FIELD);

        Ok(Self { id, attributes })
    }

    pub fn id(&self) -> &EventId {
        &self.id
    }

    /// Turn the draft into a stored favorite with the given insert time.
    pub fn stamp(self, added_at: DateTime<Utc>) -> FavoriteEvent {
        FavoriteEvent {
            id: self.id,
            added_at,
            attributes: self.attributes,
        }
    }
}

/// A favorite as held by the store.
///
/// Serializes back to the caller's document shape with `addedAt` added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteEvent {
    id: EventId,
    #[serde(rename = "addedAt")]
    added_at: DateTime<Utc>,
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

impl FavoriteEvent {
    pub fn id(&self) -> &EventId {
        &self.id
    }

    pub fn added_at(&self) -> DateTime<Utc> {
        self.added_at
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn added_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 19, 30, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn draft_keeps_upstream_attributes() {
        let draft = FavoriteDraft::from_document(json!({
            "id": "evt-1",
            "name": "Concert A",
            "_embedded": { "venues": [{ "name": "The Forum" }] }
        }))
        .expect("valid draft");

        assert_eq!(draft.id().as_str(), "evt-1");

        let favorite = draft.stamp(added_at());
        assert_eq!(favorite.attribute("name"), Some(&json!("Concert A")));
        assert_eq!(
            favorite.attribute("_embedded"),
            Some(&json!({ "venues": [{ "name": "The Forum" }] }))
        );
        assert!(favorite.attribute("id").is_none());
    }

    #[test]
    fn draft_requires_an_id() {
        let missing = FavoriteDraft::from_document(json!({ "name": "Concert A" }));
        assert_eq!(
            missing,
            Err(DomainError::validation("Event ID is required"))
        );

        let null = FavoriteDraft::from_document(json!({ "id": null }));
        assert!(matches!(null, Err(DomainError::Validation(_))));

        let blank = FavoriteDraft::from_document(json!({ "id": "  " }));
        assert!(matches!(blank, Err(DomainError::Validation(_))));
    }

    #[test]
    fn draft_rejects_non_string_ids() {
        let err = FavoriteDraft::from_document(json!({ "id": 42 })).expect_err("numeric id");
        assert!(err.to_string().contains("a number"));
    }

    #[test]
    fn draft_rejects_non_objects() {
        let err = FavoriteDraft::from_document(json!(["evt-1"])).expect_err("array document");
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn caller_supplied_added_at_is_discarded() {
        let draft = FavoriteDraft::from_document(json!({
            "id": "evt-1",
            "addedAt": "1999-01-01T00:00:00Z"
        }))
        .expect("valid draft");

        let favorite = draft.stamp(added_at());
        assert_eq!(favorite.added_at(), added_at());
        assert!(favorite.attribute(ADDED_AT_FIELD).is_none());
    }

    #[test]
    fn serializes_to_the_caller_document_shape() {
        let favorite = FavoriteDraft::from_document(json!({ "id": "evt-1", "name": "Concert A" }))
            .expect("valid draft")
            .stamp(added_at());

        let value = serde_json::to_value(&favorite).expect("serialize");
        assert_eq!(value["id"], json!("evt-1"));
        assert_eq!(value["name"], json!("Concert A"));
        assert!(value["addedAt"].is_string());

        let restored: FavoriteEvent = serde_json::from_value(value).expect("deserialize");
        assert_eq!(restored, favorite);
    }
}
