use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of an upstream event.
///
/// Assigned by the event provider, never generated locally. Compared
/// byte-for-byte, so no trimming or case folding is applied; blank values
/// are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EventId(String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::invalid_id("event id cannot be blank"));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for EventId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for EventId {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EventId> for String {
    fn from(value: EventId) -> Self {
        value.0
    }
}

impl AsRef<str> for EventId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_upstream_id_verbatim() {
        let id = EventId::new(" vvG1IZ9YbmKpP6 ").expect("valid id");
        assert_eq!(id.as_str(), " vvG1IZ9YbmKpP6 ");
    }

    #[test]
    fn rejects_blank_ids() {
        assert!(matches!(EventId::new(""), Err(DomainError::InvalidId(_))));
        assert!(matches!(EventId::new("   "), Err(DomainError::InvalidId(_))));
    }

    #[test]
    fn deserializes_through_validation() {
        let id: EventId = serde_json::from_str("\"evt-1\"").expect("valid id");
        assert_eq!(id.to_string(), "evt-1");

        let blank = serde_json::from_str::<EventId>("\"\"");
        assert!(blank.is_err());
    }
}
