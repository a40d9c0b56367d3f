//! EventScout domain types.
//!
//! Pure value types for the favorites store, partner event searches and the
//! partner credential cache.
//! Nothing in this crate performs I/O.

pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use entities::{FavoriteDraft, FavoriteEvent, ADDED_AT_FIELD, ID_FIELD};
pub use error::DomainError;
pub use ids::EventId;
pub use value_objects::{
    CachedToken, EventSearch, GeoPoint, TokenState, ALL_SEGMENTS_ID, DEFAULT_RADIUS_MILES,
};
