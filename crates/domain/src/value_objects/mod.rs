//! Value objects - Immutable objects defined by their attributes

mod cached_token;
mod event_search;

pub use cached_token::{CachedToken, TokenState};
pub use event_search::{
    EventSearch, GeoPoint, ALL_SEGMENTS_ID, DEFAULT_RADIUS_MILES, GEOHASH_PRECISION,
};
