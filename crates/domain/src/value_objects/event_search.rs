//! Event search criteria for the ticketing partner.

use crate::error::DomainError;

/// Radius applied when the caller gives none (or zero).
pub const DEFAULT_RADIUS_MILES: u32 = 10;

/// Segment id the partner uses for "All"; searching with it means no filter.
pub const ALL_SEGMENTS_ID: &str = "KZFzniwnSyZfZ7v7nE";

/// Geohash length sent to the partner (about 150 m cells).
pub const GEOHASH_PRECISION: usize = 7;

const GEOHASH_ALPHABET: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// A validated WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::validation(format!(
                "Latitude must be between -90 and 90, got {latitude}"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::validation(format!(
                "Longitude must be between -180 and 180, got {longitude}"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Base32 geohash of the given length.
    ///
    /// Bits alternate longitude, latitude; a coordinate exactly on a split
    /// goes to the lower half.
    pub fn geohash(&self, precision: usize) -> String {
        let mut lat_range = (-90.0_f64, 90.0_f64);
        let mut lng_range = (-180.0_f64, 180.0_f64);
        let mut hash = String::with_capacity(precision);
        let mut on_longitude = true;
        let mut bits = 0;
        let mut index = 0usize;

        while hash.len() < precision {
            let (value, range) = if on_longitude {
                (self.longitude, &mut lng_range)
            } else {
                (self.latitude, &mut lat_range)
            };
            let mid = (range.0 + range.1) / 2.0;
            if value > mid {
                index = index * 2 + 1;
                range.0 = mid;
            } else {
                index *= 2;
                range.1 = mid;
            }
            on_longitude = !on_longitude;

            bits += 1;
            if bits == 5 {
                hash.push(char::from(GEOHASH_ALPHABET[index]));
                bits = 0;
                index = 0;
            }
        }
        hash
    }
}

/// Keyword search for events around a point.
#[derive(Debug, Clone, PartialEq)]
pub struct EventSearch {
    keyword: String,
    location: GeoPoint,
    radius_miles: u32,
    segment_id: Option<String>,
}

impl EventSearch {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the keyword is blank.
    pub fn new(
        keyword: impl Into<String>,
        location: GeoPoint,
        radius_miles: Option<u32>,
        segment_id: Option<String>,
    ) -> Result<Self, DomainError> {
        let keyword = keyword.into().trim().to_string();
        if keyword.is_empty() {
            return Err(DomainError::validation("Keyword is required"));
        }

        let segment_id = segment_id
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty() && s != ALL_SEGMENTS_ID);

        Ok(Self {
            keyword,
            location,
            radius_miles: radius_miles
                .filter(|r| *r > 0)
                .unwrap_or(DEFAULT_RADIUS_MILES),
            segment_id,
        })
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn radius_miles(&self) -> u32 {
        self.radius_miles
    }

    /// Segment to filter on; `None` when searching every segment.
    pub fn segment_id(&self) -> Option<&str> {
        self.segment_id.as_deref()
    }

    pub fn geo_point(&self) -> String {
        self.location.geohash(GEOHASH_PRECISION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new(lat, lng).expect("valid point")
    }

    #[test]
    fn geohash_matches_reference_cells() {
        assert_eq!(point(57.64911, 10.40744).geohash(11), "u4pruydqqvj");
        assert_eq!(point(34.0522, -118.2437).geohash(7), "9q5ctr1");
        assert_eq!(point(40.7128, -74.0060).geohash(7), "dr5regw");
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!(GeoPoint::new(90.5, 0.0).is_err());
        assert!(GeoPoint::new(0.0, -180.5).is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn search_defaults_radius_and_drops_all_segment() {
        let search = EventSearch::new(
            " Taylor Swift ",
            point(34.0522, -118.2437),
            Some(0),
            Some(ALL_SEGMENTS_ID.to_string()),
        )
        .expect("valid search");

        assert_eq!(search.keyword(), "Taylor Swift");
        assert_eq!(search.radius_miles(), DEFAULT_RADIUS_MILES);
        assert_eq!(search.segment_id(), None);
        assert_eq!(search.geo_point(), "9q5ctr1");
    }

    #[test]
    fn search_keeps_a_specific_segment() {
        let search = EventSearch::new(
            "Hollywood Bowl",
            point(34.0522, -118.2437),
            Some(25),
            Some("KZFzniwnSyZfZ7v7nJ".to_string()),
        )
        .expect("valid search");

        assert_eq!(search.radius_miles(), 25);
        assert_eq!(search.segment_id(), Some("KZFzniwnSyZfZ7v7nJ"));
    }

    #[test]
    fn search_requires_a_keyword() {
        let err = EventSearch::new("  ", point(0.0, 0.0), None, None).expect_err("blank keyword");
        assert_eq!(err, DomainError::validation("Keyword is required"));
    }
}
