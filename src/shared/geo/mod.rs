//! Geospatial primitives shared across features.
//!
//! Provides the coordinate type attached to photo check-ins, boundary
//! validation for GPS coordinates, and great-circle distance math used
//! for travel path lengths.

pub mod exif;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Mean Earth radius in kilometers, used by the Haversine formula
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A GPS coordinate extracted from a photo or supplied by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PhotoLocation {
    pub latitude: f64,
    pub longitude: f64,
    /// Capture timestamp from EXIF (local time, no timezone info)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<NaiveDateTime>,
    /// Altitude in meters above sea level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
}

impl PhotoLocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            timestamp: None,
            altitude: None,
        }
    }
}

/// Check whether an optional coordinate is usable on a map.
///
/// Absent coordinates are not valid. Boundary values (±90 latitude,
/// ±180 longitude) are valid.
pub fn is_valid_gps(location: Option<&PhotoLocation>) -> bool {
    match location {
        Some(loc) => {
            (-90.0..=90.0).contains(&loc.latitude) && (-180.0..=180.0).contains(&loc.longitude)
        }
        None => false,
    }
}

/// Great-circle distance between two coordinates in kilometers
/// (Haversine formula).
///
/// Only latitude/longitude are read. Not guarded against NaN or
/// infinite inputs.
pub fn distance_km(from: &PhotoLocation, to: &PhotoLocation) -> f64 {
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + from.latitude.to_radians().cos()
            * to.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Total length of a travel path in kilometers: the sum of great-circle
/// distances between consecutive points. Zero for fewer than two points.
pub fn path_length_km(points: &[PhotoLocation]) -> f64 {
    points
        .windows(2)
        .map(|pair| distance_km(&pair[0], &pair[1]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seoul() -> PhotoLocation {
        PhotoLocation::new(37.5665, 126.9780)
    }

    fn busan() -> PhotoLocation {
        PhotoLocation::new(35.1796, 129.0756)
    }

    #[test]
    fn valid_coordinates_pass() {
        assert!(is_valid_gps(Some(&seoul())));
        assert!(is_valid_gps(Some(&PhotoLocation::new(0.0, 0.0))));
    }

    #[test]
    fn absent_location_is_invalid() {
        assert!(!is_valid_gps(None));
    }

    #[test]
    fn latitude_out_of_range_is_invalid() {
        assert!(!is_valid_gps(Some(&PhotoLocation::new(91.0, 0.0))));
        assert!(!is_valid_gps(Some(&PhotoLocation::new(-91.0, 0.0))));
        assert!(!is_valid_gps(Some(&PhotoLocation::new(90.0001, 0.0))));
    }

    #[test]
    fn longitude_out_of_range_is_invalid() {
        assert!(!is_valid_gps(Some(&PhotoLocation::new(0.0, 181.0))));
        assert!(!is_valid_gps(Some(&PhotoLocation::new(0.0, -181.0))));
        assert!(!is_valid_gps(Some(&PhotoLocation::new(0.0, -180.0001))));
    }

    #[test]
    fn boundary_values_are_valid() {
        assert!(is_valid_gps(Some(&PhotoLocation::new(90.0, 180.0))));
        assert!(is_valid_gps(Some(&PhotoLocation::new(-90.0, -180.0))));
    }

    #[test]
    fn seoul_to_busan_is_about_325_km() {
        let d = distance_km(&seoul(), &busan());
        assert!(d > 320.0, "distance was {}", d);
        assert!(d < 330.0, "distance was {}", d);
    }

    #[test]
    fn distance_to_self_is_zero() {
        assert!(distance_km(&seoul(), &seoul()).abs() < 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let there = distance_km(&seoul(), &busan());
        let back = distance_km(&busan(), &seoul());
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn path_length_sums_consecutive_legs() {
        let daegu = PhotoLocation::new(35.8714, 128.6014);
        let path = [seoul(), daegu.clone(), busan()];
        let expected = distance_km(&seoul(), &daegu) + distance_km(&daegu, &busan());
        assert!((path_length_km(&path) - expected).abs() < 1e-9);

        assert_eq!(path_length_km(&[seoul()]), 0.0);
        assert_eq!(path_length_km(&[]), 0.0);
    }
}
