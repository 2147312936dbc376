// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Great-circle distance between guesses and event locations.

use geo::Point;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometers between two lat/lon pairs in degrees.
///
/// Inputs are not range-checked. `a` is clamped to `[0, 1]` so rounding
/// near coincident or antipodal points cannot produce NaN.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let a = a.clamp(0.0, 1.0);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Distance in kilometers between two geo points (x = lon, y = lat).
pub fn distance_between(from: Point<f64>, to: Point<f64>) -> f64 {
    haversine_km(from.y(), from.x(), to.y(), to.x())
}

/// Round a distance to 2 decimal places for API responses.
pub fn round_km(distance: f64) -> f64 {
    (distance * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coincident_points_are_zero() {
        for (lat, lon) in [(0.0, 0.0), (51.5074, -0.1278), (-89.9, 179.9), (90.0, 0.0)] {
            assert_eq!(haversine_km(lat, lon, lat, lon), 0.0);
        }
    }

    #[test]
    fn test_symmetry() {
        let ab = haversine_km(40.7128, -74.0060, 35.6762, 139.6503);
        let ba = haversine_km(35.6762, 139.6503, 40.7128, -74.0060);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn test_quarter_circle() {
        let d = haversine_km(0.0, 0.0, 0.0, 90.0);
        assert!((d - 10007.54).abs() < 0.01, "Expected ~10007.54 km, got {d}");
    }

    #[test]
    fn test_london_to_paris() {
        let d = haversine_km(51.5074, -0.1278, 48.8566, 2.3522);
        assert!(d > 343.0 && d < 344.0, "Expected ~343.5 km, got {d}");
    }

    #[test]
    fn test_antipodal_is_half_circumference() {
        let d = haversine_km(0.0, 0.0, 0.0, 180.0);
        assert!(!d.is_nan());
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);

        let poles = haversine_km(90.0, 0.0, -90.0, 0.0);
        assert!((poles - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_range_inputs_are_not_errors() {
        let d = haversine_km(120.0, 400.0, -95.0, -200.0);
        assert!(d.is_finite());
        assert!(d >= 0.0);
    }

    #[test]
    fn test_agrees_with_geo_haversine() {
        use geo::{Distance, Haversine};

        let london = Point::new(-0.1278, 51.5074);
        let sydney = Point::new(151.2093, -33.8688);

        let ours = distance_between(london, sydney);
        // geo uses a slightly larger mean radius and returns meters.
        let theirs = Haversine.distance(london, sydney) / 1000.0;
        assert!((ours - theirs).abs() / theirs < 1e-3, "{ours} vs {theirs}");
    }

    #[test]
    fn test_round_km() {
        assert_eq!(round_km(343.556), 343.56);
        assert_eq!(round_km(0.0), 0.0);
        assert_eq!(round_km(10007.543398), 10007.54);
    }
}
