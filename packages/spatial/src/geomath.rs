//! Great-circle distance on a spherical Earth.

use beat_roster_geography_models::Coordinate;

/// Mean Earth radius used for all distance calculations, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Converts degrees to radians.
#[must_use]
pub const fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Converts radians to degrees.
#[must_use]
pub const fn to_degrees(radians: f64) -> f64 {
    radians * 180.0 / std::f64::consts::PI
}

/// Haversine distance between two coordinates, in kilometres.
#[must_use]
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = to_radians(a.lat);
    let lat2 = to_radians(b.lat);
    let d_lat = to_radians(b.lat - a.lat);
    let d_lng = to_radians(b.lng - a.lng);

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);

    // Rounding can push `h` a hair above 1 for antipodal points. `clamp`
    // keeps NaN, so a non-finite input never reads as a real distance.
    2.0 * EARTH_RADIUS_KM * h.sqrt().clamp(0.0, 1.0).asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_to_self() {
        let p = Coordinate::new(28.6139, 77.209);
        assert!(distance_km(p, p).abs() < f64::EPSILON);
    }

    #[test]
    fn symmetric() {
        let pairs = [
            (Coordinate::new(28.61, 77.21), Coordinate::new(28.75, 77.07)),
            (Coordinate::new(-33.86, 151.21), Coordinate::new(51.5, -0.12)),
            (Coordinate::new(0.0, 179.9), Coordinate::new(0.0, -179.9)),
        ];
        for (a, b) in pairs {
            let diff = (distance_km(a, b) - distance_km(b, a)).abs();
            assert!(diff < 1e-9, "asymmetric for {a:?} / {b:?}: {diff}");
        }
    }

    #[test]
    fn berlin_to_paris() {
        let berlin = Coordinate::new(52.52, 13.405);
        let paris = Coordinate::new(48.8566, 2.3522);
        let d = distance_km(berlin, paris);
        assert!((d - 877.46).abs() < 0.5, "got {d}");
    }

    #[test]
    fn antipodal_points_are_half_circumference() {
        let d = distance_km(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 180.0));
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn degree_radian_roundtrip() {
        assert!((to_radians(180.0) - std::f64::consts::PI).abs() < 1e-12);
        assert!((to_degrees(to_radians(77.2)) - 77.2).abs() < 1e-12);
    }

    #[test]
    fn nan_input_gives_nan() {
        let p = Coordinate::new(28.61, 77.21);
        assert!(distance_km(Coordinate::new(f64::NAN, 77.21), p).is_nan());
        assert!(distance_km(p, Coordinate::new(28.61, f64::NAN)).is_nan());
    }
}
