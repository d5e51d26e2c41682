//! Great-circle distance on a spherical Earth.

use curtaincall_core::Coordinate;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Haversine distance between two coordinates, in meters.
///
/// Inputs are not range-checked; callers supply valid degrees.
#[must_use]
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let delta_phi = (b.latitude - a.latitude).to_radians();
    let delta_lambda = (b.longitude - a.longitude).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let d = distance_meters(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0));
        assert!((d - 111_195.0).abs() < 50.0, "got {d}");
    }

    #[test]
    fn distance_to_self_is_zero() {
        let points = [
            Coordinate::new(0.0, 0.0),
            Coordinate::new(44.9756, -93.2755),
            Coordinate::new(-33.8568, 151.2153),
            Coordinate::new(89.9, 179.9),
        ];
        for p in points {
            assert!(distance_meters(p, p).abs() < f64::EPSILON, "{p:?}");
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            (Coordinate::new(40.7128, -74.0060), Coordinate::new(34.0522, -118.2437)),
            (Coordinate::new(51.5074, -0.1278), Coordinate::new(48.8566, 2.3522)),
            (Coordinate::new(-33.8568, 151.2153), Coordinate::new(35.6762, 139.6503)),
        ];
        for (a, b) in pairs {
            let ab = distance_meters(a, b);
            let ba = distance_meters(b, a);
            assert!((ab - ba).abs() < 1e-6, "{ab} != {ba}");
        }
    }

    #[test]
    fn distance_grows_with_separation() {
        let origin = Coordinate::new(44.9756, -93.2755);
        let mut last = 0.0;
        for step in 1..=10 {
            let other = Coordinate::new(44.9756 + f64::from(step) * 0.001, -93.2755);
            let d = distance_meters(origin, other);
            assert!(d > last, "distance should increase: {d} <= {last}");
            last = d;
        }
    }

    #[test]
    fn antimeridian_crossing_takes_short_way() {
        let d = distance_meters(Coordinate::new(0.0, 179.5), Coordinate::new(0.0, -179.5));
        assert!((d - 111_195.0).abs() < 50.0, "got {d}");
    }
}
