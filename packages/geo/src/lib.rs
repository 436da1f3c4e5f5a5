#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Great-circle distance on a spherical Earth.
//!
//! All distances are in kilometres using the haversine formula with a mean
//! Earth radius of 6371 km. There is no spatial index: callers scan the
//! in-memory object list directly.

use citytwin_object_models::{CityObject, Coordinate, ObjectKind};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two coordinates, in kilometres.
#[must_use]
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let phi1 = a.lat().to_radians();
    let phi2 = b.lat().to_radians();
    let d_phi = (b.lat() - a.lat()).to_radians();
    let d_lambda = (b.lon() - a.lon()).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);

    // Rounding can push h a hair above 1 for antipodal points.
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// Distance from `from` to the closest object of `kind`, or `None` if no
/// object of that kind exists.
#[must_use]
pub fn nearest_km<'a, I>(from: Coordinate, kind: ObjectKind, objects: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a CityObject>,
{
    objects
        .into_iter()
        .filter(|o| o.kind() == kind)
        .map(|o| haversine_km(from, o.coordinate))
        .min_by(f64::total_cmp)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn zero_for_identical_points() {
        let p = c(49.9483, 82.6285);
        assert!(haversine_km(p, p).abs() < f64::EPSILON);
    }

    #[test]
    fn symmetric() {
        let a = c(49.9483, 82.6285);
        let b = c(50.01, 82.7);
        assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let d = haversine_km(c(10.0, 30.0), c(11.0, 30.0));
        assert!((d - 111.19).abs() < 0.1, "got {d}");
    }

    #[test]
    fn triangle_inequality_holds() {
        let a = c(49.9483, 82.6285);
        let b = c(51.17, 71.43);
        let m = c(43.24, 76.89);
        let ab = haversine_km(a, b);
        let am = haversine_km(a, m);
        let mb = haversine_km(m, b);
        assert!(ab <= am + mb + 1e-6);
    }

    #[test]
    fn antipodal_points_are_half_the_circumference() {
        let d = haversine_km(c(0.0, 0.0), c(0.0, 180.0));
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn nearest_picks_minimum_of_kind() {
        let origin = c(0.0, 0.0);
        let objects = vec![
            CityObject::new("a", ObjectKind::School, c(0.0, 0.05)),
            CityObject::new("b", ObjectKind::School, c(0.0, 0.01)),
            CityObject::new("c", ObjectKind::Park, c(0.0, 0.001)),
        ];
        let school = nearest_km(origin, ObjectKind::School, &objects).unwrap();
        assert!((school - haversine_km(origin, c(0.0, 0.01))).abs() < 1e-12);
        assert!(nearest_km(origin, ObjectKind::Industry, &objects).is_none());
    }
}
