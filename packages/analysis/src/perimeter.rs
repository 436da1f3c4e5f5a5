//! Radius-bounded aggregation around a point.

use std::collections::BTreeMap;

use citytwin_analysis_models::{NearbyObject, PerimeterAnalysis, SCHOOL_AGE_SHARE};
use citytwin_geo::haversine_km;
use citytwin_object_models::{CityObject, Coordinate, ObjectKind, ObjectParams};

/// Aggregates every object within `radius_km` of `center`.
///
/// An object exactly on the boundary is included. A NaN radius includes
/// nothing. The `around` list is sorted by distance, ties keeping input
/// order.
#[must_use]
pub fn analyze_perimeter<'a, I>(center: Coordinate, objects: I, radius_km: f64) -> PerimeterAnalysis
where
    I: IntoIterator<Item = &'a CityObject>,
{
    let mut around = Vec::new();
    let mut counts: BTreeMap<ObjectKind, u32> = BTreeMap::new();
    let mut residents = 0.0;
    let mut school_capacity = 0.0;
    let mut industry_emission = 0.0;

    for obj in objects {
        let distance_km = haversine_km(center, obj.coordinate);
        let inside = distance_km <= radius_km;
        if !inside {
            continue;
        }

        *counts.entry(obj.kind()).or_insert(0) += 1;

        match obj.params {
            ObjectParams::Housing { residents: r } => residents += f64::from(r),
            ObjectParams::School { capacity } => school_capacity += f64::from(capacity),
            ObjectParams::Industry {
                emission,
                filter_efficiency,
            } => industry_emission += emission * (1.0 - filter_efficiency),
            ObjectParams::Park { .. }
            | ObjectParams::SportsFacility { .. }
            | ObjectParams::Bridge { .. } => {}
        }

        around.push(NearbyObject {
            object: obj.clone(),
            distance_km,
        });
    }

    around.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    let school_demand = residents * SCHOOL_AGE_SHARE;
    let parks = counts.get(&ObjectKind::Park).copied().unwrap_or(0);

    log::debug!(
        "Perimeter {center} r={radius_km}km: {} objects, {residents} residents, gap {}",
        around.len(),
        school_demand - school_capacity
    );

    PerimeterAnalysis {
        center,
        radius_km,
        around,
        counts,
        residents,
        school_capacity,
        school_demand,
        school_gap: school_demand - school_capacity,
        industry_emission,
        parks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use citytwin_analysis_models::DEFAULT_RADIUS_KM;

    const DEG_PER_KM: f64 = 1.0 / 111.195;

    fn origin() -> Coordinate {
        Coordinate::new(49.9483, 82.6285).unwrap()
    }

    fn north(km: f64) -> Coordinate {
        Coordinate::new(origin().lat() + km * DEG_PER_KM, origin().lon()).unwrap()
    }

    fn obj(id: &str, params: ObjectParams, km: f64) -> CityObject {
        CityObject {
            id: id.to_string(),
            coordinate: north(km),
            params,
        }
    }

    #[test]
    fn radius_bounds_membership() {
        let objects = [
            obj("at", ObjectKind::Park.default_params(), 0.0),
            obj("out", ObjectKind::Park.default_params(), 1.6),
        ];
        let result = analyze_perimeter(origin(), &objects, DEFAULT_RADIUS_KM);
        let ids: Vec<&str> = result.around.iter().map(|n| n.object.id.as_str()).collect();
        assert_eq!(ids, vec!["at"]);
        assert!(result.around[0].distance_km.abs() < f64::EPSILON);
        assert_eq!(result.parks, 1);
    }

    #[test]
    fn boundary_distance_is_included() {
        let edge = obj("edge", ObjectKind::Bridge.default_params(), 1.0);
        let exact = haversine_km(origin(), edge.coordinate);
        let result = analyze_perimeter(origin(), [&edge], exact);
        assert_eq!(result.around.len(), 1);

        let result = analyze_perimeter(origin(), [&edge], exact - 1e-9);
        assert!(result.around.is_empty());
    }

    #[test]
    fn nan_radius_includes_nothing() {
        let here = obj("here", ObjectKind::Park.default_params(), 0.0);
        let result = analyze_perimeter(origin(), [&here], f64::NAN);
        assert!(result.around.is_empty());
        assert!(result.counts.is_empty());
        assert_eq!(result.parks, 0);
    }

    #[test]
    fn school_gap_is_quarter_of_residents_minus_capacity() {
        let objects = [
            obj("h1", ObjectParams::Housing { residents: 1500 }, 0.2),
            obj("h2", ObjectParams::Housing { residents: 2500 }, 0.4),
            obj("s1", ObjectParams::School { capacity: 800 }, 0.3),
        ];
        let result = analyze_perimeter(origin(), &objects, DEFAULT_RADIUS_KM);
        assert!((result.residents - 4000.0).abs() < f64::EPSILON);
        assert!((result.school_capacity - 800.0).abs() < f64::EPSILON);
        assert!((result.school_demand - 1000.0).abs() < f64::EPSILON);
        assert!((result.school_gap - (0.25 * 4000.0 - 800.0)).abs() < f64::EPSILON);
        assert_eq!(result.count(ObjectKind::Housing), 2);
        assert_eq!(result.count(ObjectKind::School), 1);
        assert_eq!(result.count(ObjectKind::Park), 0);
    }

    #[test]
    fn fully_filtered_industry_emits_nothing() {
        let objects = [
            obj(
                "clean",
                ObjectParams::Industry {
                    emission: 500.0,
                    filter_efficiency: 1.0,
                },
                0.5,
            ),
            obj(
                "half",
                ObjectParams::Industry {
                    emission: 100.0,
                    filter_efficiency: 0.5,
                },
                0.6,
            ),
        ];
        let result = analyze_perimeter(origin(), &objects[..1], DEFAULT_RADIUS_KM);
        assert!(result.industry_emission.abs() < f64::EPSILON);

        let result = analyze_perimeter(origin(), &objects, DEFAULT_RADIUS_KM);
        assert!((result.industry_emission - 50.0).abs() < 1e-9);
    }

    #[test]
    fn around_is_sorted_by_distance() {
        let objects = [
            obj("c", ObjectKind::Park.default_params(), 1.2),
            obj("a", ObjectKind::School.default_params(), 0.1),
            obj("b", ObjectKind::Housing.default_params(), 0.7),
        ];
        let result = analyze_perimeter(origin(), &objects, DEFAULT_RADIUS_KM);
        let ids: Vec<&str> = result.around.iter().map(|n| n.object.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_input_is_all_zero() {
        let result = analyze_perimeter(origin(), &[], DEFAULT_RADIUS_KM);
        assert!(result.around.is_empty());
        assert!(result.counts.is_empty());
        assert!(result.school_gap.abs() < f64::EPSILON);
        assert_eq!(result.parks, 0);
    }
}
