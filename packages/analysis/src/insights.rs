//! Displayable conclusions drawn from a perimeter snapshot.

use citytwin_analysis_models::{
    CountChip, Greenery, NearestEntry, PerimeterAnalysis, PerimeterInsights, SchoolSeats,
};
use citytwin_object_models::catalog;

/// Number of nearest objects listed by default.
pub const DEFAULT_NEARBY_LIMIT: usize = 6;

/// Summarizes a [`PerimeterAnalysis`] into chips, status flags, the closest
/// `nearby_limit` objects, and one-line messages.
#[must_use]
pub fn perimeter_insights(analysis: &PerimeterAnalysis, nearby_limit: usize) -> PerimeterInsights {
    let chips: Vec<CountChip> = analysis
        .counts
        .iter()
        .map(|(kind, count)| CountChip {
            kind: *kind,
            emoji: catalog::emoji_for(*kind).to_string(),
            count: *count,
        })
        .collect();

    let school_seats = if analysis.school_gap > 0.0 {
        SchoolSeats::Shortfall {
            seats: analysis.school_gap,
        }
    } else {
        SchoolSeats::Sufficient
    };

    let industry_influence =
        (analysis.industry_emission > 0.0).then_some(analysis.industry_emission);

    let greenery = if analysis.parks == 0 {
        Greenery::NoParks
    } else {
        Greenery::Parks {
            count: analysis.parks,
        }
    };

    let nearest = analysis
        .around
        .iter()
        .take(nearby_limit)
        .map(|n| NearestEntry {
            id: n.object.id.clone(),
            kind: n.object.kind(),
            emoji: catalog::emoji_for(n.object.kind()).to_string(),
            distance_km: n.distance_km,
        })
        .collect();

    let mut messages = vec![
        format!("Residents within radius: {:.0}", analysis.residents),
        format!(
            "School capacity within radius: {:.0}",
            analysis.school_capacity
        ),
    ];
    messages.push(match school_seats {
        SchoolSeats::Shortfall { seats } => {
            format!("School places may be short by roughly {seats:.0}.")
        }
        SchoolSeats::Sufficient => {
            "School places within the radius are roughly sufficient.".to_string()
        }
    });
    if let Some(emission) = industry_influence {
        messages.push(format!("Industrial influence nearby (relative): {emission:.0}."));
    }
    messages.push(match greenery {
        Greenery::NoParks => "No parks within the radius: consider adding a green zone.".to_string(),
        Greenery::Parks { count } => {
            format!("Parks within the radius: {count}, supporting ecology and comfort.")
        }
    });

    PerimeterInsights {
        chips,
        school_seats,
        industry_influence,
        greenery,
        nearest,
        messages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze_perimeter;
    use citytwin_object_models::{CityObject, Coordinate, ObjectKind, ObjectParams};

    fn at(id: &str, params: ObjectParams, lat_offset: f64) -> CityObject {
        CityObject {
            id: id.to_string(),
            coordinate: Coordinate::new(49.9483 + lat_offset, 82.6285).unwrap(),
            params,
        }
    }

    fn center() -> Coordinate {
        Coordinate::new(49.9483, 82.6285).unwrap()
    }

    #[test]
    fn shortfall_and_no_parks() {
        let objects = [at("h", ObjectParams::Housing { residents: 4000 }, 0.001)];
        let analysis = analyze_perimeter(center(), &objects, 1.5);
        let insights = perimeter_insights(&analysis, DEFAULT_NEARBY_LIMIT);

        assert_eq!(insights.school_seats, SchoolSeats::Shortfall { seats: 1000.0 });
        assert_eq!(insights.greenery, Greenery::NoParks);
        assert_eq!(insights.industry_influence, None);
        assert_eq!(insights.chips.len(), 1);
        assert_eq!(insights.chips[0].kind, ObjectKind::Housing);
        assert!(insights.messages.iter().any(|m| m.contains("short by roughly 1000")));
    }

    #[test]
    fn sufficient_with_parks_and_industry() {
        let objects = [
            at("h", ObjectParams::Housing { residents: 1000 }, 0.001),
            at("s", ObjectParams::School { capacity: 800 }, 0.002),
            at("p", ObjectParams::Park { green_factor: 0.25 }, 0.003),
            at(
                "i",
                ObjectParams::Industry {
                    emission: 120.0,
                    filter_efficiency: 0.0,
                },
                0.004,
            ),
        ];
        let analysis = analyze_perimeter(center(), &objects, 1.5);
        let insights = perimeter_insights(&analysis, DEFAULT_NEARBY_LIMIT);

        assert_eq!(insights.school_seats, SchoolSeats::Sufficient);
        assert_eq!(insights.greenery, Greenery::Parks { count: 1 });
        assert_eq!(insights.industry_influence, Some(120.0));
        assert_eq!(insights.messages.len(), 5);
    }

    #[test]
    fn nearest_list_is_truncated() {
        let objects: Vec<CityObject> = (0..10)
            .map(|i| at(&format!("b{i}"), ObjectKind::Bridge.default_params(), f64::from(i) * 0.0001))
            .collect();
        let analysis = analyze_perimeter(center(), &objects, 1.5);
        let insights = perimeter_insights(&analysis, 3);

        let ids: Vec<&str> = insights.nearest.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["b0", "b1", "b2"]);
    }
}
