#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Result types for placement evaluation and perimeter analysis.
//!
//! These are plain snapshots: they are computed from the current object
//! list on demand and never persisted.

use std::collections::BTreeMap;

use citytwin_object_models::{CityObject, Coordinate, ObjectKind};
use serde::{Deserialize, Serialize};

/// Default radius for perimeter analysis, in kilometres.
pub const DEFAULT_RADIUS_KM: f64 = 1.5;

/// Share of residents assumed to be school-age.
pub const SCHOOL_AGE_SHARE: f64 = 0.25;

/// Qualitative feedback for a placement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    /// Statements in favour of the placement, in rule order.
    pub supporting: Vec<String>,
    /// Statements against the placement, in rule order.
    pub concerning: Vec<String>,
}

/// An object found within the analysis radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyObject {
    /// The object itself.
    pub object: CityObject,
    /// Distance from the analysis center, in kilometres.
    pub distance_km: f64,
}

/// Aggregates over every object within a radius of a center point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerimeterAnalysis {
    /// Analysis center.
    pub center: Coordinate,
    /// Radius used, in kilometres.
    pub radius_km: f64,
    /// Objects within the radius, closest first.
    pub around: Vec<NearbyObject>,
    /// Number of objects per kind within the radius.
    pub counts: BTreeMap<ObjectKind, u32>,
    /// Sum of residents over housing within the radius.
    pub residents: f64,
    /// Sum of school seats within the radius.
    pub school_capacity: f64,
    /// Estimated school-age population (`residents * 0.25`).
    pub school_demand: f64,
    /// `school_demand - school_capacity`; positive means a shortfall.
    pub school_gap: f64,
    /// Sum of filtered industrial emission within the radius.
    pub industry_emission: f64,
    /// Number of parks within the radius.
    pub parks: u32,
}

impl PerimeterAnalysis {
    /// Number of objects of `kind` within the radius.
    #[must_use]
    pub fn count(&self, kind: ObjectKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }
}

/// Whether the perimeter has enough school seats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchoolSeats {
    /// Demand exceeds capacity by roughly `seats`.
    Shortfall {
        /// Missing seats.
        seats: f64,
    },
    /// Capacity covers estimated demand.
    Sufficient,
}

/// Green space status within the perimeter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Greenery {
    /// No parks in range.
    NoParks,
    /// At least one park in range.
    Parks {
        /// Number of parks.
        count: u32,
    },
}

/// Short label for one kind present within the perimeter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountChip {
    /// Kind being counted.
    pub kind: ObjectKind,
    /// Catalog emoji for the kind.
    pub emoji: String,
    /// Number present.
    pub count: u32,
}

/// A nearby object reduced to what a summary list needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearestEntry {
    /// Object id.
    pub id: String,
    /// Object kind.
    pub kind: ObjectKind,
    /// Catalog emoji for the kind.
    pub emoji: String,
    /// Distance in kilometres.
    pub distance_km: f64,
}

/// Human-facing conclusions drawn from a [`PerimeterAnalysis`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerimeterInsights {
    /// Per-kind count chips, ordered by kind.
    pub chips: Vec<CountChip>,
    /// School seat status.
    pub school_seats: SchoolSeats,
    /// Filtered industrial emission, when any is present.
    pub industry_influence: Option<f64>,
    /// Park status.
    pub greenery: Greenery,
    /// Closest objects, limited in number.
    pub nearest: Vec<NearestEntry>,
    /// Readable one-line summaries of the above.
    pub messages: Vec<String>,
}
