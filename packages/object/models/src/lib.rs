#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! City object taxonomy, typed parameters, and coordinate types.
//!
//! This crate defines the closed set of object kinds a planner can place on
//! the map, the strongly typed parameters each kind carries, and the
//! category catalog (labels, emoji, marker styles) shared by every host.

pub mod catalog;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString, IntoStaticStr};

/// The fixed set of city object categories.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ObjectKind {
    /// Residential complex
    Housing,
    /// School
    School,
    /// Park or other green space
    Park,
    /// Sports complex
    SportsFacility,
    /// Industrial site
    Industry,
    /// Bridge
    Bridge,
}

impl ObjectKind {
    /// Returns the parameters a freshly placed object of this kind starts with.
    #[must_use]
    pub const fn default_params(self) -> ObjectParams {
        match self {
            Self::Housing => ObjectParams::Housing { residents: 1500 },
            Self::School => ObjectParams::School { capacity: 800 },
            Self::Park => ObjectParams::Park { green_factor: 0.25 },
            Self::SportsFacility => ObjectParams::SportsFacility {
                visitors_per_day: 500,
            },
            Self::Industry => ObjectParams::Industry {
                emission: 120.0,
                filter_efficiency: 0.0,
            },
            Self::Bridge => ObjectParams::Bridge {
                capacity_bonus: 200,
            },
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Housing,
            Self::School,
            Self::Park,
            Self::SportsFacility,
            Self::Industry,
            Self::Bridge,
        ]
    }
}

/// Category-specific parameters, one variant per [`ObjectKind`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "kind",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum ObjectParams {
    /// Residential complex parameters.
    Housing {
        /// Number of residents.
        residents: u32,
    },
    /// School parameters.
    School {
        /// Number of pupil seats.
        capacity: u32,
    },
    /// Park parameters.
    Park {
        /// Relative greening contribution (0.0-1.0).
        green_factor: f64,
    },
    /// Sports complex parameters.
    SportsFacility {
        /// Expected visitors per day.
        visitors_per_day: u32,
    },
    /// Industrial site parameters.
    Industry {
        /// Base emission level before filtering.
        emission: f64,
        /// Fraction of emission removed by filters (0.0-1.0).
        filter_efficiency: f64,
    },
    /// Bridge parameters.
    Bridge {
        /// Extra crossing capacity provided.
        capacity_bonus: u32,
    },
}

impl ObjectParams {
    /// Returns the kind these parameters belong to.
    #[must_use]
    pub const fn kind(&self) -> ObjectKind {
        match self {
            Self::Housing { .. } => ObjectKind::Housing,
            Self::School { .. } => ObjectKind::School,
            Self::Park { .. } => ObjectKind::Park,
            Self::SportsFacility { .. } => ObjectKind::SportsFacility,
            Self::Industry { .. } => ObjectKind::Industry,
            Self::Bridge { .. } => ObjectKind::Bridge,
        }
    }
}

/// Error returned when a latitude/longitude pair is out of range or not
/// finite.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("invalid coordinate ({lat}, {lon}): expected latitude in -90..=90 and longitude in -180..=180")]
pub struct InvalidCoordinateError {
    /// The rejected latitude.
    pub lat: f64,
    /// The rejected longitude.
    pub lon: f64,
}

/// A point on the map in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = InvalidCoordinateError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Self::new(raw.lat, raw.lon)
    }
}

impl Coordinate {
    /// Creates a coordinate, validating the latitude/longitude ranges.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCoordinateError`] if either value is not finite or
    /// lies outside its valid range.
    pub fn new(lat: f64, lon: f64) -> Result<Self, InvalidCoordinateError> {
        if lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon)
        {
            Ok(Self { lat, lon })
        } else {
            Err(InvalidCoordinateError { lat, lon })
        }
    }

    /// Creates a coordinate without range checks. Intended for constants.
    #[must_use]
    pub const fn new_unchecked(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn lon(&self) -> f64 {
        self.lon
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.5}, {:.5})", self.lat, self.lon)
    }
}

/// An object placed on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityObject {
    /// Opaque identifier, unique within a registry.
    pub id: String,
    /// Where the object sits.
    pub coordinate: Coordinate,
    /// Kind-specific parameters. The object's kind is derived from these.
    pub params: ObjectParams,
}

impl CityObject {
    /// Creates an object of the given kind with that kind's default
    /// parameters.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: ObjectKind, coordinate: Coordinate) -> Self {
        Self {
            id: id.into(),
            coordinate,
            params: kind.default_params(),
        }
    }

    /// Returns this object's kind.
    #[must_use]
    pub const fn kind(&self) -> ObjectKind {
        self.params.kind()
    }
}

/// A category name as received from a host, which may or may not be one of
/// the known [`ObjectKind`]s.
///
/// Deserializes from any string through [`CandidateKind::parse`], so known
/// names match case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CandidateKind {
    /// A recognized kind.
    Known(ObjectKind),
    /// Any other category name.
    Unknown(String),
}

impl CandidateKind {
    /// Maps a category name onto a known kind, keeping unrecognized names
    /// as-is.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        name.trim()
            .parse::<ObjectKind>()
            .map_or_else(|_| Self::Unknown(name.to_string()), Self::Known)
    }
}

impl From<ObjectKind> for CandidateKind {
    fn from(kind: ObjectKind) -> Self {
        Self::Known(kind)
    }
}

impl From<String> for CandidateKind {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl From<CandidateKind> for String {
    fn from(kind: CandidateKind) -> Self {
        match kind {
            CandidateKind::Known(kind) => kind.to_string(),
            CandidateKind::Unknown(name) => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_match_kind() {
        for kind in ObjectKind::all() {
            assert_eq!(kind.default_params().kind(), *kind);
        }
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!(
            "sports_facility".parse::<ObjectKind>().unwrap(),
            ObjectKind::SportsFacility
        );
        assert_eq!("HOUSING".parse::<ObjectKind>().unwrap(), ObjectKind::Housing);
        assert!("harbor".parse::<ObjectKind>().is_err());
    }

    #[test]
    fn candidate_kind_keeps_unknown_names() {
        assert_eq!(
            CandidateKind::parse("school"),
            CandidateKind::Known(ObjectKind::School)
        );
        assert_eq!(
            CandidateKind::parse("Harbor"),
            CandidateKind::Unknown("Harbor".to_string())
        );
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct Candidate {
        kind: CandidateKind,
    }

    #[test]
    fn candidate_kind_deserializes_through_parse() {
        let c: Candidate = toml::from_str("kind = \"sports_facility\"").unwrap();
        assert_eq!(c.kind, CandidateKind::Known(ObjectKind::SportsFacility));

        let c: Candidate = toml::from_str("kind = \"Harbor\"").unwrap();
        assert_eq!(c.kind, CandidateKind::Unknown("Harbor".to_string()));
    }

    #[test]
    fn candidate_kind_serializes_as_name() {
        let text = toml::to_string(&Candidate {
            kind: CandidateKind::Known(ObjectKind::Park),
        })
        .unwrap();
        assert_eq!(text.trim(), "kind = \"PARK\"");

        let text = toml::to_string(&Candidate {
            kind: CandidateKind::Unknown("harbor".to_string()),
        })
        .unwrap();
        assert_eq!(text.trim(), "kind = \"harbor\"");
    }

    #[test]
    fn coordinate_rejects_out_of_range() {
        assert!(Coordinate::new(49.9, 82.6).is_ok());
        assert!(Coordinate::new(90.0, -180.0).is_ok());
        assert!(Coordinate::new(90.5, 0.0).is_err());
        assert!(Coordinate::new(0.0, 181.0).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn coordinate_deserialization_validates() {
        let ok: Result<Coordinate, _> = parse_toml(r#"lat = 10.0
lon = 20.0"#);
        assert_eq!(ok.unwrap(), Coordinate::new_unchecked(10.0, 20.0));

        let bad: Result<Coordinate, _> = parse_toml(r#"lat = 100.0
lon = 20.0"#);
        assert!(bad.is_err());
    }

    fn parse_toml(s: &str) -> Result<Coordinate, toml::de::Error> {
        toml::from_str(s)
    }

    #[test]
    fn params_serialize_with_kind_tag() {
        let params = ObjectKind::Industry.default_params();
        let text = toml::to_string(&params).unwrap();
        assert!(text.contains("kind = \"INDUSTRY\""), "{text}");
        assert!(text.contains("filterEfficiency = 0.0"), "{text}");
    }

    #[test]
    fn new_object_uses_defaults() {
        let obj = CityObject::new("abc", ObjectKind::School, Coordinate::new_unchecked(1.0, 2.0));
        assert_eq!(obj.kind(), ObjectKind::School);
        assert_eq!(obj.params, ObjectParams::School { capacity: 800 });
    }
}
