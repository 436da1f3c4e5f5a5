#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Placement evaluation and perimeter analysis.
//!
//! Everything here is a pure function over a snapshot of placed objects:
//! [`evaluate`] produces qualitative pros and cons for a candidate
//! placement, [`analyze_perimeter`] aggregates what lies within a radius of
//! a point, and [`perimeter_insights`] turns that aggregate into
//! displayable conclusions.

pub mod evaluate;
pub mod insights;
pub mod perimeter;

pub use evaluate::evaluate;
pub use insights::{DEFAULT_NEARBY_LIMIT, perimeter_insights};
pub use perimeter::analyze_perimeter;
