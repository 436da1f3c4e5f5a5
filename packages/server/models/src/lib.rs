#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the citytwin server.
//!
//! These types are serialized to JSON for the REST API. They wrap the
//! session view model rather than duplicating it, so the API contract
//! follows the core types field for field.

use chrono::{DateTime, Utc};
use citytwin_analysis_models::{PerimeterAnalysis, PerimeterInsights};
use citytwin_object_models::catalog::CatalogEntry;
use citytwin_object_models::{CandidateKind, CityObject, Coordinate, ObjectKind, ObjectParams};
use citytwin_session::{CommandOutcome, ViewModel};
use serde::{Deserialize, Serialize};

/// A catalog entry as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCatalogEntry {
    /// Object kind.
    pub kind: ObjectKind,
    /// Palette label.
    pub label: String,
    /// Palette emoji.
    pub emoji: String,
    /// Placement hint.
    pub hint: String,
    /// Map marker colour.
    pub marker_color: String,
    /// Map marker icon.
    pub marker_icon: String,
    /// Parameters a new object of this kind starts with.
    pub default_params: ObjectParams,
}

impl From<&CatalogEntry> for ApiCatalogEntry {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            kind: entry.kind,
            label: entry.label.clone(),
            emoji: entry.emoji.clone(),
            hint: entry.hint.clone(),
            marker_color: entry.marker_color.clone(),
            marker_icon: entry.marker_icon.clone(),
            default_params: entry.kind.default_params(),
        }
    }
}

/// A session and its current view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSession {
    /// Session ID, used in subsequent requests.
    pub session_id: String,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// Current view.
    pub view: ViewModel,
}

/// One row of the session listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSessionSummary {
    /// Session ID.
    pub session_id: String,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// Number of placed objects.
    pub object_count: usize,
}

/// Response to an applied command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCommandResponse {
    /// What the command did.
    pub outcome: CommandOutcome,
    /// View after the command.
    pub view: ViewModel,
}

/// Body for a stateless placement evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    /// Category name; unknown names get the fallback statement only.
    pub kind: CandidateKind,
    /// Candidate position.
    pub coordinate: Coordinate,
    /// Other objects already on the map.
    #[serde(default)]
    pub objects: Vec<CityObject>,
}

/// Body for a stateless perimeter analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerimeterRequest {
    /// Analysis center.
    pub center: Coordinate,
    /// Objects to consider.
    #[serde(default)]
    pub objects: Vec<CityObject>,
    /// Radius in kilometres; the server default when absent.
    pub radius_km: Option<f64>,
    /// How many nearest objects to list; the server default when absent.
    pub nearby_limit: Option<usize>,
}

/// Result of a stateless perimeter analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPerimeterResponse {
    /// Raw aggregates.
    pub perimeter: PerimeterAnalysis,
    /// Derived conclusions.
    pub insights: PerimeterInsights,
}

/// Error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Human-readable error.
    pub error: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}
