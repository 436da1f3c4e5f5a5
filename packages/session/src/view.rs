//! Immutable snapshot handed to the rendering host after each command.

use citytwin_analysis_models::{Evaluation, PerimeterAnalysis, PerimeterInsights};
use citytwin_object_models::{Coordinate, ObjectKind, ObjectParams};
use serde::{Deserialize, Serialize};

use crate::command::Mode;

/// Placeholder shown when there is nothing to evaluate.
pub const NOTHING_TO_EVALUATE: &str =
    "Select an object or click on the map to get an evaluation.";

/// One placed object as listed by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectView {
    /// Object id.
    pub id: String,
    /// Object kind.
    pub kind: ObjectKind,
    /// Catalog emoji.
    pub emoji: String,
    /// Catalog label.
    pub label: String,
    /// Position.
    pub coordinate: Coordinate,
    /// Parameters.
    pub params: ObjectParams,
    /// Whether this is the current selection.
    pub selected: bool,
}

/// What the evaluation panel is about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum EvaluationTarget {
    /// The selected object, judged against every other object.
    SelectedObject {
        /// Object id.
        id: String,
        /// Object kind.
        kind: ObjectKind,
    },
    /// A planned placement of the palette kind at the last click.
    PlannedPoint {
        /// Palette kind.
        kind: ObjectKind,
        /// Last clicked point.
        coordinate: Coordinate,
    },
    /// Nothing selected and nothing clicked.
    Nothing,
}

/// Where the perimeter analysis is centered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum AnalysisPoint {
    /// The selected object's position.
    SelectedObject {
        /// Object id.
        id: String,
        /// Object kind.
        kind: ObjectKind,
        /// Position.
        coordinate: Coordinate,
    },
    /// The last clicked point, for the palette kind.
    PlannedPoint {
        /// Palette kind.
        kind: ObjectKind,
        /// Last clicked point.
        coordinate: Coordinate,
    },
    /// The configured default center.
    DefaultCenter {
        /// Center point.
        coordinate: Coordinate,
    },
}

impl AnalysisPoint {
    /// The point the analysis is centered on.
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        match self {
            Self::SelectedObject { coordinate, .. }
            | Self::PlannedPoint { coordinate, .. }
            | Self::DefaultCenter { coordinate } => *coordinate,
        }
    }
}

/// Evaluation panel contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationView {
    /// What was evaluated.
    pub target: EvaluationTarget,
    /// Pros and cons.
    pub evaluation: Evaluation,
}

/// Perimeter panel contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisView {
    /// Analysis center.
    pub point: AnalysisPoint,
    /// Raw aggregates.
    pub perimeter: PerimeterAnalysis,
    /// Derived conclusions.
    pub insights: PerimeterInsights,
}

/// Everything a host needs to render the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    /// Current interaction mode.
    pub mode: Mode,
    /// Kind the next placement will use.
    pub palette: ObjectKind,
    /// Placed objects in insertion order.
    pub objects: Vec<ObjectView>,
    /// Selected object id.
    pub selected_id: Option<String>,
    /// Last clicked point.
    pub last_click: Option<Coordinate>,
    /// Evaluation panel.
    pub evaluation: EvaluationView,
    /// Perimeter panel.
    pub analysis: AnalysisView,
}
