//! Host-issued commands and their outcomes.

use citytwin_object_models::{Coordinate, ObjectKind};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// What a map click does.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Mode {
    /// Clicking places the palette kind.
    #[default]
    Add,
    /// Clicking moves the selected object.
    Move,
    /// Clicking does nothing; deletion goes through [`Command::DeleteSelected`].
    Delete,
}

/// A user action forwarded by the rendering host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Command {
    /// Switch the interaction mode.
    SetMode {
        /// New mode.
        mode: Mode,
    },
    /// Choose which kind the next click in [`Mode::Add`] places.
    SelectPalette {
        /// Kind to place.
        kind: ObjectKind,
    },
    /// Select an existing object.
    SelectObject {
        /// Object id.
        id: String,
    },
    /// The user clicked the map.
    MapClick {
        /// Clicked point.
        coordinate: Coordinate,
    },
    /// Remove the selected object.
    DeleteSelected,
}

/// Why a command changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NoOpReason {
    /// Move or delete was requested without a selection.
    #[strum(to_string = "Nothing is selected")]
    NothingSelected,
    /// Map clicks do not delete; use the delete command on a selection.
    #[strum(to_string = "To delete, select an object and issue a delete")]
    ClickInDeleteMode,
}

/// What a command did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum CommandOutcome {
    /// A new object was placed and selected.
    Added {
        /// New object's id.
        id: String,
        /// New object's kind.
        kind: ObjectKind,
    },
    /// The selected object was moved.
    Moved {
        /// Moved object's id.
        id: String,
    },
    /// The selected object was removed.
    Deleted {
        /// Removed object's id.
        id: String,
    },
    /// An object was selected.
    Selected {
        /// Selected object's id.
        id: String,
    },
    /// Mode or palette changed.
    Updated,
    /// Nothing changed.
    NoOp {
        /// Why.
        reason: NoOpReason,
    },
}
