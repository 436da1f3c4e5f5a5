//! Scripted sessions loaded from TOML.
//!
//! A scenario is a list of steps replayed into a fresh session. Each step
//! is either a session command or a `select_index` shortcut that selects
//! the n-th placed object, since generated ids are not known in advance:
//!
//! ```toml
//! [[steps]]
//! type = "MAP_CLICK"
//! coordinate = { lat = 49.9483, lon = 82.6285 }
//!
//! [[steps]]
//! type = "SELECT_PALETTE"
//! kind = "SCHOOL"
//!
//! [[steps]]
//! select_index = 0
//! ```

use std::path::{Path, PathBuf};

use citytwin_session::{Command, CommandOutcome, Session, SessionConfig, SessionError};
use serde::{Deserialize, Serialize};

/// Errors that can occur while loading or replaying a scenario.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    /// The scenario file could not be read.
    #[error("Failed to read scenario {}: {source}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The scenario is not valid TOML or has the wrong shape.
    #[error("Failed to parse scenario: {0}")]
    Parse(#[from] toml::de::Error),

    /// A step's command was rejected by the session.
    #[error("Step {step} failed: {source}")]
    Step {
        /// Zero-based step index.
        step: usize,
        /// Session error.
        source: SessionError,
    },

    /// A `select_index` step pointed past the end of the object list.
    #[error("Step {step}: no object at index {index} ({len} placed)")]
    IndexOutOfRange {
        /// Zero-based step index.
        step: usize,
        /// Requested object index.
        index: usize,
        /// Number of placed objects.
        len: usize,
    },
}

/// One scenario step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Step {
    /// Select the object at this position in insertion order.
    SelectIndex {
        /// Zero-based object index.
        select_index: usize,
    },
    /// Any session command.
    Command(Command),
}

/// A parsed scenario file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Steps in replay order.
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Parses a scenario from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Parse`] if the TOML is malformed or a step
    /// is not recognized.
    pub fn from_toml_str(s: &str) -> Result<Self, ScenarioError> {
        Ok(toml::de::from_str(s)?)
    }

    /// Reads a scenario file.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let text = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Replays every step into a new session.
    ///
    /// Returns the session along with each step's outcome.
    ///
    /// # Errors
    ///
    /// Stops at the first step that fails and returns its
    /// [`ScenarioError`].
    pub fn replay(
        &self,
        config: SessionConfig,
    ) -> Result<(Session, Vec<CommandOutcome>), ScenarioError> {
        let mut session = Session::new(config);
        let mut outcomes = Vec::with_capacity(self.steps.len());

        for (step, entry) in self.steps.iter().enumerate() {
            let command = match entry {
                Step::SelectIndex { select_index } => {
                    let objects = session.registry().objects();
                    let obj = objects.get(*select_index).ok_or(ScenarioError::IndexOutOfRange {
                        step,
                        index: *select_index,
                        len: objects.len(),
                    })?;
                    Command::SelectObject { id: obj.id.clone() }
                }
                Step::Command(command) => command.clone(),
            };

            let outcome = session
                .apply(command)
                .map_err(|source| ScenarioError::Step { step, source })?;
            log::debug!("Step {step}: {outcome:?}");
            outcomes.push(outcome);
        }

        Ok((session, outcomes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use citytwin_object_models::ObjectKind;

    const TWO_PLACEMENTS: &str = r#"
[[steps]]
type = "MAP_CLICK"
coordinate = { lat = 49.9483, lon = 82.6285 }

[[steps]]
type = "SELECT_PALETTE"
kind = "SCHOOL"

[[steps]]
type = "MAP_CLICK"
coordinate = { lat = 49.9555, lon = 82.6285 }

[[steps]]
select_index = 0
"#;

    #[test]
    fn parses_commands_and_shortcuts() {
        let scenario = Scenario::from_toml_str(TWO_PLACEMENTS).unwrap();
        assert_eq!(scenario.steps.len(), 4);
        assert_eq!(
            scenario.steps[1],
            Step::Command(Command::SelectPalette {
                kind: ObjectKind::School
            })
        );
        assert_eq!(scenario.steps[3], Step::SelectIndex { select_index: 0 });
    }

    #[test]
    fn replay_selects_by_index() {
        let scenario = Scenario::from_toml_str(TWO_PLACEMENTS).unwrap();
        let (session, outcomes) = scenario.replay(SessionConfig::default()).unwrap();

        assert_eq!(outcomes.len(), 4);
        let housing_id = &session.registry().objects()[0].id;
        assert_eq!(
            outcomes[3],
            CommandOutcome::Selected {
                id: housing_id.clone()
            }
        );
        assert_eq!(session.registry().selected_id(), Some(housing_id.as_str()));
    }

    #[test]
    fn out_of_range_index_fails() {
        let scenario = Scenario::from_toml_str("[[steps]]\nselect_index = 3\n").unwrap();
        let err = scenario.replay(SessionConfig::default()).unwrap_err();
        assert!(
            matches!(
                err,
                ScenarioError::IndexOutOfRange {
                    step: 0,
                    index: 3,
                    len: 0
                }
            ),
            "{err}"
        );
    }

    #[test]
    fn unknown_step_type_is_a_parse_error() {
        let err = Scenario::from_toml_str("[[steps]]\ntype = \"TELEPORT\"\n").unwrap_err();
        assert!(matches!(err, ScenarioError::Parse(_)), "{err}");
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = Scenario::load(Path::new("/nonexistent/plan.toml")).unwrap_err();
        assert!(matches!(err, ScenarioError::Io { .. }), "{err}");
        assert!(
            err.to_string()
                .starts_with("Failed to read scenario /nonexistent/plan.toml: "),
            "{err}"
        );
    }

    #[test]
    fn empty_scenario_is_empty_session() {
        let (session, outcomes) = Scenario::default()
            .replay(SessionConfig::default())
            .unwrap();
        assert!(outcomes.is_empty());
        assert!(session.registry().is_empty());
    }
}
