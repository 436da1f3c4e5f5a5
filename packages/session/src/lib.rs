#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! A single planner's session.
//!
//! [`Session`] owns the object registry and the interaction state (mode,
//! palette, last click). Hosts feed it [`Command`]s and render the
//! [`ViewModel`] it produces; each view is a full recomputation over the
//! current objects. A session is not synchronized: hosts serving several
//! users keep one session per user.

pub mod command;
pub mod config;
pub mod view;

use citytwin_analysis::{analyze_perimeter, evaluate, perimeter_insights};
use citytwin_analysis_models::Evaluation;
use citytwin_object_models::{CandidateKind, Coordinate, ObjectKind, catalog};
use citytwin_registry::{Registry, RegistryError};

pub use command::{Command, CommandOutcome, Mode, NoOpReason};
pub use config::{ConfigError, SessionConfig};
pub use view::{
    AnalysisPoint, AnalysisView, EvaluationTarget, EvaluationView, ObjectView, ViewModel,
};

/// Errors that can occur while applying a command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The command referenced a missing object.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// State for one planner.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    registry: Registry,
    mode: Mode,
    palette: ObjectKind,
    last_click: Option<Coordinate>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Session {
    /// Starts an empty session.
    #[must_use]
    pub const fn new(config: SessionConfig) -> Self {
        Self {
            config,
            registry: Registry::new(),
            mode: Mode::Add,
            palette: ObjectKind::Housing,
            last_click: None,
        }
    }

    /// Applies one command.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Registry`] if a [`Command::SelectObject`]
    /// names an object that does not exist.
    pub fn apply(&mut self, command: Command) -> Result<CommandOutcome, SessionError> {
        log::debug!("Applying {command:?}");

        let outcome = match command {
            Command::SetMode { mode } => {
                self.mode = mode;
                CommandOutcome::Updated
            }
            Command::SelectPalette { kind } => {
                self.palette = kind;
                CommandOutcome::Updated
            }
            Command::SelectObject { id } => {
                self.registry.select(&id)?;
                CommandOutcome::Selected { id }
            }
            Command::MapClick { coordinate } => self.click(coordinate),
            Command::DeleteSelected => self.delete_selected(),
        };

        log::debug!("Outcome {outcome:?}");
        Ok(outcome)
    }

    fn click(&mut self, coordinate: Coordinate) -> CommandOutcome {
        self.last_click = Some(coordinate);

        match self.mode {
            Mode::Add => {
                let kind = self.palette;
                let id = self.registry.add(kind, coordinate).id.clone();
                CommandOutcome::Added { id, kind }
            }
            Mode::Move => {
                let id = self.registry.selected_id().map(str::to_string);
                match id {
                    Some(id) if self.registry.move_selected(coordinate) => {
                        CommandOutcome::Moved { id }
                    }
                    _ => CommandOutcome::NoOp {
                        reason: NoOpReason::NothingSelected,
                    },
                }
            }
            Mode::Delete => CommandOutcome::NoOp {
                reason: NoOpReason::ClickInDeleteMode,
            },
        }
    }

    fn delete_selected(&mut self) -> CommandOutcome {
        let id = self.registry.selected_id().map(str::to_string);
        match id {
            Some(id) if self.registry.delete_selected() => CommandOutcome::Deleted { id },
            _ => CommandOutcome::NoOp {
                reason: NoOpReason::NothingSelected,
            },
        }
    }

    /// Builds the current view.
    #[must_use]
    pub fn view(&self) -> ViewModel {
        let selected = self.registry.selected();

        let objects = self
            .registry
            .objects()
            .iter()
            .map(|o| ObjectView {
                id: o.id.clone(),
                kind: o.kind(),
                emoji: catalog::emoji_for(o.kind()).to_string(),
                label: catalog::label_for(o.kind()).to_string(),
                coordinate: o.coordinate,
                params: o.params,
                selected: selected.is_some_and(|s| s.id == o.id),
            })
            .collect();

        let evaluation = match (selected, self.last_click) {
            (Some(obj), _) => EvaluationView {
                target: EvaluationTarget::SelectedObject {
                    id: obj.id.clone(),
                    kind: obj.kind(),
                },
                evaluation: evaluate(
                    &CandidateKind::Known(obj.kind()),
                    obj.coordinate,
                    self.registry.others(&obj.id),
                ),
            },
            (None, Some(click)) => EvaluationView {
                target: EvaluationTarget::PlannedPoint {
                    kind: self.palette,
                    coordinate: click,
                },
                evaluation: evaluate(
                    &CandidateKind::Known(self.palette),
                    click,
                    self.registry.objects(),
                ),
            },
            (None, None) => EvaluationView {
                target: EvaluationTarget::Nothing,
                evaluation: Evaluation {
                    supporting: vec![view::NOTHING_TO_EVALUATE.to_string()],
                    concerning: Vec::new(),
                },
            },
        };

        let point = match (selected, self.last_click) {
            (Some(obj), _) => AnalysisPoint::SelectedObject {
                id: obj.id.clone(),
                kind: obj.kind(),
                coordinate: obj.coordinate,
            },
            (None, Some(click)) => AnalysisPoint::PlannedPoint {
                kind: self.palette,
                coordinate: click,
            },
            (None, None) => AnalysisPoint::DefaultCenter {
                coordinate: self.config.default_center,
            },
        };
        let perimeter = analyze_perimeter(
            point.coordinate(),
            self.registry.objects(),
            self.config.analysis_radius_km,
        );
        let insights = perimeter_insights(&perimeter, self.config.nearby_limit);

        ViewModel {
            mode: self.mode,
            palette: self.palette,
            objects,
            selected_id: self.registry.selected_id().map(str::to_string),
            last_click: self.last_click,
            evaluation,
            analysis: AnalysisView {
                point,
                perimeter,
                insights,
            },
        }
    }

    /// The session's configuration.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The placed objects.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Current interaction mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Kind the next placement will use.
    #[must_use]
    pub const fn palette(&self) -> ObjectKind {
        self.palette
    }
}
