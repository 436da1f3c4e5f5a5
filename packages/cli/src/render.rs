//! Plain-text rendering of a session view.

use std::fmt::Write as _;

use citytwin_analysis_models::{Greenery, SchoolSeats};
use citytwin_session::{AnalysisPoint, CommandOutcome, EvaluationTarget, ViewModel};

/// One-line summary of a command outcome.
#[must_use]
pub fn render_outcome(outcome: &CommandOutcome) -> String {
    match outcome {
        CommandOutcome::Added { id, kind } => format!("added {kind} {id}"),
        CommandOutcome::Moved { id } => format!("moved {id}"),
        CommandOutcome::Deleted { id } => format!("deleted {id}"),
        CommandOutcome::Selected { id } => format!("selected {id}"),
        CommandOutcome::Updated => "updated".to_string(),
        CommandOutcome::NoOp { reason } => format!("no-op: {reason}"),
    }
}

/// Formats a view model the way a terminal user wants to read it.
#[must_use]
pub fn render_view(view: &ViewModel) -> String {
    let mut out = String::new();

    writeln!(out, "Mode: {}   Palette: {}", view.mode, view.palette).unwrap();
    writeln!(out).unwrap();

    writeln!(out, "Objects ({}):", view.objects.len()).unwrap();
    if view.objects.is_empty() {
        writeln!(out, "  (none)").unwrap();
    }
    for obj in &view.objects {
        let marker = if obj.selected { '*' } else { ' ' };
        writeln!(
            out,
            " {marker} {} {:<16} {}  {}",
            obj.emoji, obj.label, obj.coordinate, obj.id
        )
        .unwrap();
    }
    writeln!(out).unwrap();

    match &view.evaluation.target {
        EvaluationTarget::SelectedObject { id, kind } => {
            writeln!(out, "Evaluation of {kind} {id}:").unwrap();
        }
        EvaluationTarget::PlannedPoint { kind, coordinate } => {
            writeln!(out, "Evaluation of planned {kind} at {coordinate}:").unwrap();
        }
        EvaluationTarget::Nothing => {
            writeln!(out, "Evaluation:").unwrap();
        }
    }
    for line in &view.evaluation.evaluation.supporting {
        writeln!(out, "  + {line}").unwrap();
    }
    for line in &view.evaluation.evaluation.concerning {
        writeln!(out, "  - {line}").unwrap();
    }
    writeln!(out).unwrap();

    let analysis = &view.analysis;
    let center = match &analysis.point {
        AnalysisPoint::SelectedObject { kind, .. } => format!("selected {kind}"),
        AnalysisPoint::PlannedPoint { kind, .. } => format!("planned {kind}"),
        AnalysisPoint::DefaultCenter { .. } => "default center".to_string(),
    };
    writeln!(
        out,
        "Perimeter {:.1} km around {center} {}:",
        analysis.perimeter.radius_km,
        analysis.point.coordinate()
    )
    .unwrap();

    let chips = analysis
        .insights
        .chips
        .iter()
        .map(|c| format!("{} {}", c.emoji, c.count))
        .collect::<Vec<_>>();
    if !chips.is_empty() {
        writeln!(out, "  {}", chips.join("  ")).unwrap();
    }

    match analysis.insights.school_seats {
        SchoolSeats::Shortfall { seats } => {
            writeln!(out, "  School seats: short by ~{seats:.0}").unwrap();
        }
        SchoolSeats::Sufficient => {
            writeln!(out, "  School seats: sufficient").unwrap();
        }
    }
    if let Some(influence) = analysis.insights.industry_influence {
        writeln!(out, "  Industrial influence: {influence:.0}").unwrap();
    }
    match analysis.insights.greenery {
        Greenery::NoParks => {
            writeln!(out, "  Parks: none").unwrap();
        }
        Greenery::Parks { count } => {
            writeln!(out, "  Parks: {count}").unwrap();
        }
    }

    for msg in &analysis.insights.messages {
        writeln!(out, "  > {msg}").unwrap();
    }

    if !analysis.insights.nearest.is_empty() {
        writeln!(out, "  Nearest:").unwrap();
        for entry in &analysis.insights.nearest {
            writeln!(
                out,
                "    {} {} {:.2} km",
                entry.emoji, entry.id, entry.distance_km
            )
            .unwrap();
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use citytwin_object_models::{Coordinate, ObjectKind};
    use citytwin_session::{Command, NoOpReason, Session, SessionConfig};

    #[test]
    fn outcomes_render_on_one_line() {
        assert_eq!(
            render_outcome(&CommandOutcome::Added {
                id: "abc".to_string(),
                kind: ObjectKind::SportsFacility,
            }),
            "added SPORTS_FACILITY abc"
        );
        assert_eq!(
            render_outcome(&CommandOutcome::NoOp {
                reason: NoOpReason::NothingSelected,
            }),
            "no-op: Nothing is selected"
        );
    }

    #[test]
    fn empty_session_shows_placeholder_and_default_center() {
        let text = render_view(&Session::default().view());
        assert!(text.contains("Mode: ADD"), "{text}");
        assert!(text.contains("(none)"), "{text}");
        assert!(text.contains("default center"), "{text}");
        assert!(
            text.contains(citytwin_session::view::NOTHING_TO_EVALUATE),
            "{text}"
        );
    }

    #[test]
    fn placed_objects_are_listed_and_marked() {
        let mut session = Session::new(SessionConfig::default());
        session
            .apply(Command::MapClick {
                coordinate: Coordinate::new(49.9483, 82.6285).unwrap(),
            })
            .unwrap();
        session
            .apply(Command::SelectPalette {
                kind: ObjectKind::Park,
            })
            .unwrap();
        session
            .apply(Command::MapClick {
                coordinate: Coordinate::new(49.95, 82.63).unwrap(),
            })
            .unwrap();

        let text = render_view(&session.view());
        assert!(text.contains("Objects (2):"), "{text}");
        assert!(text.contains(" * 🌳"), "{text}");
        assert!(text.contains("Evaluation of PARK"), "{text}");
        assert!(text.contains("Nearest:"), "{text}");
    }
}
