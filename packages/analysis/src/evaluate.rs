//! Distance-threshold heuristics for a candidate placement.
//!
//! The engine looks up the nearest housing, school, park and industrial
//! site around the candidate point and applies a fixed rule table per
//! kind. Each rule appends one supporting or concerning statement.

use citytwin_analysis_models::Evaluation;
use citytwin_geo::nearest_km;
use citytwin_object_models::{CandidateKind, CityObject, Coordinate, ObjectKind};

/// Statement returned when there is nothing else on the map.
pub const FIRST_POINT: &str =
    "This is the first point: a convenient anchor to start modelling the district.";

/// Statement appended when no rule produced a supporting statement.
pub const FALLBACK: &str = "The location looks acceptable for this simplified model.";

/// Always supporting for industrial sites.
pub const INDUSTRY_JOBS: &str = "Creates jobs and economic activity.";

/// Always concerning for industrial sites.
pub const INDUSTRY_AIR_QUALITY: &str =
    "Worsens air quality in the surrounding area unless filters are installed.";

/// Always supporting for bridges.
pub const BRIDGE_CONNECTIVITY: &str = "A bridge usually improves connectivity and reduces detours.";

/// Always concerning for bridges.
pub const BRIDGE_ROUTE_GAP: &str =
    "Without a real gap in the route network the effect may be weaker (route gaps are not detected in this model).";

// Housing
const HOUSING_NO_SCHOOLS: &str = "No schools nearby: local infrastructure may be overloaded.";
const HOUSING_SCHOOL_NEAR: &str = "A school is relatively close: better accessibility.";
const HOUSING_SCHOOL_FAR: &str = "The nearest school is far away: transport load will grow.";
const HOUSING_PARK_NEAR: &str = "A park nearby raises comfort and environmental quality.";
const HOUSING_PARK_FAR: &str = "No park nearby: consider adding a green space.";
const HOUSING_INDUSTRY_NEAR: &str = "Too close to an industrial zone: higher environmental risk.";
const HOUSING_INDUSTRY_FAR: &str = "Far enough from industrial zones: better for the environment.";

// School
const SCHOOL_NO_HOUSING: &str = "No housing nearby: the school may end up in a void.";
const SCHOOL_HOUSING_NEAR: &str = "Housing nearby: the school will be in demand and convenient.";
const SCHOOL_HOUSING_FAR: &str = "Housing is far away: children will have to travel and traffic will grow.";
const SCHOOL_INDUSTRY_NEAR: &str = "Close to an industrial zone: undesirable for a school environment.";
const SCHOOL_INDUSTRY_FAR: &str = "Away from industrial zones: better for health and comfort.";

// Park
const PARK_HOUSING_NEAR: &str = "Housing nearby: the park will give residents the most benefit.";
const PARK_HOUSING_FAR: &str = "The park improves the district, but the effect is stronger next to housing.";
const PARK_INDUSTRY_MITIGATION: &str = "An industrial zone is nearby: the park partly offsets pollution.";
const PARK_INDUSTRY_NOISE: &str = "Noise and emissions may still be noticeable.";
const PARK_CLEAN_ZONE: &str = "Clean zone: the park adds comfort and appeal.";

// Industry
const INDUSTRY_HOUSING_NEAR: &str = "Close to housing: environmental risks and resident complaints.";
const INDUSTRY_HOUSING_FAR: &str = "Far from housing: fewer environmental conflicts.";
const INDUSTRY_SCHOOL_NEAR: &str = "Close to a school: undesirable neighbourhood.";
const INDUSTRY_SCHOOL_FAR: &str = "Far from schools: better for the social environment.";

// Sports facility
const SPORTS_HOUSING_NEAR: &str = "Housing nearby: convenient access for visitors.";
const SPORTS_HOUSING_FAR: &str = "Far from housing: attendance may be lower.";
const SPORTS_PARK_NEAR: &str = "A park nearby: a good pairing of sport and leisure.";
const SPORTS_PARK_SUGGEST: &str = "Could be complemented by a nearby park for a more comfortable zone.";

/// Nearest distances, in km, from the candidate to each reference kind.
#[derive(Debug, Clone, Copy)]
struct Nearest {
    housing: Option<f64>,
    school: Option<f64>,
    park: Option<f64>,
    industry: Option<f64>,
}

impl Nearest {
    fn around(at: Coordinate, others: &[&CityObject]) -> Self {
        let near = |kind| nearest_km(at, kind, others.iter().copied());
        Self {
            housing: near(ObjectKind::Housing),
            school: near(ObjectKind::School),
            park: near(ObjectKind::Park),
            industry: near(ObjectKind::Industry),
        }
    }
}

/// `true` if a distance is present and within `limit_km`.
fn within(distance: Option<f64>, limit_km: f64) -> bool {
    distance.is_some_and(|d| d <= limit_km)
}

/// Evaluates placing an object of `kind` at `at`, given every *other*
/// object on the map.
///
/// With no other objects this returns the single [`FIRST_POINT`] statement.
/// If no rule yields a supporting statement, [`FALLBACK`] is appended.
#[must_use]
pub fn evaluate<'a, I>(kind: &CandidateKind, at: Coordinate, others: I) -> Evaluation
where
    I: IntoIterator<Item = &'a CityObject>,
{
    let others: Vec<&CityObject> = others.into_iter().collect();
    let mut eval = Evaluation::default();

    if others.is_empty() {
        eval.supporting.push(FIRST_POINT.to_string());
        return eval;
    }

    let nearest = Nearest::around(at, &others);
    log::trace!("Evaluating {kind:?} at {at} with nearest {nearest:?}");

    match kind {
        CandidateKind::Known(kind) => apply_rules(*kind, nearest, &mut eval),
        CandidateKind::Unknown(name) => {
            log::debug!("No placement rules for unknown category {name:?}");
        }
    }

    if eval.supporting.is_empty() {
        eval.supporting.push(FALLBACK.to_string());
    }
    eval
}

fn apply_rules(kind: ObjectKind, nearest: Nearest, eval: &mut Evaluation) {
    match kind {
        ObjectKind::Housing => housing(nearest, eval),
        ObjectKind::School => school(nearest, eval),
        ObjectKind::Park => park(nearest, eval),
        ObjectKind::Industry => industry(nearest, eval),
        ObjectKind::SportsFacility => sports_facility(nearest, eval),
        ObjectKind::Bridge => bridge(eval),
    }
}

fn support(eval: &mut Evaluation, s: &str) {
    eval.supporting.push(s.to_string());
}

fn concern(eval: &mut Evaluation, s: &str) {
    eval.concerning.push(s.to_string());
}

fn housing(n: Nearest, eval: &mut Evaluation) {
    match n.school {
        None => concern(eval, HOUSING_NO_SCHOOLS),
        Some(d) if d <= 1.5 => support(eval, HOUSING_SCHOOL_NEAR),
        Some(_) => concern(eval, HOUSING_SCHOOL_FAR),
    }

    if within(n.park, 1.2) {
        support(eval, HOUSING_PARK_NEAR);
    } else {
        concern(eval, HOUSING_PARK_FAR);
    }

    if within(n.industry, 2.0) {
        concern(eval, HOUSING_INDUSTRY_NEAR);
    } else {
        support(eval, HOUSING_INDUSTRY_FAR);
    }
}

fn school(n: Nearest, eval: &mut Evaluation) {
    match n.housing {
        None => concern(eval, SCHOOL_NO_HOUSING),
        Some(d) if d <= 1.5 => support(eval, SCHOOL_HOUSING_NEAR),
        Some(_) => concern(eval, SCHOOL_HOUSING_FAR),
    }

    if within(n.industry, 2.5) {
        concern(eval, SCHOOL_INDUSTRY_NEAR);
    } else {
        support(eval, SCHOOL_INDUSTRY_FAR);
    }
}

fn park(n: Nearest, eval: &mut Evaluation) {
    if within(n.housing, 1.5) {
        support(eval, PARK_HOUSING_NEAR);
    } else {
        support(eval, PARK_HOUSING_FAR);
    }

    if within(n.industry, 2.0) {
        support(eval, PARK_INDUSTRY_MITIGATION);
        concern(eval, PARK_INDUSTRY_NOISE);
    } else {
        support(eval, PARK_CLEAN_ZONE);
    }
}

fn industry(n: Nearest, eval: &mut Evaluation) {
    if within(n.housing, 3.0) {
        concern(eval, INDUSTRY_HOUSING_NEAR);
    } else {
        support(eval, INDUSTRY_HOUSING_FAR);
    }

    if within(n.school, 3.5) {
        concern(eval, INDUSTRY_SCHOOL_NEAR);
    } else {
        support(eval, INDUSTRY_SCHOOL_FAR);
    }

    support(eval, INDUSTRY_JOBS);
    concern(eval, INDUSTRY_AIR_QUALITY);
}

fn sports_facility(n: Nearest, eval: &mut Evaluation) {
    if within(n.housing, 2.0) {
        support(eval, SPORTS_HOUSING_NEAR);
    } else {
        concern(eval, SPORTS_HOUSING_FAR);
    }

    if within(n.park, 1.5) {
        support(eval, SPORTS_PARK_NEAR);
    } else {
        support(eval, SPORTS_PARK_SUGGEST);
    }
}

fn bridge(eval: &mut Evaluation) {
    support(eval, BRIDGE_CONNECTIVITY);
    concern(eval, BRIDGE_ROUTE_GAP);
}
