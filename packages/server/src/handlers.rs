//! HTTP handler functions for the citytwin API.

use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError, web};
use chrono::Utc;
use citytwin_analysis::{analyze_perimeter, evaluate as evaluate_placement, perimeter_insights};
use citytwin_object_models::catalog;
use citytwin_server_models::{
    ApiCatalogEntry, ApiCommandResponse, ApiError, ApiHealth, ApiPerimeterResponse, ApiSession,
    ApiSessionSummary, EvaluateRequest, PerimeterRequest,
};
use citytwin_session::{Command, Session, SessionError};

use crate::{AppState, SessionEntry};

/// Errors a handler can return.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// No session with the requested ID.
    #[error("Session not found: {id}")]
    SessionNotFound {
        /// The requested ID.
        id: String,
    },

    /// The command could not be applied.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A request parameter was out of range.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ResponseError for HandlerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::SessionNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Session(_) | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        log::warn!("Request failed: {self}");
        HttpResponse::build(self.status_code()).json(ApiError {
            error: self.to_string(),
        })
    }
}

/// Turns JSON body extraction failures (malformed JSON, out-of-range
/// coordinates, unknown command types) into JSON error responses.
pub fn json_error(err: &JsonPayloadError) -> actix_web::Error {
    HandlerError::InvalidRequest(err.to_string()).into()
}

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/catalog`
///
/// Returns the object palette with each kind's default parameters.
pub async fn catalog() -> HttpResponse {
    let entries: Vec<ApiCatalogEntry> = catalog::entries()
        .iter()
        .map(ApiCatalogEntry::from)
        .collect();

    HttpResponse::Ok().json(entries)
}

/// `GET /api/sessions`
pub async fn list_sessions(state: web::Data<AppState>) -> HttpResponse {
    let summaries: Vec<ApiSessionSummary> = state
        .sessions()
        .iter()
        .map(|(id, entry)| ApiSessionSummary {
            session_id: id.clone(),
            created_at: entry.created_at,
            object_count: entry.session.registry().len(),
        })
        .collect();

    HttpResponse::Ok().json(summaries)
}

/// `POST /api/sessions`
///
/// Creates an empty session using the server's session config.
pub async fn create_session(state: web::Data<AppState>) -> HttpResponse {
    let session_id = uuid::Uuid::new_v4().to_string();
    let entry = SessionEntry {
        created_at: Utc::now(),
        session: Session::new(state.config.clone()),
    };
    let body = ApiSession {
        session_id: session_id.clone(),
        created_at: entry.created_at,
        view: entry.session.view(),
    };

    state.sessions().insert(session_id.clone(), entry);
    log::info!("Created session {session_id}");

    HttpResponse::Created().json(body)
}

/// `GET /api/sessions/{id}`
pub async fn get_session(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, HandlerError> {
    let id = path.into_inner();
    let sessions = state.sessions();
    let entry = sessions
        .get(&id)
        .ok_or_else(|| HandlerError::SessionNotFound { id: id.clone() })?;

    Ok(HttpResponse::Ok().json(ApiSession {
        session_id: id.clone(),
        created_at: entry.created_at,
        view: entry.session.view(),
    }))
}

/// `DELETE /api/sessions/{id}`
pub async fn delete_session(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, HandlerError> {
    let id = path.into_inner();
    if state.sessions().remove(&id).is_none() {
        return Err(HandlerError::SessionNotFound { id });
    }

    log::info!("Deleted session {id}");
    Ok(HttpResponse::NoContent().finish())
}

/// `POST /api/sessions/{id}/commands`
///
/// Applies one command and returns its outcome with the new view.
pub async fn apply_command(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<Command>,
) -> Result<HttpResponse, HandlerError> {
    let id = path.into_inner();
    let mut sessions = state.sessions();
    let entry = sessions
        .get_mut(&id)
        .ok_or_else(|| HandlerError::SessionNotFound { id: id.clone() })?;

    let outcome = entry.session.apply(body.into_inner())?;

    Ok(HttpResponse::Ok().json(ApiCommandResponse {
        outcome,
        view: entry.session.view(),
    }))
}

/// `POST /api/evaluate`
///
/// Evaluates a candidate placement against the supplied objects without
/// touching any session.
pub async fn evaluate(body: web::Json<EvaluateRequest>) -> HttpResponse {
    let request = body.into_inner();

    HttpResponse::Ok().json(evaluate_placement(
        &request.kind,
        request.coordinate,
        &request.objects,
    ))
}

/// `POST /api/perimeter`
///
/// Aggregates the supplied objects around a center point.
pub async fn perimeter(
    state: web::Data<AppState>,
    body: web::Json<PerimeterRequest>,
) -> Result<HttpResponse, HandlerError> {
    let request = body.into_inner();
    let radius_km = request
        .radius_km
        .unwrap_or(state.config.analysis_radius_km);
    if !radius_km.is_finite() || radius_km < 0.0 {
        return Err(HandlerError::InvalidRequest(format!(
            "radiusKm must be a non-negative number, got {radius_km}"
        )));
    }
    let nearby_limit = request.nearby_limit.unwrap_or(state.config.nearby_limit);

    let perimeter = analyze_perimeter(request.center, &request.objects, radius_km);
    let insights = perimeter_insights(&perimeter, nearby_limit);

    Ok(HttpResponse::Ok().json(ApiPerimeterResponse {
        perimeter,
        insights,
    }))
}
