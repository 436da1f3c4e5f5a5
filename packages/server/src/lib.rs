#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for citytwin.
//!
//! Each client creates its own planning session and drives it with
//! commands; the response to every command is the session's fresh view
//! model. Sessions live in memory only and are dropped on `DELETE` or when
//! the server stops. Stateless `/api/evaluate` and `/api/perimeter`
//! endpoints expose the analysis core directly.

mod handlers;

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use chrono::{DateTime, Utc};
use citytwin_session::{Session, SessionConfig};

/// A session plus its bookkeeping.
pub struct SessionEntry {
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// The session itself.
    pub session: Session,
}

/// Shared application state.
///
/// Sessions are isolated per client: each lives in its own map entry and
/// every command runs while holding the map lock, so no two requests ever
/// mutate one session concurrently.
pub struct AppState {
    /// Config applied to newly created sessions.
    pub config: SessionConfig,
    sessions: Mutex<BTreeMap<String, SessionEntry>>,
}

impl AppState {
    /// Creates state with no sessions.
    #[must_use]
    pub const fn new(config: SessionConfig) -> Self {
        Self {
            config,
            sessions: Mutex::new(BTreeMap::new()),
        }
    }

    /// Locks the session map.
    ///
    /// # Panics
    ///
    /// Panics if the `Mutex` is poisoned.
    pub fn sessions(&self) -> MutexGuard<'_, BTreeMap<String, SessionEntry>> {
        self.sessions.lock().expect("Session map mutex poisoned")
    }
}

/// Registers all `/api` routes.
///
/// Request bodies that fail to deserialize answer with a JSON
/// `{"error": ...}` body like every other handler error.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(
                web::JsonConfig::default().error_handler(|err, _req| handlers::json_error(&err)),
            )
            .route("/health", web::get().to(handlers::health))
            .route("/catalog", web::get().to(handlers::catalog))
            .route("/sessions", web::get().to(handlers::list_sessions))
            .route("/sessions", web::post().to(handlers::create_session))
            .route("/sessions/{id}", web::get().to(handlers::get_session))
            .route("/sessions/{id}", web::delete().to(handlers::delete_session))
            .route(
                "/sessions/{id}/commands",
                web::post().to(handlers::apply_command),
            )
            .route("/evaluate", web::post().to(handlers::evaluate))
            .route("/perimeter", web::post().to(handlers::perimeter)),
    );
}

/// Loads the session config from `CITYTWIN_CONFIG` if set, otherwise
/// returns the defaults.
///
/// # Errors
///
/// Returns an `std::io::Result` error wrapping the config error if the file
/// cannot be read or is invalid.
pub fn config_from_env() -> std::io::Result<SessionConfig> {
    match std::env::var("CITYTWIN_CONFIG") {
        Ok(path) => SessionConfig::load(Path::new(&path)).map_err(std::io::Error::other),
        Err(_) => Ok(SessionConfig::default()),
    }
}

/// Starts the citytwin API server.
///
/// Reads the bind address and port from `BIND_ADDR` / `PORT` (defaults
/// `127.0.0.1:8080`). This is a regular async function; the caller provides
/// the async runtime (e.g. via `#[actix_web::main]`) and initializes
/// logging.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: SessionConfig) -> std::io::Result<()> {
    let state = web::Data::new(AppState::new(config));

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
