#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line entry point for citytwin.
//!
//! ```text
//! citytwin serve [--config citytwin.toml]
//! citytwin scenario plan.toml [--config citytwin.toml] [--json]
//! citytwin catalog
//! ```
//!
//! `serve` starts the HTTP API. `scenario` replays a scripted session and
//! prints the final view. `catalog` lists the placeable object kinds.

mod render;
mod scenario;

use std::path::{Path, PathBuf};

use citytwin_object_models::catalog;
use citytwin_session::SessionConfig;
use clap::{Parser, Subcommand};

use crate::scenario::Scenario;

#[derive(Parser)]
#[command(name = "citytwin", about = "Urban planning sandbox")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Session config file (falls back to `CITYTWIN_CONFIG`)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Replay a scenario file and print the resulting view
    Scenario {
        /// Scenario TOML file
        file: PathBuf,
        /// Session config file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print the view model as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List the placeable object kinds
    Catalog,
}

fn load_config(path: Option<&Path>) -> Result<SessionConfig, Box<dyn std::error::Error>> {
    Ok(match path {
        Some(path) => SessionConfig::load(path)?,
        None => citytwin_server::config_from_env()?,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            let config = load_config(config.as_deref())?;
            actix_rt::System::new().block_on(citytwin_server::run_server(config))?;
        }
        Commands::Scenario { file, config, json } => {
            let config = load_config(config.as_deref())?;
            let scenario = Scenario::load(&file)?;
            log::info!(
                "Replaying {} step(s) from {}",
                scenario.steps.len(),
                file.display()
            );

            let (session, outcomes) = scenario.replay(config)?;
            let view = session.view();

            if json {
                let body = serde_json::json!({
                    "outcomes": outcomes,
                    "view": view,
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                for (step, outcome) in outcomes.iter().enumerate() {
                    println!("[{step}] {}", render::render_outcome(outcome));
                }
                println!();
                print!("{}", render::render_view(&view));
            }
        }
        Commands::Catalog => {
            println!("{:<18} {:<6} {:<20} HINT", "KIND", "", "LABEL");
            println!("{}", "-".repeat(80));
            for entry in catalog::entries() {
                println!(
                    "{:<18} {:<6} {:<20} {}",
                    entry.kind.as_ref(), entry.emoji, entry.label, entry.hint
                );
            }
        }
    }

    Ok(())
}
