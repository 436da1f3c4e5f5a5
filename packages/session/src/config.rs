//! Session configuration.
//!
//! Defaults center on the Ust-Kamenogorsk pilot district. A TOML file can
//! override any subset of the fields:
//!
//! ```toml
//! analysis_radius_km = 2.0
//! nearby_limit = 10
//!
//! [default_center]
//! lat = 49.9483
//! lon = 82.6285
//! ```

use std::path::{Path, PathBuf};

use citytwin_analysis::DEFAULT_NEARBY_LIMIT;
use citytwin_analysis_models::DEFAULT_RADIUS_KM;
use citytwin_object_models::Coordinate;
use serde::{Deserialize, Serialize};

/// Center of Ust-Kamenogorsk (Öskemen).
pub const DEFAULT_CENTER: Coordinate = Coordinate::new_unchecked(49.9483, 82.6285);

/// Errors that can occur while loading a [`SessionConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has the wrong shape.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The analysis radius is not a positive finite number.
    #[error("Invalid analysis radius {radius_km}: must be positive and finite")]
    InvalidRadius {
        /// The rejected radius.
        radius_km: f64,
    },
}

/// Tunables for a planning session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Analysis point used when nothing is selected or clicked.
    pub default_center: Coordinate,
    /// Perimeter analysis radius, in kilometres.
    pub analysis_radius_km: f64,
    /// How many nearest objects the perimeter summary lists.
    pub nearby_limit: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_center: DEFAULT_CENTER,
            analysis_radius_km: DEFAULT_RADIUS_KM,
            nearby_limit: DEFAULT_NEARBY_LIMIT,
        }
    }
}

impl SessionConfig {
    /// Parses and validates a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the TOML is malformed, the center is not a
    /// valid coordinate, or the radius is not positive.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::de::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or is invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::info!("Loaded session config from {}", path.display());
        Ok(config)
    }

    /// Checks the invariants deserialization alone cannot enforce.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRadius`] for a non-positive or
    /// non-finite radius.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.analysis_radius_km.is_finite() || self.analysis_radius_km <= 0.0 {
            return Err(ConfigError::InvalidRadius {
                radius_km: self.analysis_radius_km,
            });
        }
        Ok(())
    }
}
