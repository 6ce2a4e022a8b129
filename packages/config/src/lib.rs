#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dashboard configuration.
//!
//! Settings are read from TOML. Every section and field is optional; what
//! a file leaves out keeps its default (see `config/dashboard.toml` for the
//! full set). Server settings and data paths can additionally be
//! overridden from the environment.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use wind_map_filter_models::{FilterCriteria, FilterOptions, NumericRange};

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing failed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Top-level dashboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Where the input tables live.
    pub data: DataConfig,
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Initial slider positions.
    pub sliders: SliderConfig,
    /// Poster grid layout.
    pub poster: PosterConfig,
}

/// Paths of the column-oriented JSON tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Turbine table.
    pub turbine_table: PathBuf,
    /// Farm table.
    pub farm_table: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            turbine_table: PathBuf::from("data/wt_data_final.json"),
            farm_table: PathBuf::from("data/wf_data_final.json"),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to.
    pub bind_addr: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Initial positions of the three range sliders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    /// `Number of turbines` slider.
    pub turbine_count: NumericRange,
    /// `Elevation` slider.
    pub elevation: NumericRange,
    /// `Turbine Spacing` slider.
    pub turbine_spacing: NumericRange,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            turbine_count: NumericRange::new(1.0, 4086.0),
            elevation: NumericRange::new(-46.0, 4684.0),
            turbine_spacing: NumericRange::new(10.0, 13155.0),
        }
    }
}

impl SliderConfig {
    /// The criteria the dashboard starts with: every option checked and
    /// each slider at its configured position.
    #[must_use]
    pub fn initial_criteria(&self, options: &FilterOptions) -> FilterCriteria {
        FilterCriteria {
            turbine_count_range: self.turbine_count,
            spacing_range: self.turbine_spacing,
            elevation_range: self.elevation,
            ..options.permissive_criteria()
        }
    }
}

/// Poster grid layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PosterConfig {
    /// Grid rows.
    pub rows: u32,
    /// Grid columns.
    pub cols: u32,
}

impl Default for PosterConfig {
    fn default() -> Self {
        Self { rows: 3, cols: 3 }
    }
}

impl DashboardConfig {
    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid TOML or a value has the
    /// wrong type.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::de::from_str(toml_str)?)
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Loads `path` if given, otherwise the defaults, then applies
    /// environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is given but cannot be read or parsed.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = path.map_or_else(|| Ok(Self::default()), Self::load)?;
        config.apply_env();
        Ok(config)
    }

    /// Overrides settings from `BIND_ADDR`, `PORT`, `TURBINE_TABLE_PATH`
    /// and `FARM_TABLE_PATH`.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Overrides settings from an arbitrary variable lookup.
    ///
    /// An unparsable `PORT` is logged and ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(bind_addr) = lookup("BIND_ADDR") {
            self.server.bind_addr = bind_addr;
        }
        if let Some(port) = lookup("PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(e) => log::warn!("Ignoring invalid PORT '{port}': {e}"),
            }
        }
        if let Some(path) = lookup("TURBINE_TABLE_PATH") {
            self.data.turbine_table = PathBuf::from(path);
        }
        if let Some(path) = lookup("FARM_TABLE_PATH") {
            self.data.farm_table = PathBuf::from(path);
        }
    }
}
