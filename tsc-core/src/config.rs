//! Configuration: analysis parameters, TOML loading and config file resolution
//!
//! # Settings Sources Priority
//!
//! 1. Command-line arguments (applied by the caller on top of the loaded file)
//! 2. `TSC_CONFIG` environment variable naming a TOML file
//! 3. User config file (`~/.config/tsc/config.toml` on Linux)
//! 4. Built-in defaults (code constants)
//!
//! A file named on the command line or in `TSC_CONFIG` must exist. When
//! neither is given and the user config file is absent, defaults are used and
//! a warning is logged. A file that exists but cannot be parsed is an error.

use crate::fusion::FusionPolicy;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "TSC_CONFIG";

/// How per-source signals are fused into one score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    pub policy: FusionPolicy,

    /// IMDb ratings with fewer votes are treated as unknown
    pub min_imdb_votes: u64,

    /// Weight of the first signal in blended policies, within [0, 1]
    pub blend_alpha: f64,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            policy: FusionPolicy::Auto,
            min_imdb_votes: 5000,
            blend_alpha: 0.7,
        }
    }
}

/// Decay thresholds for fall detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallConfig {
    /// Minimum drop between neighbours that counts as a fall
    pub adjacent_drop: f64,

    /// Minimum drop below the peak that counts as a fall
    pub cumulative_drop: f64,

    /// Rolling window width, at least 1
    pub window_size: usize,

    /// A fully-known window averaging below this counts as a fall
    pub window_avg_threshold: f64,
}

impl Default for FallConfig {
    fn default() -> Self {
        Self {
            adjacent_drop: 10.0,
            cumulative_drop: 18.0,
            window_size: 2,
            window_avg_threshold: 65.0,
        }
    }
}

/// Good-item threshold and streak ranking knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreakConfig {
    pub good_threshold: f64,

    /// Slack granted to the first item only
    pub origin_grace: f64,

    /// Shorter blocks are never considered, at least 1
    pub min_length: usize,

    /// Ranking bonus for streaks starting at the first item; 0 disables it
    pub origin_bias: f64,
}

impl Default for StreakConfig {
    fn default() -> Self {
        Self {
            good_threshold: 70.0,
            origin_grace: 8.0,
            min_length: 1,
            origin_bias: 1.0,
        }
    }
}

/// Full analysis configuration bundle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub fusion: FusionConfig,
    pub fall: FallConfig,
    pub streak: StreakConfig,
}

impl AnalysisConfig {
    /// Check the configuration contract before any computation
    pub fn validate(&self) -> Result<()> {
        let alpha = self.fusion.blend_alpha;
        if !(0.0..=1.0).contains(&alpha) {
            return Err(Error::invalid_config(
                "blend_alpha",
                format!("must be within [0, 1], got {}", alpha),
            ));
        }
        if self.fall.window_size == 0 {
            return Err(Error::invalid_config("window_size", "must be at least 1"));
        }
        if self.streak.min_length == 0 {
            return Err(Error::invalid_config("min_length", "must be at least 1"));
        }

        let finite = [
            ("adjacent_drop", self.fall.adjacent_drop),
            ("cumulative_drop", self.fall.cumulative_drop),
            ("window_avg_threshold", self.fall.window_avg_threshold),
            ("good_threshold", self.streak.good_threshold),
            ("origin_grace", self.streak.origin_grace),
            ("origin_bias", self.streak.origin_bias),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(Error::invalid_config(name, format!("must be finite, got {}", value)));
            }
        }

        Ok(())
    }
}

/// Catalog filters applied before analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Franchises with fewer items (after filtering) are dropped
    pub min_items: usize,

    /// Keep items that are unreleased or have no release date
    pub include_unreleased: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            min_items: 2,
            include_unreleased: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Top-level TOML configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub logging: LoggingConfig,
    pub catalog: CatalogConfig,
    pub analysis: AnalysisConfig,
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse TOML failed for {}: {}", path.display(), e)))
}

/// Resolve which config file to read, if any
///
/// Priority: explicit path → `TSC_CONFIG` → user config directory.
/// Returns `None` when no candidate exists.
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    default_config_path().filter(|p| p.exists())
}

/// Platform config location: `<config dir>/tsc/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tsc").join("config.toml"))
}

/// Load configuration with graceful degradation
///
/// An explicitly requested file (CLI or environment) must exist and parse.
/// When only the default location is consulted and nothing is there, the
/// built-in defaults are returned.
pub fn load_config(cli_arg: Option<&Path>) -> Result<TomlConfig> {
    match resolve_config_path(cli_arg) {
        Some(path) => {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            let config = load_toml_config(&path)?;
            info!("Loaded configuration from {}", path.display());
            Ok(config)
        }
        None => {
            warn!("No config file found, using built-in defaults");
            Ok(TomlConfig::default())
        }
    }
}
