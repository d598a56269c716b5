//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

use crate::visibility::{Dimension, ZeroExtentPolicy};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "INVIEWPORT_CONFIG";

/// Environment variable overriding the dimension.
pub const DIMENSION_ENV: &str = "INVIEWPORT_DIMENSION";

/// Environment variable overriding the zero-extent policy.
pub const ZERO_EXTENT_ENV: &str = "INVIEWPORT_ZERO_EXTENT";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, defaults are used.
/// Corresponds to `~/.config/inviewport/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Default dimension name. Unrecognised names fall back to `vertical`.
    #[serde(default)]
    pub dimension: Option<String>,

    /// How ratios with a zero denominator are reported.
    #[serde(default)]
    pub zero_extent: Option<ZeroExtentPolicy>,

    /// Pretty-print result records.
    #[serde(default)]
    pub pretty: Option<bool>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Dimension to check.
    pub dimension: Dimension,
    /// Zero-extent policy.
    pub zero_extent: ZeroExtentPolicy,
    /// Pretty-print output.
    pub pretty: bool,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            dimension: Dimension::Vertical,
            zero_extent: ZeroExtentPolicy::Propagate,
            pretty: false,
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/inviewport/inviewport.log` on Linux, or the
/// platform state directory elsewhere. Falls back to the current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("inviewport").join("inviewport.log")
    } else {
        PathBuf::from("inviewport.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/inviewport/config.toml` on Linux, appropriate path on
/// other platforms, `None` if no config directory can be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("inviewport").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `INVIEWPORT_CONFIG` environment variable
/// 3. Default path `~/.config/inviewport/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        dimension: config
            .dimension
            .as_deref()
            .map(|name| Dimension::from_name(Some(name)))
            .unwrap_or(defaults.dimension),
        zero_extent: config.zero_extent.unwrap_or(defaults.zero_extent),
        pretty: config.pretty.unwrap_or(defaults.pretty),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `INVIEWPORT_DIMENSION`: dimension name, matched leniently
/// - `INVIEWPORT_ZERO_EXTENT`: `propagate` or `zero`; other values are ignored
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(name) = std::env::var(DIMENSION_ENV) {
        config.dimension = Dimension::from_name(Some(name.as_str()));
    }

    if let Ok(value) = std::env::var(ZERO_EXTENT_ENV) {
        match <ZeroExtentPolicy as clap::ValueEnum>::from_str(&value, true) {
            Ok(policy) => config.zero_extent = policy,
            Err(_) => warn!(value = %value, "Ignoring unrecognised {}", ZERO_EXTENT_ENV),
        }
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence. Only flags the user actually set
/// are passed as `Some`.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    dimension_override: Option<String>,
    zero_extent_override: Option<ZeroExtentPolicy>,
    pretty_override: Option<bool>,
) -> ResolvedConfig {
    if let Some(name) = dimension_override {
        config.dimension = Dimension::from_name(Some(name.as_str()));
    }

    if let Some(policy) = zero_extent_override {
        config.zero_extent = policy;
    }

    if let Some(pretty) = pretty_override {
        config.pretty = pretty;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
