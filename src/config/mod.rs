//! Configuration with precedence handling.
//!
//! Resolution order: hardcoded defaults → TOML config file → environment
//! variables → CLI arguments. The result is an immutable
//! [`ResolvedConfig`] read once at startup; nothing in the core re-reads
//! configuration afterwards.
//!
//! Environment variables: `HUBSCOUT_API_BASE_URL`, `HUBSCOUT_PER_PAGE`,
//! `HUBSCOUT_LOG_FILE`.

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

/// Default remote API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Default results per page.
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read an explicitly requested config file.
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML.
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
/// All fields are optional; unspecified fields fall back to defaults.
/// Corresponds to `~/.config/hubscout/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Remote API base URL.
    #[serde(default)]
    pub api_base_url: Option<String>,

    /// Results per search page.
    #[serde(default)]
    pub per_page: Option<u32>,

    /// Path to the log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Remote API base URL.
    pub api_base_url: String,
    /// Results per search page, always >= 1.
    pub per_page: u32,
    /// Path to the log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            per_page: DEFAULT_PER_PAGE,
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve the default log file path.
///
/// `~/.local/state/hubscout/hubscout.log` on Unix-like systems, or the
/// platform's state directory equivalent; falls back to a relative path
/// when no home directory can be determined.
pub fn default_log_path() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hubscout")
        .join("hubscout.log")
}

/// Resolve the default config file path, if a config directory exists.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hubscout").join("config.toml"))
}

/// Load the config file.
///
/// An explicit path must exist and parse; a missing file at the default
/// path is not an error (returns `Ok(None)`).
pub fn load_config_file(explicit: Option<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let (path, required) = match explicit {
        Some(path) => (path, true),
        None => match default_config_path() {
            Some(path) => (path, false),
            None => return Ok(None),
        },
    };

    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(_) if !required => return Ok(None),
        Err(err) => {
            return Err(ConfigError::ReadError {
                path,
                reason: err.to_string(),
            })
        }
    };

    let parsed = toml::from_str::<ConfigFile>(&contents).map_err(|err| ConfigError::ParseError {
        path,
        reason: err.to_string(),
    })?;
    Ok(Some(parsed))
}

/// Merge a config file over the defaults.
pub fn merge_config(file: Option<ConfigFile>) -> ResolvedConfig {
    let mut config = ResolvedConfig::default();
    if let Some(file) = file {
        if let Some(api_base_url) = file.api_base_url {
            config.api_base_url = api_base_url;
        }
        if let Some(per_page) = file.per_page {
            config.per_page = per_page.max(1);
        }
        if let Some(log_file_path) = file.log_file_path {
            config.log_file_path = log_file_path;
        }
    }
    config
}

/// Apply environment variable overrides.
///
/// An unparsable `HUBSCOUT_PER_PAGE` is ignored rather than fatal; the
/// page size must stay >= 1.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(value) = std::env::var("HUBSCOUT_API_BASE_URL") {
        if !value.trim().is_empty() {
            config.api_base_url = value;
        }
    }
    if let Ok(value) = std::env::var("HUBSCOUT_PER_PAGE") {
        if let Ok(per_page) = value.trim().parse::<u32>() {
            config.per_page = per_page.max(1);
        }
    }
    if let Ok(value) = std::env::var("HUBSCOUT_LOG_FILE") {
        if !value.trim().is_empty() {
            config.log_file_path = PathBuf::from(value);
        }
    }
    config
}

/// Apply CLI argument overrides (highest precedence).
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    api_base_url: Option<String>,
    per_page: Option<u32>,
) -> ResolvedConfig {
    if let Some(api_base_url) = api_base_url {
        config.api_base_url = api_base_url;
    }
    if let Some(per_page) = per_page {
        config.per_page = per_page.max(1);
    }
    config
}
