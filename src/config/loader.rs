//! Configuration file loading with precedence handling.

use crate::view_state::columns::ColumnPolicy;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Default pixel width of one terminal cell, used for column breakpoints.
pub const DEFAULT_CELL_WIDTH: u16 = 8;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A value parsed but is out of range.
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue {
        field: &'static str,
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/cheatdeck/config.toml`.
///
/// ```toml
/// deck = "/path/to/deck.toml"
/// log_file_path = "/tmp/cheatdeck.log"
///
/// [layout]
/// policy = "shortest-first"
/// cell_width = 9
///
/// [analytics]
/// enabled = true
/// website_id = "7f3c..."
/// sink_path = "/tmp/events.jsonl"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Deck file replacing the bundled deck.
    #[serde(default)]
    pub deck: Option<PathBuf>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    #[serde(default)]
    pub layout: Option<LayoutSection>,

    #[serde(default)]
    pub analytics: Option<AnalyticsSection>,
}

/// `[layout]` section.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LayoutSection {
    /// `"round-robin"` or `"shortest-first"`.
    #[serde(default)]
    pub policy: Option<String>,

    /// Pixel width of one terminal cell.
    #[serde(default)]
    pub cell_width: Option<u16>,
}

/// `[analytics]` section.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AnalyticsSection {
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Site identifier; analytics stays off while this is empty.
    #[serde(default)]
    pub website_id: Option<String>,

    /// Optional JSON-lines file receiving every event.
    #[serde(default)]
    pub sink_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Deck file; `None` means the bundled deck.
    pub deck: Option<PathBuf>,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    pub column_policy: ColumnPolicy,
    pub cell_width: u16,
    pub analytics_enabled: bool,
    pub website_id: String,
    pub analytics_sink_path: Option<PathBuf>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            deck: None,
            log_file_path: default_log_path(),
            column_policy: ColumnPolicy::default(),
            cell_width: DEFAULT_CELL_WIDTH,
            analytics_enabled: true,
            website_id: String::new(),
            analytics_sink_path: None,
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/cheatdeck/cheatdeck.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("cheatdeck").join("cheatdeck.log")
    } else {
        PathBuf::from("cheatdeck.log")
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
/// Returns `~/.config/cheatdeck/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cheatdeck").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `CHEATDECK_CONFIG` environment variable
/// 3. Default path `~/.config/cheatdeck/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
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

    if let Ok(env_path) = std::env::var("CHEATDECK_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] for an unknown policy name or a zero
/// cell width.
pub fn merge_config(config_file: Option<ConfigFile>) -> Result<ResolvedConfig, ConfigError> {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return Ok(defaults);
    };

    let layout = config.layout.unwrap_or_default();
    let analytics = config.analytics.unwrap_or_default();

    let column_policy = match layout.policy {
        Some(name) => {
            name.parse::<ColumnPolicy>()
                .map_err(|e| ConfigError::InvalidValue {
                    field: "layout.policy",
                    reason: e.to_string(),
                })?
        }
        None => defaults.column_policy,
    };

    let cell_width = layout.cell_width.unwrap_or(defaults.cell_width);
    if cell_width == 0 {
        return Err(ConfigError::InvalidValue {
            field: "layout.cell_width",
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(ResolvedConfig {
        deck: config.deck.or(defaults.deck),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        column_policy,
        cell_width,
        analytics_enabled: analytics.enabled.unwrap_or(defaults.analytics_enabled),
        website_id: analytics.website_id.unwrap_or(defaults.website_id),
        analytics_sink_path: analytics.sink_path.or(defaults.analytics_sink_path),
    })
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `CHEATDECK_DECK`: deck file path
/// - `CHEATDECK_ANALYTICS`: `0`/`false`/`off` disables analytics, `1`/`true`/`on` enables it
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(deck) = std::env::var("CHEATDECK_DECK") {
        if !deck.is_empty() {
            config.deck = Some(PathBuf::from(deck));
        }
    }

    if let Ok(value) = std::env::var("CHEATDECK_ANALYTICS") {
        match value.to_ascii_lowercase().as_str() {
            "0" | "false" | "off" => config.analytics_enabled = false,
            "1" | "true" | "on" => config.analytics_enabled = true,
            _ => {}
        }
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    deck_override: Option<PathBuf>,
    policy_override: Option<ColumnPolicy>,
    no_analytics: bool,
) -> ResolvedConfig {
    if let Some(deck) = deck_override {
        config.deck = Some(deck);
    }

    if let Some(policy) = policy_override {
        config.column_policy = policy;
    }

    if no_analytics {
        config.analytics_enabled = false;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
