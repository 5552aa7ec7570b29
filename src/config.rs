//! Configuration file support for preflight-dash.
//!
//! Provides YAML-based configuration through `preflight-dash.config.yml`
//! files, including data structures, file loading, validation and the merge
//! with command-line overrides.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::adapters::outbound::network::{DEFAULT_PROBE_PATH, DEFAULT_STATE_PATH};
use crate::application::transition::DEFAULT_TRANSITION_DELAY;
use crate::application::use_cases::DEFAULT_POLL_INTERVAL;
use crate::shared::error::DashError;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "preflight-dash.config.yml";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8787";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub base_url: Option<String>,
    pub state_path: Option<String>,
    pub probe_path: Option<String>,
    pub poll_interval_ms: Option<u64>,
    pub transition_delay_ms: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Values given on the command line; they take precedence over the file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub poll_interval_ms: Option<u64>,
}

/// Effective settings of the `watch` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchSettings {
    pub base_url: String,
    pub state_path: String,
    pub probe_path: String,
    pub poll_interval: Duration,
    pub transition_delay: Duration,
    pub request_timeout: Duration,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            state_path: DEFAULT_STATE_PATH.to_string(),
            probe_path: DEFAULT_PROBE_PATH.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            transition_delay: DEFAULT_TRANSITION_DELAY,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl WatchSettings {
    /// Merges defaults, the optional config file and CLI overrides, then
    /// validates the result.
    pub fn resolve(file: Option<ConfigFile>, overrides: Overrides) -> Result<Self> {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        let poll_interval_ms = overrides
            .poll_interval_ms
            .or(file.poll_interval_ms)
            .unwrap_or(defaults.poll_interval.as_millis() as u64);
        if poll_interval_ms == 0 {
            return Err(invalid(
                "poll_interval_ms must be greater than 0",
                "The producer is polled every poll_interval_ms milliseconds (default 2000)",
            ));
        }

        let settings = Self {
            base_url: overrides
                .base_url
                .or(file.base_url)
                .unwrap_or(defaults.base_url),
            state_path: file.state_path.unwrap_or(defaults.state_path),
            probe_path: file.probe_path.unwrap_or(defaults.probe_path),
            poll_interval: Duration::from_millis(poll_interval_ms),
            transition_delay: file
                .transition_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.transition_delay),
            request_timeout: file
                .request_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        };

        if settings.base_url.trim().is_empty() {
            return Err(invalid(
                "base_url must not be empty",
                format!("Set base_url to the producer address (e.g., \"{}\")", DEFAULT_BASE_URL),
            ));
        }

        Ok(settings)
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.poll_interval_ms == Some(0) {
        return Err(invalid(
            "poll_interval_ms must be greater than 0",
            "Remove the field to use the default of 2000 ms",
        ));
    }
    if config.request_timeout_secs == Some(0) {
        return Err(invalid(
            "request_timeout_secs must be greater than 0",
            format!(
                "Remove the field to use the default of {} seconds",
                DEFAULT_REQUEST_TIMEOUT_SECS
            ),
        ));
    }
    for (field, value) in [
        ("state_path", &config.state_path),
        ("probe_path", &config.probe_path),
    ] {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            return Err(invalid(
                format!("{} must not be empty", field),
                "Use a path on the producer such as \"/api/state\"",
            ));
        }
    }
    Ok(())
}

fn invalid(message: impl Into<String>, hint: impl Into<String>) -> anyhow::Error {
    DashError::InvalidConfig {
        message: message.into(),
        hint: hint.into(),
    }
    .into()
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
