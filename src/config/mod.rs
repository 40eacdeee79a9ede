//! Configuration management for the YAVIQ client
//!
//! Supports configuration via:
//! 1. Config file (~/.config/yaviq/config.toml)
//! 2. Environment variables (YAVIQ_API_KEY, YAVIQ_ENDPOINT)
//! 3. Explicit arguments (override file/env settings)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Base URL used when nothing else is configured
pub const DEFAULT_ENDPOINT: &str = "https://api.yaviq.local";

/// Environment variable holding the API key (library only)
pub const API_KEY_ENV: &str = "YAVIQ_API_KEY";

/// Environment variable holding the endpoint
pub const ENDPOINT_ENV: &str = "YAVIQ_ENDPOINT";

/// Legacy endpoint variable, honoured by the CLI when `YAVIQ_ENDPOINT` is unset
pub const LEGACY_ENDPOINT_ENV: &str = "TOKENOPT_ENDPOINT";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API key (can also use YAVIQ_API_KEY env var)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL of the optimization service
    pub endpoint: String,

    /// Default optimization mode
    pub mode: String,

    /// Default input format hint
    pub format: String,

    /// Log per-call savings
    pub telemetry: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            mode: "balanced".to_string(),
            format: "auto".to_string(),
            telemetry: false,
        }
    }
}

impl Config {
    /// Get default config file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("yaviq")
            .join("config.toml")
    }

    /// Load config from default location
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::default_path())
    }

    /// Load config from specific path, then apply environment overrides
    pub fn load_from(path: PathBuf) -> Result<Self, ConfigError> {
        Ok(Self::read_file(path)?.with_env_overrides())
    }

    /// Load config from specific path without consulting the environment
    pub fn read_file(path: PathBuf) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Like [`Config::read_file`], but an unreadable or malformed file only
    /// logs a warning and yields the defaults
    pub fn read_file_or_default(path: PathBuf) -> Self {
        match Self::read_file(path.clone()) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring config file");
                Self::default()
            }
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(url) = lookup(ENDPOINT_ENV).filter(|u| !u.is_empty()) {
            self.endpoint = url;
        }

        self
    }

    /// Endpoint as the CLI resolves it: explicit flag, then `YAVIQ_ENDPOINT`,
    /// then `TOKENOPT_ENDPOINT`, then the config file value.
    pub fn cli_endpoint<F>(&self, flag: Option<&str>, lookup: F) -> String
    where
        F: Fn(&str) -> Option<String>,
    {
        flag.map(str::to_string)
            .or_else(|| lookup(ENDPOINT_ENV).filter(|u| !u.is_empty()))
            .or_else(|| lookup(LEGACY_ENDPOINT_ENV).filter(|u| !u.is_empty()))
            .unwrap_or_else(|| self.endpoint.clone())
    }
}

/// Builder for creating Config programmatically
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }

    pub fn mode(mut self, mode: impl Into<String>) -> Self {
        self.config.mode = mode.into();
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.config.format = format.into();
        self
    }

    pub fn telemetry(mut self, enabled: bool) -> Self {
        self.config.telemetry = enabled;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
