//! Runtime configuration.
//!
//! Values come from built-in defaults, then an optional TOML file, then
//! command-line flags and the environment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::cli::Args;
use crate::error::ConfigError;

/// Public sample key of the Seoul open API (limited to a handful of rows)
pub const SAMPLE_API_KEY: &str = "sample";

pub const DEFAULT_ENDPOINT: &str = "http://swopenapi.seoul.go.kr/api/subway";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api_key: String,
    /// Feed base URLs, tried in order
    pub endpoints: Vec<String>,
    pub poll_interval_secs: u64,
    pub alert_period_ms: u64,
    pub request_timeout_secs: u64,
    pub arrival_rows: u32,
    pub position_rows: u32,
    /// Replacement line directory (JSON)
    pub stations_file: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: SAMPLE_API_KEY.to_string(),
            endpoints: vec![DEFAULT_ENDPOINT.to_string()],
            poll_interval_secs: 15,
            alert_period_ms: 1500,
            request_timeout_secs: 10,
            arrival_rows: 20,
            position_rows: 50,
            stations_file: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Default config file location: `<config_dir>/subway-waker/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("subway-waker").join("config.toml"))
    }

    /// Load from an explicit path (which must exist) or the default
    /// location (which may be absent).
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply command-line flags on top of file values
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(ref key) = args.api_key {
            self.api_key = key.clone();
        }
        if let Some(secs) = args.poll_interval {
            self.poll_interval_secs = secs;
        }
        if let Some(ms) = args.alert_period {
            self.alert_period_ms = ms;
        }
        if let Some(ref path) = args.stations {
            self.stations_file = Some(path.clone());
        }
        if let Some(ref path) = args.log_file {
            self.log_file = Some(path.clone());
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "poll_interval_secs must be at least 1".to_string(),
            ));
        }
        if self.alert_period_ms == 0 {
            return Err(ConfigError::Invalid(
                "alert_period_ms must be at least 1".to_string(),
            ));
        }
        if self.endpoints.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one endpoint is required".to_string(),
            ));
        }
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::Invalid("api_key is empty".to_string()));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn alert_period(&self) -> Duration {
        Duration::from_millis(self.alert_period_ms)
    }
}
