//! Configuration management.

use crate::error::{PassthruError, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming the management service endpoint.
pub const ENV_URL: &str = "PTCTL_URL";

/// Environment variable naming the default target host.
pub const ENV_HOST: &str = "PTCTL_HOST";

/// Environment variable pointing at an alternative config file.
pub const ENV_CONFIG: &str = "PTCTL_CONFIG";

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// gRPC endpoint of the management service (e.g. "http://vc.lab:50051").
    /// When unset, `socket_path` is used.
    pub endpoint: Option<String>,
    pub socket_path: String,
    /// Host used when a command is not given one
    pub default_host: Option<String>,
    pub connect_timeout_secs: u64,
    /// Per-call deadline. 0 disables it.
    pub request_timeout_secs: u64,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: None,
            socket_path: paths::default_socket_path().to_string_lossy().to_string(),
            default_host: None,
            connect_timeout_secs: 10,
            request_timeout_secs: 60,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        std::env::var_os(ENV_CONFIG).map(PathBuf::from).unwrap_or_else(paths::config_file)
    }

    /// Load configuration from disk, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| PassthruError::IoError { path: path.to_path_buf(), source: e })?;
        serde_json::from_str(&content).map_err(|e| PassthruError::InvalidConfig {
            reason: format!("Failed to parse config {}: {}", path.display(), e),
        })
    }

    /// Override fields from environment variables looked up through `var`.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var(ENV_URL).filter(|v| !v.is_empty()) {
            self.endpoint = Some(url);
        }
        if let Some(host) = var(ENV_HOST).filter(|v| !v.is_empty()) {
            self.default_host = Some(host);
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}
