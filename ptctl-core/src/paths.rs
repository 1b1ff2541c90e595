//! Centralized path configuration for ptctl.
//!
//! The CLI keeps no state; these are only the places it reads configuration
//! from and the default management service socket.

use std::path::PathBuf;

/// Environment variable overriding the config directory.
pub const ENV_CONFIG_DIR: &str = "PTCTL_CONFIG_DIR";

/// Get the ptctl config directory.
///
/// Resolution order:
/// 1. `PTCTL_CONFIG_DIR` environment variable
/// 2. `$XDG_CONFIG_HOME/ptctl` (or the platform equivalent)
/// 3. `~/.ptctl`
pub fn config_dir() -> PathBuf {
    config_dir_with(|key| std::env::var(key).ok())
}

/// [`config_dir`] with environment variables looked up through `var`.
pub fn config_dir_with(var: impl Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(dir) = var(ENV_CONFIG_DIR).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }

    if let Some(dir) = dirs::config_dir() {
        return dir.join("ptctl");
    }

    dirs::home_dir().map(|h| h.join(".ptctl")).unwrap_or_else(|| PathBuf::from(".ptctl"))
}

/// Get the config file path.
pub fn config_file() -> PathBuf {
    config_dir().join("config.json")
}

/// Default Unix socket of a management service proxy on this machine.
pub fn default_socket_path() -> PathBuf {
    dirs::runtime_dir()
        .map(|d| d.join("ptctl").join("management.sock"))
        .unwrap_or_else(|| PathBuf::from("/tmp/ptctl-management.sock"))
}
