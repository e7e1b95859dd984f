//! Configuration file discovery and loading.

use crate::config::schema::ProbeConfig;
use crate::error::{ProbeError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Find the user's config at `~/.config/platform-probe/config.yml`.
pub fn find_user_config() -> Option<PathBuf> {
    let path = dirs::home_dir()?
        .join(".config")
        .join("platform-probe")
        .join("config.yml");
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `Io` if the file cannot be read.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ProbeConfig> {
    let content = fs::read_to_string(path)?;
    parse_config(&content, path)
}

/// Parse YAML content into a [`ProbeConfig`].
///
/// An empty document yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<ProbeConfig> {
    if content.trim().is_empty() {
        return Ok(ProbeConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| ProbeError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load configuration.
///
/// Uses `explicit` when given (it must exist), else the user config if
/// present, else the defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<ProbeConfig> {
    if let Some(path) = explicit {
        tracing::debug!("Loading config from {}", path.display());
        return load_config_file(path);
    }
    match find_user_config() {
        Some(path) => {
            tracing::debug!("Loading user config from {}", path.display());
            load_config_file(&path)
        }
        None => {
            tracing::debug!("No config file found, using defaults");
            Ok(ProbeConfig::default())
        }
    }
}
