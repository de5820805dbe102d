use crate::format::ColorChoice;
use libtagalias::{Result, TagAliasError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable pointing at an alternate config file
pub const ENV_CONFIG: &str = "TAGALIAS_CONFIG";

/// Optional settings read from `config.toml`.
///
/// Every field is optional; unset fields fall through to environment
/// variables and built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Registry API base URL, including the `/v2` prefix
    pub registry_url: Option<String>,
    /// Token service base URL
    pub auth_url: Option<String>,
    /// Service name tokens are requested for
    pub service: Option<String>,
    /// Maximum number of candidate tags to resolve
    pub limit: Option<u64>,
    /// Substring candidate tags must contain
    pub filter: Option<String>,
    /// Pause between digest requests in milliseconds
    pub request_delay_ms: Option<u64>,
    /// HTTP request timeout in seconds
    pub timeout_seconds: Option<u64>,
    /// Color output control: auto, always, never
    pub color: Option<ColorChoice>,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            TagAliasError::config_with_source(
                format!("Failed to read config file {}", path.display()),
                e,
            )
        })?;

        toml::from_str(&contents).map_err(|e| {
            TagAliasError::config_with_source(
                format!("Failed to parse config file {}", path.display()),
                e,
            )
        })
    }

    /// Load configuration from a file if it exists
    ///
    /// A missing file is not an error; an unreadable or malformed one is.
    pub fn load_optional(path: &Path) -> Result<Option<Self>> {
        if path.exists() {
            Self::load(path).map(Some)
        } else {
            Ok(None)
        }
    }
}

/// Get the config file path, respecting the TAGALIAS_CONFIG environment variable
pub fn get_config_path(env: &dyn Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(config_path) = env(ENV_CONFIG) {
        return PathBuf::from(config_path);
    }

    // Default to ~/.config/tagalias/config.toml
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("tagalias").join("config.toml")
    } else {
        PathBuf::from("config.toml")
    }
}
