//! Application configuration for dexterm.
//!
//! User config lives at `~/.dexterm/dexterm.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DextermError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "dexterm.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".dexterm";

// ---------------------------------------------------------------------------
// Config structs (matching dexterm.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Upstream API settings.
    #[serde(default)]
    pub api: ApiConfig,
}

/// `[api]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Collection endpoint the roster is listed from.
    #[serde(default = "default_listing_endpoint")]
    pub listing_endpoint: String,

    /// Optional per-request timeout in seconds. Unset means no timeout:
    /// a hung request hangs the pipeline and the loading indicator never
    /// resolves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            listing_endpoint: default_listing_endpoint(),
            timeout_secs: None,
        }
    }
}

fn default_listing_endpoint() -> String {
    "https://pokeapi.co/api/v2/pokemon".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.dexterm/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| DextermError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.dexterm/dexterm.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| DextermError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| DextermError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| DextermError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| DextermError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| DextermError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
