//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.bookworm/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BookwormConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Child profile id to run as (the sign-in flow lives outside this client).
    pub child_id: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChatConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StoreConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_CHAT_BASE_URL: &str = "http://localhost:8787/api";
pub const DEFAULT_STORE_BASE_URL: &str = "http://localhost:54321/rest/v1";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub chat_base_url: String,
    pub store_base_url: String,
    pub store_api_key: Option<String>,
    pub child_id: Option<String>,
    pub offline: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.bookworm/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".bookworm").join("config.toml"))
}

/// Load config from `~/.bookworm/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `BookwormConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<BookwormConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(BookwormConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(BookwormConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: BookwormConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Bookworm Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# child_id = "child-uuid"             # Or set BOOKWORM_CHILD / pass --child

# [chat]
# base_url = "http://localhost:8787/api"   # Recommendation bot service

# [store]
# base_url = "http://localhost:54321/rest/v1"   # Tabular data store
# api_key = "..."                     # Or set BOOKWORM_STORE_KEY env var
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_child` is from the `--child` flag (None = not specified).
pub fn resolve(config: &BookwormConfig, cli_child: Option<&str>, offline: bool) -> ResolvedConfig {
    // Chat base URL: env → config → default
    let chat_base_url = std::env::var("BOOKWORM_CHAT_URL")
        .ok()
        .or_else(|| config.chat.base_url.clone())
        .unwrap_or_else(|| DEFAULT_CHAT_BASE_URL.to_string());

    // Store base URL: env → config → default
    let store_base_url = std::env::var("BOOKWORM_STORE_URL")
        .ok()
        .or_else(|| config.store.base_url.clone())
        .unwrap_or_else(|| DEFAULT_STORE_BASE_URL.to_string());

    // Store API key: env → config
    let store_api_key = std::env::var("BOOKWORM_STORE_KEY")
        .ok()
        .or_else(|| config.store.api_key.clone());

    // Child profile: CLI → env → config
    let child_id = cli_child
        .map(|s| s.to_string())
        .or_else(|| std::env::var("BOOKWORM_CHILD").ok())
        .or_else(|| config.general.child_id.clone());

    ResolvedConfig {
        chat_base_url,
        store_base_url,
        store_api_key,
        child_id,
        offline,
    }
}
