// Configuration loading and parsing (config/drafter.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

/// Application configuration, assembled from `config/drafter.toml` or from
/// built-in defaults when the file is absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub draft: DraftConfig,
    pub log: LogConfig,
}

/// The draft authority / roster source endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the backend's REST surface.
    pub base_url: String,
}

/// Team composition constants for the panel slots. These are display
/// configuration only; the authority owns the actual draft sequencing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DraftConfig {
    pub pick_slots: usize,
    pub ban_slots: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Directory for the log file; the terminal itself belongs to the TUI.
    pub dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            base_url: "http://localhost:8080/api".to_string(),
        }
    }
}

impl Default for DraftConfig {
    fn default() -> Self {
        DraftConfig {
            pick_slots: 5,
            ban_slots: 2,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            dir: "logs".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig::default(),
            draft: DraftConfig::default(),
            log: LogConfig::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load configuration from `config/drafter.toml` relative to `base_dir`.
///
/// A missing file is not an error: the defaults target a local backend.
/// A present-but-malformed file is an error, so typos don't silently fall
/// back to defaults.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join("drafter.toml");

    let config = if path.exists() {
        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadError {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::ParseError {
            path: path.clone(),
            source,
        })?
    } else {
        Config::default()
    };

    validate(&config)?;
    Ok(config)
}

/// Load configuration from the current working directory.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|source| ConfigError::ReadError {
        path: PathBuf::from("."),
        source,
    })?;
    load_config_from(&cwd)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if !config.server.base_url.starts_with("http://")
        && !config.server.base_url.starts_with("https://")
    {
        return Err(ConfigError::ValidationError {
            field: "server.base_url".to_string(),
            message: format!("expected an http(s) URL, got `{}`", config.server.base_url),
        });
    }
    if config.draft.pick_slots == 0 {
        return Err(ConfigError::ValidationError {
            field: "draft.pick_slots".to_string(),
            message: "must be at least 1".to_string(),
        });
    }
    if config.draft.ban_slots == 0 {
        return Err(ConfigError::ValidationError {
            field: "draft.ban_slots".to_string(),
            message: "must be at least 1".to_string(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
