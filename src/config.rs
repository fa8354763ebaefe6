//! Configuration loading
//!
//! Reads `~/.config/searchbar/config.toml`. A missing file yields defaults;
//! a malformed one yields defaults plus a warning for the caller to surface.

mod types;

use std::fs;
use std::path::{Path, PathBuf};

pub use types::{
    CssCompositionMethod, DEFAULT_GEOLOCATION_TIMEOUT_MS, DEFAULT_PREVIEW_DEBOUNCE_MS,
    GeolocationOptions, SearchBarConfig,
};

use crate::error::ConfigError;

const CONFIG_DIR: &str = "searchbar";
const CONFIG_FILE: &str = "config.toml";

/// Loaded configuration and any problem found while loading it
#[derive(Debug)]
pub struct ConfigResult {
    pub config: SearchBarConfig,
    pub warning: Option<String>,
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config").join(CONFIG_DIR).join(CONFIG_FILE))
}

pub fn load_config() -> ConfigResult {
    match config_path() {
        Some(path) => load_config_from_path(&path),
        None => ConfigResult {
            config: SearchBarConfig::default(),
            warning: None,
        },
    }
}

pub fn load_config_from_path(path: &Path) -> ConfigResult {
    if !path.exists() {
        return ConfigResult {
            config: SearchBarConfig::default(),
            warning: None,
        };
    }

    match read_config(path) {
        Ok(config) => ConfigResult {
            config,
            warning: None,
        },
        Err(e) => {
            log::warn!("{}", e);
            ConfigResult {
                config: SearchBarConfig::default(),
                warning: Some(format!("Config error: {}. Using defaults.", e)),
            }
        }
    }
}

/// Strict variant: any read or parse failure is an error
pub fn read_config(path: &Path) -> Result<SearchBarConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    toml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
