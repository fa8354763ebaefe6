use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::recent_store::RecentSearchEntry;
use crate::error::ConfigError;

const CONFIG_DIR: &str = "searchbar";
const RECENT_SEARCHES_FILE: &str = "recent_searches.toml";

#[derive(Debug, Default, Serialize, Deserialize)]
struct RecentSearchesFile {
    #[serde(default)]
    recent: Vec<RecentSearchEntry>,
}

pub fn recent_searches_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| {
        p.join(".config")
            .join(CONFIG_DIR)
            .join(RECENT_SEARCHES_FILE)
    })
}

pub fn load_recent_searches() -> Vec<RecentSearchEntry> {
    let Some(path) = recent_searches_path() else {
        return Vec::new();
    };

    load_recent_searches_from_path(&path)
}

/// Missing or unreadable files load as an empty history
pub fn load_recent_searches_from_path(path: &Path) -> Vec<RecentSearchEntry> {
    match fs::read_to_string(path) {
        Ok(contents) => parse_recent_searches_toml(&contents),
        Err(_) => Vec::new(),
    }
}

pub fn parse_recent_searches_toml(content: &str) -> Vec<RecentSearchEntry> {
    match toml::from_str::<RecentSearchesFile>(content) {
        Ok(file) => file.recent,
        Err(e) => {
            log::warn!("Ignoring malformed recent searches file: {}", e);
            Vec::new()
        }
    }
}

pub fn save_recent_searches(entries: &[RecentSearchEntry]) -> Result<(), ConfigError> {
    let Some(path) = recent_searches_path() else {
        return Ok(());
    };

    save_recent_searches_to_path(&path, entries)
}

pub fn save_recent_searches_to_path(
    path: &Path,
    entries: &[RecentSearchEntry],
) -> Result<(), ConfigError> {
    let file = RecentSearchesFile {
        recent: entries.to_vec(),
    };
    let contents =
        toml::to_string_pretty(&file).map_err(|e| ConfigError::Serialize(e.to_string()))?;

    let write_error = |source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, contents).map_err(write_error)
}

#[cfg(test)]
#[path = "storage_tests.rs"]
mod storage_tests;
