// Configuration type definitions

use std::collections::HashMap;

use serde::Deserialize;

use crate::history::DEFAULT_RECENT_SEARCHES_LIMIT;

/// Default time allowed for a near-me location lookup
pub const DEFAULT_GEOLOCATION_TIMEOUT_MS: u64 = 1000;

/// Default delay before entity previews are fetched
pub const DEFAULT_PREVIEW_DEBOUNCE_MS: u64 = 500;

/// How class overrides combine with the built-in classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CssCompositionMethod {
    #[default]
    Merge,
    Replace,
    Assign,
}

/// Options passed to the geolocation provider
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeolocationOptions {
    #[serde(default)]
    pub enable_high_accuracy: bool,
    #[serde(default = "default_geolocation_timeout_ms")]
    pub timeout_ms: u64,
    /// Accept a cached position this old; `None` means any age
    #[serde(default)]
    pub maximum_age_ms: Option<u64>,
}

fn default_geolocation_timeout_ms() -> u64 {
    DEFAULT_GEOLOCATION_TIMEOUT_MS
}

impl Default for GeolocationOptions {
    fn default() -> Self {
        GeolocationOptions {
            enable_high_accuracy: false,
            timeout_ms: DEFAULT_GEOLOCATION_TIMEOUT_MS,
            maximum_age_ms: None,
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct SearchBarConfig {
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub geolocation: GeolocationOptions,
    /// Opaque to this crate; handed to the renderer
    #[serde(default)]
    pub class_overrides: HashMap<String, String>,
    #[serde(default)]
    pub css_composition_method: CssCompositionMethod,
    #[serde(default = "default_preview_debounce_ms")]
    pub entity_preview_debounce_ms: u64,
    #[serde(default)]
    pub hide_vertical_links: bool,
    /// Vertical key to display label
    #[serde(default)]
    pub vertical_labels: HashMap<String, String>,
    #[serde(default)]
    pub hide_recent_searches: bool,
    #[serde(default = "default_recent_searches_limit")]
    pub recent_searches_limit: usize,
    #[serde(default)]
    pub persist_recent_searches: bool,
    /// Cancel superseded autocomplete/preview tasks instead of discarding
    /// their results on arrival
    #[serde(default)]
    pub abort_superseded_requests: bool,
}

fn default_preview_debounce_ms() -> u64 {
    DEFAULT_PREVIEW_DEBOUNCE_MS
}

fn default_recent_searches_limit() -> usize {
    DEFAULT_RECENT_SEARCHES_LIMIT
}

impl Default for SearchBarConfig {
    fn default() -> Self {
        SearchBarConfig {
            placeholder: None,
            geolocation: GeolocationOptions::default(),
            class_overrides: HashMap::new(),
            css_composition_method: CssCompositionMethod::default(),
            entity_preview_debounce_ms: DEFAULT_PREVIEW_DEBOUNCE_MS,
            hide_vertical_links: false,
            vertical_labels: HashMap::new(),
            hide_recent_searches: false,
            recent_searches_limit: DEFAULT_RECENT_SEARCHES_LIMIT,
            persist_recent_searches: false,
            abort_superseded_requests: false,
        }
    }
}

impl SearchBarConfig {
    /// Label for a vertical key, falling back to the key itself
    pub fn vertical_label(&self, key: &str) -> String {
        self.vertical_labels
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}
