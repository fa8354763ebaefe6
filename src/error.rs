use thiserror::Error;

/// Failure reported by an external search collaborator
///
/// Forwarded to the caller unmodified; nothing in this crate retries or
/// reinterprets it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("Autocomplete request failed: {0}")]
    Autocomplete(String),

    #[error("Entity preview request failed: {0}")]
    Preview(String),

    #[error("Query execution failed: {0}")]
    Execution(String),

    /// The dispatch task ended before reporting a result
    #[error("Dispatch task aborted")]
    Aborted,
}

/// Outcome of a failed location lookup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Location unavailable: {0}")]
    Unavailable(String),

    #[error("Location lookup timed out after {0}ms")]
    Timeout(u64),
}

/// Errors raised while reading configuration or persisted state
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML in {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Failed to serialize: {0}")]
    Serialize(String),
}

/// Crate-level error type
#[derive(Debug, Error)]
pub enum SearchBarError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid corpus JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Search(#[from] SearchError),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
