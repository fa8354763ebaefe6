//! Tests for config loading

use super::*;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_missing_file_uses_defaults_without_warning() {
    let dir = tempfile::TempDir::new().unwrap();
    let result = load_config_from_path(&dir.path().join("config.toml"));
    assert!(result.warning.is_none());
    assert_eq!(result.config.recent_searches_limit, 5);
}

#[test]
fn test_valid_file_loads() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "recent_searches_limit = 8").unwrap();

    let result = load_config_from_path(file.path());
    assert!(result.warning.is_none());
    assert_eq!(result.config.recent_searches_limit, 8);
}

#[test]
fn test_malformed_file_warns_and_uses_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "recent_searches_limit = \"many\"").unwrap();

    let result = load_config_from_path(file.path());
    let warning = result.warning.expect("expected a warning");
    assert!(warning.contains("Using defaults"));
    assert_eq!(result.config.recent_searches_limit, 5);
}

#[test]
fn test_read_config_reports_parse_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[geolocation").unwrap();

    let err = read_config(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}
