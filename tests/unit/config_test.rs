//! Tests for configuration loading

use std::fs;
use std::time::Duration;

use docreview::api::ApiRevision;
use docreview::config::{AppConfig, ConfigError};
use docreview::router::GuardMode;
use tempfile::TempDir;

#[test]
fn test_config_default() {
    let config = AppConfig::default();
    assert_eq!(config.api.base_url, "http://localhost:5000/api");
    assert_eq!(config.api.timeout_secs, 30);
    assert_eq!(config.api.revision, ApiRevision::Current);
    assert_eq!(config.router.guard, GuardMode::Store);
    assert!(!config.router.dev_mode);
}

#[test]
fn test_missing_file_gives_defaults() {
    let temp = TempDir::new().unwrap();
    let config = AppConfig::load_from(&temp.path().join("absent.toml")).unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(
        &path,
        r#"
[api]
base_url = "https://review.internal/api"
revision = "legacy"

[router]
dev_mode = true
"#,
    )
    .unwrap();

    let config = AppConfig::load_from(&path).unwrap();
    assert_eq!(config.api.base_url, "https://review.internal/api");
    assert_eq!(config.api.timeout_secs, 30);
    assert_eq!(config.api.revision, ApiRevision::Legacy);
    assert!(config.router.dev_mode);
    assert_eq!(config.router.guard, GuardMode::Store);
}

#[test]
fn test_invalid_toml_is_an_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "[api\nbase_url =").unwrap();

    let err = AppConfig::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_invalid_revision_is_an_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "[api]\nrevision = \"v9\"\n").unwrap();

    assert!(AppConfig::load_from(&path).is_err());
}

#[test]
fn test_non_http_base_url_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "[api]\nbase_url = \"localhost:5000\"\n").unwrap();

    let err = AppConfig::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("api.base_url"));
}

#[test]
fn test_save_and_load() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested/config.toml");

    let mut config = AppConfig::default();
    config.api.timeout_secs = 12;
    config.router.guard = GuardMode::Params;
    config.save_to(&path).unwrap();

    let loaded = AppConfig::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_api_config_and_router() {
    let mut config = AppConfig::default();
    config.api.timeout_secs = 3;
    config.router.dev_mode = true;

    let api = config.api_config();
    assert_eq!(api.timeout, Duration::from_secs(3));
    assert_eq!(api.base_url, config.api.base_url);

    let router = config.router();
    assert!(router.dev_mode());
    assert_eq!(router.guard(), GuardMode::Store);
}
