//! Unit tests for the settings engine.

use std::fs;

use jobflow::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use jobflow::types::errors::SettingsError;
use jobflow::types::settings::{ClientSettings, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE};
use serde_json::json;
use tempfile::TempDir;

fn temp_engine() -> (TempDir, SettingsEngine) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json").to_string_lossy().to_string();
    let mut engine = SettingsEngine::new(Some(path));
    engine.load().unwrap();
    (dir, engine)
}

#[test]
fn test_load_defaults_when_no_file() {
    let (_dir, engine) = temp_engine();
    assert_eq!(*engine.get_settings(), ClientSettings::default());
}

#[test]
fn test_default_values() {
    let defaults = ClientSettings::default();
    assert_eq!(defaults.api.base_url, DEFAULT_BASE_URL);
    assert_eq!(defaults.api.base_url, "http://localhost:4000");
    assert_eq!(defaults.api.page_size, DEFAULT_PAGE_SIZE);
    assert_eq!(defaults.api.page_size, 12);
    assert_eq!(defaults.storage.database_path, None);
    assert_eq!(defaults.logging.filter, "jobflow=info");
}

#[test]
fn test_set_value_persists_to_disk() {
    let (_dir, mut engine) = temp_engine();
    engine
        .set_value("api.base_url", json!("https://board.example"))
        .unwrap();

    let mut reloaded = SettingsEngine::new(Some(engine.get_config_path().to_string()));
    let loaded = reloaded.load().unwrap();
    assert_eq!(loaded.api.base_url, "https://board.example");
}

#[test]
fn test_get_value_by_dot_path() {
    let (_dir, mut engine) = temp_engine();
    engine.set_value("api.page_size", json!(24)).unwrap();
    assert_eq!(engine.get_value("api.page_size").unwrap(), json!(24));
    assert_eq!(engine.get_value("logging").unwrap(), json!({"filter": "jobflow=info"}));
    assert!(matches!(
        engine.get_value("api.timeout"),
        Err(SettingsError::InvalidKey(_))
    ));
}

#[test]
fn test_set_value_rejects_unknown_and_empty_keys() {
    let (_dir, mut engine) = temp_engine();
    assert!(matches!(
        engine.set_value("nonexistent.key", json!(true)),
        Err(SettingsError::InvalidKey(_))
    ));
    assert!(matches!(
        engine.set_value("api.retries", json!(3)),
        Err(SettingsError::InvalidKey(_))
    ));
    assert!(matches!(
        engine.set_value("", json!(true)),
        Err(SettingsError::InvalidKey(_))
    ));
}

#[test]
fn test_set_value_rejects_wrong_type_and_leaves_settings_alone() {
    let (_dir, mut engine) = temp_engine();
    let result = engine.set_value("api.page_size", json!("twelve"));
    assert!(matches!(result, Err(SettingsError::InvalidValue(_))));
    assert_eq!(engine.get_settings().api.page_size, 12);
}

#[test]
fn test_set_value_runs_validation() {
    let (_dir, mut engine) = temp_engine();
    assert!(matches!(
        engine.set_value("api.page_size", json!(0)),
        Err(SettingsError::InvalidValue(_))
    ));
    assert!(matches!(
        engine.set_value("api.base_url", json!("not a url")),
        Err(SettingsError::InvalidValue(_))
    ));
    assert_eq!(*engine.get_settings(), ClientSettings::default());
}

#[test]
fn test_set_optional_database_path() {
    let (dir, mut engine) = temp_engine();
    let db_path = dir.path().join("state.db").to_string_lossy().to_string();
    engine
        .set_value("storage.database_path", json!(db_path.clone()))
        .unwrap();
    assert_eq!(engine.database_path(), std::path::PathBuf::from(db_path));
}

#[test]
fn test_reset_restores_defaults() {
    let (_dir, mut engine) = temp_engine();
    engine.set_value("logging.filter", json!("jobflow=debug")).unwrap();
    engine.reset().unwrap();
    assert_eq!(*engine.get_settings(), ClientSettings::default());
}

#[test]
fn test_partial_file_fills_in_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"api": {"page_size": 30}}"#).unwrap();

    let mut engine = SettingsEngine::new(Some(path.to_string_lossy().to_string()));
    let loaded = engine.load().unwrap();
    assert_eq!(loaded.api.page_size, 30);
    assert_eq!(loaded.api.base_url, DEFAULT_BASE_URL);
    assert_eq!(loaded.logging.filter, "jobflow=info");
}

#[test]
fn test_load_malformed_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ invalid json }").unwrap();

    let mut engine = SettingsEngine::new(Some(path.to_string_lossy().to_string()));
    assert!(matches!(
        engine.load(),
        Err(SettingsError::SerializationError(_))
    ));
}

#[test]
fn test_default_config_path_uses_platform() {
    let engine = SettingsEngine::new(None);
    let path = engine.get_config_path().to_lowercase();
    assert!(path.ends_with("settings.json"));
    assert!(path.contains("jobflow"));
}
