//! Integration-level unit tests for the SettingsEngine public API.
//!
//! These tests exercise the SettingsEngine through its public trait interface,
//! validating default loading, value persistence, validation and reset.

use serde_json::json;
use tabspace::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use tabspace::types::errors::SettingsError;
use tabspace::types::settings::{NewTabPosition, TabSettings};
use tempfile::TempDir;

/// Helper: create a SettingsEngine backed by a temp directory that lives for the
/// duration of the test (the caller holds the `TempDir` handle).
fn engine_in_temp(dir: &TempDir) -> SettingsEngine {
    let path = dir
        .path()
        .join("settings.json")
        .to_string_lossy()
        .to_string();
    SettingsEngine::new(Some(path))
}

#[test]
fn test_load_defaults_when_no_config_file_exists() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    let settings = engine.load().unwrap();

    assert_eq!(settings, TabSettings::default());
    assert!(settings.drag.tree_style_tabs);
    assert_eq!(settings.drag.drop_leading_fraction, 0.5);
    assert_eq!(settings.tabs.new_tab_position, NewTabPosition::Bottom);
    assert!(settings.session.restore_on_launch);
}

#[test]
fn test_set_value_persists_across_instances() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();

    engine.set_value("drag.tree_style_tabs", json!(false)).unwrap();
    engine.set_value("tabs.new_tab_position", json!("top")).unwrap();
    engine
        .set_value("tabs.new_tab_url", json!("https://start.example"))
        .unwrap();

    let mut reloaded = engine_in_temp(&dir);
    let settings = reloaded.load().unwrap();
    assert!(!settings.drag.tree_style_tabs);
    assert_eq!(settings.tabs.new_tab_position, NewTabPosition::Top);
    assert_eq!(settings.tabs.new_tab_url, "https://start.example");
}

#[test]
fn test_set_value_rejects_unknown_keys() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    for key in ["", "drag.unknown", "nope.tree_style_tabs", "drag.tree_style_tabs.deeper"] {
        let err = engine.set_value(key, json!(true)).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidKey(_)), "key {:?}", key);
    }
    assert_eq!(engine.get_settings(), &TabSettings::default());
}

#[test]
fn test_set_value_rejects_wrong_types() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    let err = engine.set_value("drag.tree_style_tabs", json!("yes")).unwrap_err();
    assert!(matches!(err, SettingsError::InvalidValue(_)));
    let err = engine.set_value("tabs.new_tab_position", json!("middle")).unwrap_err();
    assert!(matches!(err, SettingsError::InvalidValue(_)));
    assert!(!dir.path().join("settings.json").exists(), "rejected values are not saved");
}

#[test]
fn test_leading_fraction_must_be_a_fraction() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    engine.set_value("drag.drop_leading_fraction", json!(0.25)).unwrap();
    assert_eq!(engine.get_settings().drag.drop_leading_fraction, 0.25);

    let err = engine
        .set_value("drag.drop_leading_fraction", json!(1.5))
        .unwrap_err();
    assert!(matches!(err, SettingsError::InvalidValue(_)));
    assert_eq!(engine.get_settings().drag.drop_leading_fraction, 0.25);
}

#[test]
fn test_reset_restores_defaults_on_disk() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.set_value("session.restore_on_launch", json!(false)).unwrap();

    engine.reset().unwrap();

    assert_eq!(engine.get_settings(), &TabSettings::default());
    let mut reloaded = engine_in_temp(&dir);
    assert_eq!(reloaded.load().unwrap(), TabSettings::default());
}

#[test]
fn test_missing_sections_fall_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(
        &path,
        r#"{"drag": {"tree_style_tabs": false, "drop_leading_fraction": 0.3}}"#,
    )
    .unwrap();
    let mut engine = engine_in_temp(&dir);

    let settings = engine.load().unwrap();

    assert!(!settings.drag.tree_style_tabs);
    assert_eq!(settings.tabs, Default::default());
    assert!(settings.session.restore_on_launch);
}

#[test]
fn test_malformed_file_is_a_serialization_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("settings.json"), "{not json").unwrap();
    let mut engine = engine_in_temp(&dir);

    let err = engine.load().unwrap_err();
    assert!(matches!(err, SettingsError::Serialization(_)));
}

#[test]
fn test_out_of_range_fraction_on_disk_is_rejected() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("settings.json"),
        r#"{"drag": {"tree_style_tabs": true, "drop_leading_fraction": 1.5}}"#,
    )
    .unwrap();
    let mut engine = engine_in_temp(&dir);

    let err = engine.load().unwrap_err();

    assert!(matches!(err, SettingsError::InvalidValue(_)));
    assert_eq!(engine.get_settings(), &TabSettings::default());
}

#[test]
fn test_save_creates_missing_directories() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("a").join("b").join("settings.json");
    let engine = SettingsEngine::new(Some(nested.to_string_lossy().to_string()));

    engine.save().unwrap();

    assert!(nested.exists());
    assert_eq!(engine.get_config_path(), nested.to_string_lossy());
}
