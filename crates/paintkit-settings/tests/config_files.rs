//! Configuration file round trips.

use paintkit_core::{Algorithm, CircleAlgorithm, Color, LineAlgorithm};
use paintkit_settings::{EraseMode, PaintConfig, SettingsError, ToolSwitchPolicy};
use tempfile::tempdir;

fn customised() -> PaintConfig {
    let mut config = PaintConfig::default();
    config.canvas.width = 1024;
    config.tools.color = Color::rgb(0x12, 0x34, 0x56);
    config.tools.algorithm = Algorithm::Primitive;
    config.tools.tool_switch = ToolSwitchPolicy::KeepInProgress;
    config.raster.line = LineAlgorithm::Dda;
    config.raster.circle = CircleAlgorithm::Midpoint;
    config.remote.enabled = true;
    config.remote.erase_mode = EraseMode::Remote;
    config.remote.csrf_token = Some("token".to_string());
    config
}

#[test]
fn test_toml_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("paintkit.toml");
    let config = customised();

    config.save_to_file(&path).unwrap();
    let loaded = PaintConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_json_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("paintkit.json");
    let config = customised();

    config.save_to_file(&path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"#123456\""));
    assert!(text.contains("\"cancel_in_progress\"") || text.contains("\"keep_in_progress\""));

    let loaded = PaintConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_load_rejects_invalid_values() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, r#"{"tools": {"stroke_width": -1.0}}"#).unwrap();

    let err = PaintConfig::load_from_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::InvalidSetting { .. }));
}

#[test]
fn test_load_or_default_falls_back() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.toml");
    assert_eq!(PaintConfig::load_or_default(&missing), PaintConfig::default());

    let broken = dir.path().join("broken.toml");
    std::fs::write(&broken, "this is = = not toml").unwrap();
    assert_eq!(PaintConfig::load_or_default(&broken), PaintConfig::default());
}

#[test]
fn test_load_missing_file_is_load_error() {
    let dir = tempdir().unwrap();
    let err = PaintConfig::load_from_file(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, SettingsError::LoadError(_)));
}
