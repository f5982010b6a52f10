use std::fs;

use tempfile::tempdir;
use textoverlay::{Config, ConfigStore, DisplaySettings, WidgetType};

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().unwrap();
    let mut store = ConfigStore::new(dir.path().join("config.json"));
    assert_eq!(store.load(), Config::default());
}

#[test]
fn malformed_json_loads_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, "{ not json").unwrap();
    let mut store = ConfigStore::new(&path);
    assert_eq!(store.load(), Config::default());
}

#[test]
fn save_then_load_round_trips_with_unknown_keys() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, r#"{"font_size": 22, "window_title": "notes"}"#).unwrap();

    let mut store = ConfigStore::new(&path);
    let mut config = store.load();
    assert_eq!(config.font_size, 22);

    config.x = 640;
    config.color1 = "#ff8800".into();
    config.text_overlay_type = 1;
    assert!(store.save(&config).unwrap());

    let mut reloaded = ConfigStore::new(&path).load();
    assert_eq!(reloaded, config);
    assert_eq!(
        reloaded.extra.remove("window_title"),
        Some(serde_json::Value::from("notes"))
    );

    let display = DisplaySettings::from_config(&config);
    assert_eq!(display.x, 640);
    assert_eq!(display.widget_type, WidgetType::Outlined);
}

#[test]
fn save_creates_parent_directory() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("TextOverlay").join("config.json");
    let mut store = ConfigStore::new(&path);
    assert!(store.save(&Config::default()).unwrap());
    assert!(path.exists());
}

#[test]
fn unchanged_config_is_not_rewritten() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    let mut store = ConfigStore::new(&path);
    let config = store.load();

    assert!(store.save(&config).unwrap(), "first save creates the file");
    fs::write(&path, "sentinel").unwrap();
    assert!(!store.save(&config).unwrap());
    assert_eq!(fs::read_to_string(&path).unwrap(), "sentinel");
}
