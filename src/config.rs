// config.rs - Configuration Persistence
//
// A flat JSON object of display and behavior settings. Missing keys fall
// back to defaults, a key holding the wrong type is dropped with a warning,
// and unknown keys are carried through untouched on save.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{self, overlay, settings_window, text};

/// The persisted configuration document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub font_name: String,
    pub font_size: u16,
    pub color1: String,
    pub color2: String,
    pub line_space: i32,
    pub text_overlay_type: i64,
    pub outline_size: u32,
    pub text_file_path: String,
    pub watch_file: bool,
    pub watch_file_saveback: bool,
    pub draggable: bool,
    pub settings_x: i32,
    pub settings_y: i32,

    /// Keys this version does not know about
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            x: overlay::DEFAULT_X,
            y: overlay::DEFAULT_Y,
            w: overlay::DEFAULT_WIDTH,
            h: overlay::DEFAULT_HEIGHT,
            font_name: text::DEFAULT_FONT_NAME.to_string(),
            font_size: text::DEFAULT_FONT_SIZE,
            color1: text::DEFAULT_COLOR1.to_string(),
            color2: text::DEFAULT_COLOR2.to_string(),
            line_space: text::DEFAULT_LINE_SPACE,
            text_overlay_type: 0,
            outline_size: text::DEFAULT_OUTLINE_SIZE,
            text_file_path: constants::DEFAULT_TEXT_FILE_PATH.to_string(),
            watch_file: false,
            watch_file_saveback: false,
            draggable: true,
            settings_x: settings_window::DEFAULT_X,
            settings_y: settings_window::DEFAULT_Y,
            extra: Map::new(),
        }
    }
}

impl Config {
    /// Every key this version reads and writes
    pub const KEYS: &'static [&'static str] = &[
        "x",
        "y",
        "w",
        "h",
        "font_name",
        "font_size",
        "color1",
        "color2",
        "line_space",
        "text_overlay_type",
        "outline_size",
        "text_file_path",
        "watch_file",
        "watch_file_saveback",
        "draggable",
        "settings_x",
        "settings_y",
    ];

    /// Parse a JSON document. Never fails on content: bad keys are dropped
    /// and take their default.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::parse(json).map(|(config, _)| config)
    }

    /// Like `from_json`, also returning how many keys were dropped
    fn parse(json: &str) -> Result<(Self, usize)> {
        let value: Value = serde_json::from_str(json).context("config is not valid JSON")?;
        let Value::Object(mut map) = value else {
            anyhow::bail!("config root must be a JSON object");
        };
        let dropped = Self::drop_mistyped_keys(&mut map);
        let config =
            serde_json::from_value(Value::Object(map)).context("failed to decode config")?;
        Ok((config, dropped))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize config")
    }

    fn drop_mistyped_keys(map: &mut Map<String, Value>) -> usize {
        let before = map.len();
        map.retain(|key, value| {
            if !Self::KEYS.contains(&key.as_str()) {
                return true;
            }
            let mut single = Map::new();
            single.insert(key.clone(), value.clone());
            match serde_json::from_value::<Config>(Value::Object(single)) {
                Ok(_) => true,
                Err(e) => {
                    warn!("Config key {:?} has unusable value {}: {}", key, value, e);
                    false
                }
            }
        });
        before - map.len()
    }
}

/// Reads and writes the config file, remembering what was last persisted so
/// unchanged documents are not rewritten.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    last_saved: Option<String>,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_saved: None,
        }
    }

    /// `<config_dir>/TextOverlay/config.json`, or the working directory when
    /// the platform has no config dir.
    pub fn default_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(constants::CONFIG_DIR_NAME);
        config_dir.join(constants::CONFIG_FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the config, falling back to defaults on any failure
    pub fn load(&mut self) -> Config {
        // `faithful` is false when the file on disk does not hold what we
        // loaded, so the next save must rewrite it
        let (config, faithful) = if self.path.exists() {
            match fs::read_to_string(&self.path) {
                Ok(contents) => match Config::parse(&contents) {
                    Ok((config, 0)) => {
                        info!("Config loaded from {:?}", self.path);
                        (config, true)
                    }
                    Ok((config, dropped)) => {
                        warn!("Config loaded from {:?} with {} unusable keys", self.path, dropped);
                        (config, false)
                    }
                    Err(e) => {
                        error!("Failed to parse config {:?}: {:#}", self.path, e);
                        (Config::default(), false)
                    }
                },
                Err(e) => {
                    error!("Failed to read config file {:?}: {}", self.path, e);
                    (Config::default(), false)
                }
            }
        } else {
            info!("No config at {:?}, using defaults", self.path);
            (Config::default(), true)
        };

        self.last_saved = if faithful { config.to_json().ok() } else { None };
        config
    }

    /// Persist the config. Returns `Ok(false)` when the document is identical
    /// to what was last loaded or saved and nothing was written.
    pub fn save(&mut self, config: &Config) -> Result<bool> {
        let json = config.to_json()?;
        if self.last_saved.as_deref() == Some(json.as_str()) && self.path.exists() {
            debug!("Config unchanged, skipping write");
            return Ok(false);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create config dir {:?}", parent))?;
        }
        fs::write(&self.path, &json)
            .with_context(|| format!("failed to write config {:?}", self.path))?;
        info!("Config saved to {:?}", self.path);

        self.last_saved = Some(json);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn mistyped_key_falls_back_individually() {
        let config = Config::from_json(r#"{"x": "left", "y": 42, "draggable": 3}"#).unwrap();
        assert_eq!(config.x, overlay::DEFAULT_X);
        assert_eq!(config.y, 42);
        assert!(config.draggable);
    }

    #[test]
    fn unknown_keys_are_kept() {
        let config = Config::from_json(r#"{"font_size": 30, "theme": "dark"}"#).unwrap();
        assert_eq!(config.font_size, 30);
        assert_eq!(config.extra.get("theme"), Some(&Value::from("dark")));

        let json = config.to_json().unwrap();
        assert!(json.contains("\"theme\": \"dark\""));
    }

    #[test]
    fn non_object_root_is_an_error() {
        assert!(Config::from_json("[1, 2]").is_err());
        assert!(Config::from_json("{not json").is_err());
    }

    #[test]
    fn serialized_keys_match_key_list() {
        let json = Config::default().to_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), Config::KEYS.len());
        for key in Config::KEYS {
            assert!(object.contains_key(*key), "missing {key}");
        }
    }

    #[test]
    fn malformed_file_is_rewritten_on_first_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ broken").unwrap();

        let mut store = ConfigStore::new(&path);
        let config = store.load();
        assert_eq!(config, Config::default());
        assert!(store.save(&config).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), config.to_json().unwrap());
        assert!(!store.save(&config).unwrap());
    }

    #[test]
    fn dropped_keys_force_a_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut doc = Config::default().to_json().unwrap();
        doc = doc.replace("\"x\": 100", "\"x\": \"left\"");
        fs::write(&path, &doc).unwrap();

        let mut store = ConfigStore::new(&path);
        let config = store.load();
        assert_eq!(config.x, overlay::DEFAULT_X);
        assert!(store.save(&config).unwrap());
        assert!(!fs::read_to_string(&path).unwrap().contains("left"));
    }

    #[test]
    fn clean_file_is_not_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, Config::default().to_json().unwrap()).unwrap();

        let mut store = ConfigStore::new(&path);
        let config = store.load();
        assert!(!store.save(&config).unwrap());
    }
}
