// display.rs - Display Settings
//
// Plain data shared by the overlay and the settings form. Built from the
// config at startup and written back into it on Apply.

use std::fmt;
use std::path::PathBuf;

use log::warn;

use crate::color::Rgb;
use crate::config::Config;
use crate::constants::text;

/// Font family and point size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSpec {
    pub family: String,
    pub size: u16,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: u16) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new(text::DEFAULT_FONT_NAME, text::DEFAULT_FONT_SIZE)
    }
}

/// Which text view the overlay hosts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum WidgetType {
    #[default]
    Simple,
    Outlined,
}

impl WidgetType {
    pub const ALL: [WidgetType; 2] = [WidgetType::Simple, WidgetType::Outlined];

    /// Map a stored index; anything other than 1 is `Simple`
    pub fn from_index(index: i64) -> Self {
        match index {
            1 => Self::Outlined,
            0 => Self::Simple,
            other => {
                warn!("Unknown text overlay type {}, using Simple", other);
                Self::Simple
            }
        }
    }

    pub fn index(self) -> i64 {
        match self {
            Self::Simple => 0,
            Self::Outlined => 1,
        }
    }
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple => write!(f, "Simple"),
            Self::Outlined => write!(f, "Outlined text (slow)"),
        }
    }
}

/// Everything the text views need to render
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySettings {
    pub font: FontSpec,
    /// Fill color
    pub color1: Rgb,
    /// Outline color
    pub color2: Rgb,
    pub line_space: i32,
    pub widget_type: WidgetType,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub outline_size: u32,
    pub text_file_path: PathBuf,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl DisplaySettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            font: FontSpec::new(config.font_name.clone(), config.font_size),
            color1: parse_color_or(&config.color1, text::DEFAULT_COLOR1),
            color2: parse_color_or(&config.color2, text::DEFAULT_COLOR2),
            line_space: config.line_space,
            widget_type: WidgetType::from_index(config.text_overlay_type),
            x: config.x,
            y: config.y,
            w: config.w,
            h: config.h,
            outline_size: config.outline_size,
            text_file_path: PathBuf::from(&config.text_file_path),
        }
    }

    /// One wheel notch of font resizing. Returns the new size.
    pub fn step_font_size(&mut self, grow: bool) -> u16 {
        self.font.size = if grow {
            self.font.size.saturating_add(1)
        } else {
            self.font.size.saturating_sub(1).max(1)
        };
        self.font.size
    }
}

fn parse_color_or(value: &str, fallback: &str) -> Rgb {
    value.parse().unwrap_or_else(|e| {
        warn!("{:#}, using {}", e, fallback);
        fallback.parse().unwrap_or(Rgb::WHITE)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_config_defaults() {
        let settings = DisplaySettings::default();
        assert_eq!(settings.font, FontSpec::new("Arial", 16));
        assert_eq!(settings.color1, Rgb::WHITE);
        assert_eq!(settings.color2, Rgb::BLACK);
        assert_eq!((settings.x, settings.y, settings.w, settings.h), (100, 100, 200, 600));
        assert_eq!(settings.widget_type, WidgetType::Simple);
        assert_eq!(settings.text_file_path, PathBuf::from("text.txt"));
    }

    #[test]
    fn bad_color_falls_back() {
        let config = Config {
            color1: "not a color".into(),
            color2: "red".into(),
            ..Config::default()
        };
        let settings = DisplaySettings::from_config(&config);
        assert_eq!(settings.color1, Rgb::WHITE);
        assert_eq!(settings.color2, Rgb::new(255, 0, 0));
    }

    #[test]
    fn non_ascii_color_falls_back() {
        let config = Config {
            color1: "#aébcd".into(),
            ..Config::default()
        };
        let settings = DisplaySettings::from_config(&config);
        assert_eq!(settings.color1, Rgb::WHITE);
    }

    #[test]
    fn widget_type_index_mapping() {
        assert_eq!(WidgetType::from_index(0), WidgetType::Simple);
        assert_eq!(WidgetType::from_index(1), WidgetType::Outlined);
        assert_eq!(WidgetType::from_index(7), WidgetType::Simple);
        assert_eq!(WidgetType::from_index(-1), WidgetType::Simple);
        assert_eq!(WidgetType::Outlined.index(), 1);
    }

    #[test]
    fn font_step_never_drops_below_one() {
        let mut settings = DisplaySettings::default();
        settings.font.size = 1;
        assert_eq!(settings.step_font_size(false), 1);
        assert_eq!(settings.step_font_size(true), 2);
    }
}
