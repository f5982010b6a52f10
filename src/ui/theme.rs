// ui/theme.rs - TextOverlay Visual Theme
//
// Color palette for the settings window and the edit-mode chrome, plus the
// bridges from library types (Rgb, FontSpec) to iced types.

use std::collections::HashMap;
use std::sync::Mutex;

use iced::{Color, Font};
use lazy_static::lazy_static;

use textoverlay::{FontSpec, Rgb};

// Color palette (modern dark theme)
pub mod colors {
    use iced::Color;

    pub const BG_PRIMARY: Color = Color::from_rgb(0.09, 0.09, 0.12);
    pub const BG_SECONDARY: Color = Color::from_rgb(0.12, 0.12, 0.16);
    pub const BG_TERTIARY: Color = Color::from_rgb(0.16, 0.16, 0.22);
    pub const BG_HOVER: Color = Color::from_rgb(0.18, 0.18, 0.24);

    pub const ACCENT: Color = Color::from_rgb(0.35, 0.55, 0.95);
    pub const ACCENT_HOVER: Color = Color::from_rgb(0.45, 0.65, 1.0);
    pub const DANGER: Color = Color::from_rgb(0.9, 0.3, 0.35);
    pub const DANGER_HOVER: Color = Color::from_rgb(1.0, 0.4, 0.45);

    pub const TEXT_PRIMARY: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.95);
    pub const TEXT_SECONDARY: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.6);
    pub const TEXT_MUTED: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.4);

    pub const BORDER: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.1);

    /// Overlay background while in edit mode
    pub const EDIT_BG: Color = Color::from_rgba(40.0 / 255.0, 40.0 / 255.0, 40.0 / 255.0, 200.0 / 255.0);
    /// Text area background while in edit mode
    pub const EDIT_TEXT_BG: Color = Color::from_rgba(0.0, 0.0, 0.0, 50.0 / 255.0);
    /// Edit-mode border
    pub const EDIT_BORDER: Color = Color::from_rgb(1.0, 0.0, 0.0);
}

pub fn to_color(rgb: Rgb) -> Color {
    let [r, g, b] = rgb.to_unit();
    Color::from_rgb(r, g, b)
}

pub fn from_color(color: Color) -> Rgb {
    Rgb::from_unit(color.r, color.g, color.b)
}

lazy_static! {
    // iced fonts name their family with a &'static str, so each distinct
    // family is leaked exactly once.
    static ref FONT_FAMILIES: Mutex<HashMap<String, &'static str>> = Mutex::new(HashMap::new());
}

/// iced font for a configured family; an empty family uses the default font
pub fn font_for(spec: &FontSpec) -> Font {
    let family = spec.family.trim();
    if family.is_empty() {
        return Font::DEFAULT;
    }

    let mut families = FONT_FAMILIES.lock().unwrap_or_else(|e| e.into_inner());
    let name: &'static str = match families.get(family) {
        Some(name) => *name,
        None => {
            let leaked: &'static str = Box::leak(family.to_string().into_boxed_str());
            families.insert(family.to_string(), leaked);
            leaked
        }
    };
    Font::with_name(name)
}
