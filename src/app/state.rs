// app/state.rs - Shared Application Context
//
// The single owner of the display settings, the config document and the
// current overlay text. UI components borrow it; nothing is global.

use crate::config::Config;
use crate::display::DisplaySettings;
use crate::text_file;

/// Current mode of the overlay window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayMode {
    /// Draggable, bordered, receives input
    Edit,
    /// Click-through and fully transparent
    Display,
}

impl OverlayMode {
    pub fn from_draggable(draggable: bool) -> Self {
        if draggable {
            Self::Edit
        } else {
            Self::Display
        }
    }

    pub fn is_edit(self) -> bool {
        self == Self::Edit
    }
}

/// Main application context
/// This is the single source of truth for settings and text
#[derive(Debug, Clone)]
pub struct AppContext {
    /// What the text views render with
    pub display: DisplaySettings,

    /// The persisted document, updated on Apply
    pub config: Config,

    /// Text currently shown in the overlay
    pub text: String,
}

impl AppContext {
    /// Build display settings from `config` and read the initial text
    pub fn from_config(config: Config) -> Self {
        let display = DisplaySettings::from_config(&config);
        let text = text_file::load_text(&display.text_file_path);
        Self {
            display,
            config,
            text,
        }
    }

    pub fn initial_mode(&self) -> OverlayMode {
        OverlayMode::from_draggable(self.config.draggable)
    }

    /// Accept text delivered by the file watcher. Empty or identical text is
    /// ignored. Returns whether the overlay needs the new text.
    pub fn accept_watched_text(&mut self, new_text: &str) -> bool {
        if new_text.is_empty() || new_text == self.text {
            return false;
        }
        self.text = new_text.to_string();
        true
    }

    /// Track overlay geometry reported by the window system
    pub fn set_overlay_position(&mut self, x: i32, y: i32) {
        self.display.x = x;
        self.display.y = y;
    }

    pub fn set_overlay_size(&mut self, w: i32, h: i32) {
        self.display.w = w;
        self.display.h = h;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> AppContext {
        AppContext {
            display: DisplaySettings::default(),
            config: Config::default(),
            text: "hello".into(),
        }
    }

    #[test]
    fn watched_text_ignores_empty_and_identical() {
        let mut ctx = context();
        assert!(!ctx.accept_watched_text(""));
        assert!(!ctx.accept_watched_text("hello"));
        assert!(ctx.accept_watched_text("bye"));
        assert_eq!(ctx.text, "bye");
    }

    #[test]
    fn mode_follows_draggable_flag() {
        let mut ctx = context();
        assert_eq!(ctx.initial_mode(), OverlayMode::Edit);
        ctx.config.draggable = false;
        assert_eq!(ctx.initial_mode(), OverlayMode::Display);
    }
}
