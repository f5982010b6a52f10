// constants.rs - Application-wide Constants
//
// Centralized defaults, limits and timings shared by the overlay,
// the settings form and the file watcher.

use std::time::Duration;

/// Text file loaded at startup when the config names none
pub const DEFAULT_TEXT_FILE_PATH: &str = "text.txt";

/// Config file name inside the per-user config directory
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "TextOverlay";

/// Overlay window geometry
pub mod overlay {
    /// Default X position
    pub const DEFAULT_X: i32 = 100;
    /// Default Y position
    pub const DEFAULT_Y: i32 = 100;
    /// Default window width
    pub const DEFAULT_WIDTH: i32 = 200;
    /// Default window height
    pub const DEFAULT_HEIGHT: i32 = 600;
    /// Minimum window width
    pub const MIN_WIDTH: f32 = 60.0;
    /// Minimum window height
    pub const MIN_HEIGHT: f32 = 40.0;
    /// Padding between window edge and text view
    pub const PADDING: u16 = 10;
    /// Border width drawn in edit mode
    pub const EDIT_BORDER_WIDTH: f32 = 2.0;
    /// Size of the bottom-right resize grip
    pub const GRIP_SIZE: f32 = 16.0;
}

/// Text rendering defaults
pub mod text {
    /// Default font family
    pub const DEFAULT_FONT_NAME: &str = "Arial";
    /// Default font size in points
    pub const DEFAULT_FONT_SIZE: u16 = 16;
    /// Default extra spacing between lines
    pub const DEFAULT_LINE_SPACE: i32 = 5;
    /// Default outline thickness
    pub const DEFAULT_OUTLINE_SIZE: u32 = 2;
    /// Default fill color
    pub const DEFAULT_COLOR1: &str = "#ffffff";
    /// Default outline color
    pub const DEFAULT_COLOR2: &str = "#000000";
    /// Line height as a multiple of font size for manual layout
    pub const LINE_HEIGHT_FACTOR: f32 = 1.3;
    /// Average glyph advance as a multiple of font size, used for width estimates
    pub const AVG_ADVANCE_FACTOR: f32 = 0.6;
    /// Number of offset copies drawn for the outline pass
    pub const OUTLINE_SAMPLES: usize = 16;
}

/// Settings form ranges (inclusive)
pub mod limits {
    pub const POSITION_MIN: i32 = 0;
    pub const POSITION_MAX: i32 = 3000;
    pub const OUTLINE_MIN: i32 = 0;
    pub const OUTLINE_MAX: i32 = 50;
    pub const FONT_SIZE_MIN: i32 = 0;
    pub const FONT_SIZE_MAX: i32 = 300;
    pub const LINE_SPACE_MIN: i32 = -50;
    pub const LINE_SPACE_MAX: i32 = 300;
}

/// Settings window placement
pub mod settings_window {
    /// Default X position
    pub const DEFAULT_X: i32 = 50;
    /// Default Y position
    pub const DEFAULT_Y: i32 = 50;
    /// Window width
    pub const WIDTH: f32 = 560.0;
    /// Window height
    pub const HEIGHT: f32 = 640.0;
}

/// File watcher timings
pub mod watcher {
    use super::Duration;

    /// Quiet period after the last change notification before re-reading
    pub const DEBOUNCE: Duration = Duration::from_millis(200);
    /// How long the watcher stays paused after writing the file ourselves
    pub const SAVEBACK_GRACE: Duration = Duration::from_secs(2);
    /// Tick interval driving watcher polling
    pub const POLL_INTERVAL: Duration = Duration::from_millis(50);
}
