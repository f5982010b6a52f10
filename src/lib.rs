//! TextOverlay - Overlay Core Library
//!
//! Everything behind the overlay that does not depend on the GUI toolkit:
//! configuration, display settings, the settings form, line layout and the
//! debounced file watcher.

pub mod app;
pub mod color;
pub mod config;
pub mod constants;
pub mod display;
pub mod form;
pub mod layout;
pub mod text_file;
pub mod watcher;

// Re-export commonly used types
pub use app::{AppContext, OverlayMode};
pub use color::Rgb;
pub use config::{Config, ConfigStore};
pub use display::{DisplaySettings, FontSpec, WidgetType};
pub use form::{ApplyOutcome, NumberField, SettingsForm};
pub use layout::{LaidLine, TextLayout};
pub use watcher::FileWatcher;
