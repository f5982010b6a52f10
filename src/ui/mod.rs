// ui/mod.rs - iced User Interface Components
//
// The overlay window, its two interchangeable text views, and the settings
// window. All of them produce `crate::Message`.

mod outlined_text;
mod overlay;
mod plain_text;
mod settings;
pub mod theme;

pub use outlined_text::OutlinedText;
pub use overlay::OverlayWindow;
pub use plain_text::PlainText;
pub use settings::{ColorSlot, SettingsWindow};

use iced::Element;
use textoverlay::{DisplaySettings, WidgetType};

use crate::Message;

/// What the overlay needs from a text renderer
pub trait TextView {
    fn kind(&self) -> WidgetType;

    fn set_text(&mut self, text: &str);

    fn set_display_settings(&mut self, settings: &DisplaySettings);

    /// Render the text; `edit_mode` shows scrollbars
    fn view(&self, edit_mode: bool) -> Element<'_, Message>;
}

/// Build the text view for `kind`
pub fn make_text_view(kind: WidgetType, text: &str, settings: &DisplaySettings) -> Box<dyn TextView> {
    match kind {
        WidgetType::Simple => Box::new(PlainText::new(text, settings)),
        WidgetType::Outlined => Box::new(OutlinedText::new(text, settings)),
    }
}

/// Scrollbars shown only while editing
pub(crate) fn scroll_direction(edit_mode: bool) -> iced::widget::scrollable::Direction {
    use iced::widget::scrollable::{Direction, Scrollbar};

    let bar = if edit_mode {
        Scrollbar::new()
    } else {
        Scrollbar::new().width(0).scroller_width(0).margin(0)
    };
    Direction::Both {
        vertical: bar,
        horizontal: bar,
    }
}
