// ui/plain_text.rs - Toolkit Text View
//
// The fast renderer: iced's own text widget with proportional line height.

use iced::widget::text::LineHeight;
use iced::widget::{container, scrollable, text};
use iced::{Element, Length};

use textoverlay::{DisplaySettings, WidgetType};

use super::{scroll_direction, theme, TextView};
use crate::Message;

pub struct PlainText {
    text: String,
    settings: DisplaySettings,
}

impl PlainText {
    pub fn new(text: &str, settings: &DisplaySettings) -> Self {
        Self {
            text: text.to_string(),
            settings: settings.clone(),
        }
    }

    /// Line spacing is a percentage on top of the natural line height
    fn line_height(&self) -> LineHeight {
        let percent = (100 + self.settings.line_space).max(10) as f32;
        LineHeight::Relative(percent / 100.0)
    }
}

impl TextView for PlainText {
    fn kind(&self) -> WidgetType {
        WidgetType::Simple
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn set_display_settings(&mut self, settings: &DisplaySettings) {
        self.settings = settings.clone();
    }

    fn view(&self, edit_mode: bool) -> Element<'_, Message> {
        let body = text(&self.text)
            .size(self.settings.font.size.max(1) as f32)
            .font(theme::font_for(&self.settings.font))
            .color(theme::to_color(self.settings.color1))
            .line_height(self.line_height());

        scrollable(container(body).padding(2))
            .direction(scroll_direction(edit_mode))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_height_is_proportional() {
        let mut settings = DisplaySettings::default();
        settings.line_space = 20;
        let view = PlainText::new("x", &settings);
        assert_eq!(view.line_height(), LineHeight::Relative(1.2));
    }

    #[test]
    fn line_height_never_collapses() {
        let mut settings = DisplaySettings::default();
        settings.line_space = -100;
        let view = PlainText::new("x", &settings);
        assert_eq!(view.line_height(), LineHeight::Relative(0.1));
    }
}
