// ui/outlined_text.rs - Outlined Text View
//
// Draws every line on a canvas twice: an outline pass in color2 made of
// copies offset around a circle of radius `outline_size`, then the fill in
// color1 on top. Slower than the plain view, hence the label in the UI.

use std::f32::consts::TAU;

use iced::widget::canvas::{self, Cache, Canvas, Geometry};
use iced::widget::{container, scrollable};
use iced::{mouse, Element, Length, Pixels, Point, Rectangle, Renderer, Theme, Vector};

use textoverlay::constants::text::OUTLINE_SAMPLES;
use textoverlay::{DisplaySettings, TextLayout, WidgetType};

use super::{scroll_direction, theme, TextView};
use crate::Message;

pub struct OutlinedText {
    text: String,
    settings: DisplaySettings,
    layout: TextLayout,
    cache: Cache,
}

impl OutlinedText {
    pub fn new(text: &str, settings: &DisplaySettings) -> Self {
        let mut view = Self {
            text: text.to_string(),
            settings: settings.clone(),
            layout: TextLayout::default(),
            cache: Cache::new(),
        };
        view.rebuild_layout();
        view
    }

    fn font_size(&self) -> f32 {
        self.settings.font.size.max(1) as f32
    }

    fn rebuild_layout(&mut self) {
        self.layout = TextLayout::build(
            &self.text,
            self.font_size(),
            self.settings.line_space as f32,
            self.settings.outline_size as f32,
        );
        self.cache.clear();
    }

    /// Offsets for the outline pass
    fn outline_offsets(&self) -> Vec<Vector> {
        let radius = self.settings.outline_size as f32;
        if radius <= 0.0 {
            return Vec::new();
        }
        (0..OUTLINE_SAMPLES)
            .map(|i| {
                let angle = TAU * i as f32 / OUTLINE_SAMPLES as f32;
                Vector::new(angle.cos() * radius, angle.sin() * radius)
            })
            .collect()
    }
}

impl TextView for OutlinedText {
    fn kind(&self) -> WidgetType {
        WidgetType::Outlined
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.rebuild_layout();
    }

    fn set_display_settings(&mut self, settings: &DisplaySettings) {
        self.settings = settings.clone();
        self.rebuild_layout();
    }

    fn view(&self, edit_mode: bool) -> Element<'_, Message> {
        let outline = self.settings.outline_size as f32;
        let width = (self.layout.full_width() + outline).max(1.0);
        let height = (self.layout.full_height() + outline * 2.0).max(1.0);

        let canvas = Canvas::new(self)
            .width(Length::Fixed(width))
            .height(Length::Fixed(height));

        scrollable(container(canvas).padding(2))
            .direction(scroll_direction(edit_mode))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

impl canvas::Program<Message> for OutlinedText {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let geometry = self.cache.draw(renderer, bounds.size(), |frame| {
            let font = theme::font_for(&self.settings.font);
            let size = Pixels(self.font_size());
            let fill = theme::to_color(self.settings.color1);
            let stroke = theme::to_color(self.settings.color2);
            let offsets = self.outline_offsets();
            let top = self.settings.outline_size as f32;

            for line in self.layout.lines() {
                if line.text.is_empty() {
                    continue;
                }
                let origin = Point::new(line.x, line.y + top);
                let text = |position: Point, color| canvas::Text {
                    content: line.text.clone(),
                    position,
                    color,
                    size,
                    font,
                    ..canvas::Text::default()
                };

                for offset in &offsets {
                    frame.fill_text(text(origin + *offset, stroke));
                }
                frame.fill_text(text(origin, fill));
            }
        });

        vec![geometry]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(outline: u32) -> DisplaySettings {
        DisplaySettings {
            outline_size: outline,
            ..DisplaySettings::default()
        }
    }

    #[test]
    fn zero_outline_skips_outline_pass() {
        let view = OutlinedText::new("abc", &settings(0));
        assert!(view.outline_offsets().is_empty());
    }

    #[test]
    fn offsets_lie_on_outline_circle() {
        let view = OutlinedText::new("abc", &settings(3));
        let offsets = view.outline_offsets();
        assert_eq!(offsets.len(), OUTLINE_SAMPLES);
        for offset in offsets {
            let r = (offset.x * offset.x + offset.y * offset.y).sqrt();
            assert!((r - 3.0).abs() < 1e-4);
        }
    }

    #[test]
    fn text_and_settings_changes_relayout() {
        let mut view = OutlinedText::new("one", &settings(2));
        assert_eq!(view.layout.lines().len(), 1);

        view.set_text("one\ntwo");
        assert_eq!(view.layout.lines().len(), 2);

        let mut bigger = settings(2);
        bigger.font.size = 40;
        let before = view.layout.full_height();
        view.set_display_settings(&bigger);
        assert!(view.layout.full_height() > before);
    }
}
