// layout.rs - Line Layout for Outlined Text
//
// The outlined view draws each line itself, so it needs positions up front.
// Lines are not wrapped: one paragraph per line, stacked top to bottom with
// the configured extra spacing. Widths are estimates from an average glyph
// advance; they only size the scroll area.

use crate::constants::text::{AVG_ADVANCE_FACTOR, LINE_HEIGHT_FACTOR};

/// A single positioned line
#[derive(Debug, Clone, PartialEq)]
pub struct LaidLine {
    pub text: String,
    /// Left edge, already shifted right by the outline thickness
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextLayout {
    lines: Vec<LaidLine>,
    full_width: f32,
    full_height: f32,
}

impl TextLayout {
    pub fn build(text: &str, font_size: f32, line_space: f32, outline: f32) -> Self {
        let line_height = font_size * LINE_HEIGHT_FACTOR;
        let advance = font_size * AVG_ADVANCE_FACTOR;

        let mut lines = Vec::new();
        let mut y = 0.0;
        let mut max_width: f32 = 0.0;

        for paragraph in text.lines() {
            let width = paragraph.chars().count() as f32 * advance + outline * 2.0;
            max_width = max_width.max(width);
            lines.push(LaidLine {
                text: paragraph.to_string(),
                x: outline,
                y,
                width,
            });
            y += line_height + line_space;
        }

        Self {
            lines,
            full_width: max_width,
            full_height: y.max(0.0),
        }
    }

    pub fn lines(&self) -> &[LaidLine] {
        &self.lines
    }

    pub fn full_width(&self) -> f32 {
        self.full_width
    }

    pub fn full_height(&self) -> f32 {
        self.full_height
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
