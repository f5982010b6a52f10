// form.rs - Settings Form State
//
// Field buffers behind the settings window. Nothing here touches the disk or
// the toolkit: `apply` copies the fields into the shared context and reports
// what the caller has to act on.

use std::path::PathBuf;

use crate::app::AppContext;
use crate::color::Rgb;
use crate::constants::limits;
use crate::display::{FontSpec, WidgetType};

/// An integer input with an inclusive range, like a spin box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberField {
    value: i32,
    min: i32,
    max: i32,
    buffer: String,
}

impl NumberField {
    pub fn new(value: i32, min: i32, max: i32) -> Self {
        let value = value.clamp(min, max);
        Self {
            value,
            min,
            max,
            buffer: value.to_string(),
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    /// What the input box shows
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Handle typed input. Non-numeric input is rejected and the buffer keeps
    /// its previous text; "" and "-" are allowed as in-progress edits.
    pub fn set_input(&mut self, input: &str) {
        let trimmed = input.trim();
        if trimmed.is_empty() || (trimmed == "-" && self.min < 0) {
            self.buffer = input.to_string();
            return;
        }
        if let Ok(v) = trimmed.parse::<i64>() {
            self.value = v.clamp(self.min as i64, self.max as i64) as i32;
            self.buffer = input.to_string();
        }
    }

    pub fn set_value(&mut self, value: i32) {
        self.value = value.clamp(self.min, self.max);
        self.buffer = self.value.to_string();
    }

    /// Rewrite the buffer from the clamped value
    fn normalize(&mut self) {
        self.buffer = self.value.to_string();
    }
}

/// What `SettingsForm::apply` changed
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// The overlay must swap its text view
    pub widget_type_changed: bool,
    /// The overlay must show new text
    pub text_changed: bool,
    /// The new text must be written to the watched file
    pub write_back: bool,
}

/// Settings window fields
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsForm {
    pub text: String,
    pub x: NumberField,
    pub y: NumberField,
    pub widget_type: WidgetType,
    pub outline_size: NumberField,
    pub font_name: String,
    pub font_size: NumberField,
    pub line_space: NumberField,
    pub color1: Rgb,
    pub color2: Rgb,
    pub draggable: bool,
    pub show_overlay: bool,
    pub watch_file: bool,
    pub watch_path: String,
    pub save_back: bool,
}

impl SettingsForm {
    pub fn from_context(ctx: &AppContext) -> Self {
        let display = &ctx.display;
        let config = &ctx.config;
        Self {
            text: ctx.text.clone(),
            x: NumberField::new(display.x, limits::POSITION_MIN, limits::POSITION_MAX),
            y: NumberField::new(display.y, limits::POSITION_MIN, limits::POSITION_MAX),
            widget_type: display.widget_type,
            outline_size: NumberField::new(
                display.outline_size.min(i32::MAX as u32) as i32,
                limits::OUTLINE_MIN,
                limits::OUTLINE_MAX,
            ),
            font_name: display.font.family.clone(),
            font_size: NumberField::new(
                display.font.size as i32,
                limits::FONT_SIZE_MIN,
                limits::FONT_SIZE_MAX,
            ),
            line_space: NumberField::new(
                display.line_space,
                limits::LINE_SPACE_MIN,
                limits::LINE_SPACE_MAX,
            ),
            color1: display.color1,
            color2: display.color2,
            draggable: config.draggable,
            show_overlay: true,
            watch_file: config.watch_file,
            watch_path: config.text_file_path.clone(),
            save_back: config.watch_file_saveback,
        }
    }

    /// Mirror a position reported by dragging the overlay
    pub fn set_overlay_position(&mut self, x: i32, y: i32) {
        self.x.set_value(x);
        self.y.set_value(y);
    }

    /// Mirror a font size changed from the overlay
    pub fn set_font_size(&mut self, size: u16) {
        self.font_size.set_value(size as i32);
    }

    /// Write every field into `ctx.display` and `ctx.config`.
    /// `settings_pos` is the settings window's own position.
    pub fn apply(&mut self, ctx: &mut AppContext, settings_pos: (i32, i32)) -> ApplyOutcome {
        let mut outcome = ApplyOutcome::default();

        if self.widget_type != ctx.display.widget_type {
            ctx.display.widget_type = self.widget_type;
            outcome.widget_type_changed = true;
        }

        if !self.watch_path.trim().is_empty() {
            ctx.display.text_file_path = PathBuf::from(self.watch_path.trim());
        }

        if self.text != ctx.text {
            ctx.text = self.text.clone();
            outcome.text_changed = true;
            outcome.write_back = self.save_back;
        }

        let display = &mut ctx.display;
        display.font = FontSpec::new(self.font_name.clone(), self.font_size.value() as u16);
        display.line_space = self.line_space.value();
        display.outline_size = self.outline_size.value() as u32;
        display.x = self.x.value();
        display.y = self.y.value();
        display.color1 = self.color1;
        display.color2 = self.color2;

        let config = &mut ctx.config;
        config.x = display.x;
        config.y = display.y;
        config.w = display.w;
        config.h = display.h;
        config.draggable = self.draggable;
        config.settings_x = settings_pos.0;
        config.settings_y = settings_pos.1;
        config.font_name = display.font.family.clone();
        config.font_size = display.font.size;
        config.color1 = display.color1.to_hex();
        config.color2 = display.color2.to_hex();
        config.line_space = display.line_space;
        config.text_file_path = self.watch_path.clone();
        config.watch_file = self.watch_file;
        config.text_overlay_type = display.widget_type.index();
        config.outline_size = display.outline_size;
        config.watch_file_saveback = self.save_back;

        for field in [
            &mut self.x,
            &mut self.y,
            &mut self.outline_size,
            &mut self.font_size,
            &mut self.line_space,
        ] {
            field.normalize();
        }

        outcome
    }
}
