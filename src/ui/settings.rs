// ui/settings.rs - Settings Window
//
// The form that drives the overlay: text body, geometry, font, colors,
// outline, edit mode and the watched file. Field state lives in
// `textoverlay::SettingsForm`; this module owns only iced-side state.

use iced::widget::{
    button, checkbox, column, container, pick_list, row, scrollable, text, text_editor,
    text_input, horizontal_space, vertical_space,
};
use iced::{window, Alignment, Color, Element, Length, Padding, Point, Size, Task};
use iced_aw::ColorPicker;

use textoverlay::constants::settings_window::{HEIGHT, WIDTH};
use textoverlay::{AppContext, NumberField, Rgb, SettingsForm, WidgetType};

use super::theme::{colors, to_color};
use crate::Message;

/// Which of the two colors a picker edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSlot {
    Fill,
    Outline,
}

pub struct SettingsWindow {
    id: Option<window::Id>,
    pub form: SettingsForm,
    editor: text_editor::Content,
    position: (i32, i32),
    open_picker: Option<ColorSlot>,
    status: String,
}

impl SettingsWindow {
    pub fn new(ctx: &AppContext) -> Self {
        Self {
            id: None,
            form: SettingsForm::from_context(ctx),
            editor: text_editor::Content::with_text(&ctx.text),
            position: (ctx.config.settings_x, ctx.config.settings_y),
            open_picker: None,
            status: String::new(),
        }
    }

    pub fn open(&self) -> Task<window::Id> {
        let settings = window::Settings {
            size: Size::new(WIDTH, HEIGHT),
            min_size: Some(Size::new(300.0, 300.0)),
            position: window::Position::Specific(Point::new(
                self.position.0 as f32,
                self.position.1 as f32,
            )),
            decorations: true,
            resizable: true,
            ..Default::default()
        };
        let (_, open_task) = window::open(settings);
        open_task
    }

    pub fn opened(&mut self, id: window::Id) {
        self.id = Some(id);
    }

    pub fn id(&self) -> Option<window::Id> {
        self.id
    }

    pub fn is(&self, id: window::Id) -> bool {
        self.id == Some(id)
    }

    pub fn position(&self) -> (i32, i32) {
        self.position
    }

    pub fn moved(&mut self, position: Point) {
        self.position = (position.x as i32, position.y as i32);
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Replace the text body, e.g. after the watched file changed
    pub fn set_text(&mut self, text: &str) {
        self.form.text = text.to_string();
        self.editor = text_editor::Content::with_text(text);
    }

    pub fn perform(&mut self, action: text_editor::Action) {
        let is_edit = action.is_edit();
        self.editor.perform(action);
        if is_edit {
            self.form.text = editor_text(&self.editor);
        }
    }

    pub fn toggle_picker(&mut self, slot: ColorSlot) {
        self.open_picker = match self.open_picker {
            Some(open) if open == slot => None,
            _ => Some(slot),
        };
    }

    pub fn close_picker(&mut self) {
        self.open_picker = None;
    }

    pub fn submit_color(&mut self, slot: ColorSlot, color: Rgb) {
        match slot {
            ColorSlot::Fill => self.form.color1 = color,
            ColorSlot::Outline => self.form.color2 = color,
        }
        self.open_picker = None;
    }

    pub fn view(&self, watch_state: String) -> Element<'_, Message> {
        let form = &self.form;

        let text_section = section(
            "Text",
            column![text_editor(&self.editor)
                .on_action(Message::EditorAction)
                .height(120)]
            .into(),
        );

        let layout_section = section(
            "Position & Type",
            column![
                row![
                    number_input("X:", &form.x, Message::SetX),
                    number_input("Y:", &form.y, Message::SetY),
                ]
                .spacing(12),
                row![
                    pick_list(WidgetType::ALL, Some(form.widget_type), Message::SetWidgetType)
                        .width(Length::FillPortion(1)),
                    number_input("Outline size:", &form.outline_size, Message::SetOutlineSize),
                ]
                .spacing(12)
                .align_y(Alignment::Center),
            ]
            .spacing(8)
            .into(),
        );

        let font_section = section(
            "Font",
            column![
                row![
                    text_input("Font name", &form.font_name)
                        .on_input(Message::SetFontName)
                        .width(Length::FillPortion(2)),
                    number_input("Size:", &form.font_size, Message::SetFontSize),
                    number_input("Linespace:", &form.line_space, Message::SetLineSpace),
                ]
                .spacing(12)
                .align_y(Alignment::Center),
                row![
                    self.color_picker(ColorSlot::Fill, "Color1", form.color1),
                    self.color_picker(ColorSlot::Outline, "Color2", form.color2),
                ]
                .spacing(12),
            ]
            .spacing(8)
            .into(),
        );

        let overlay_section = section(
            "Overlay",
            column![
                row![
                    checkbox("Draggable (transparent switch)", form.draggable)
                        .on_toggle(Message::SetDraggable)
                        .spacing(8),
                    text("<----- Move/resize overlay").size(11).color(colors::TEXT_MUTED),
                ]
                .spacing(12)
                .align_y(Alignment::Center),
                checkbox("Show overlay", form.show_overlay)
                    .on_toggle(Message::SetShowOverlay)
                    .spacing(8),
            ]
            .spacing(6)
            .into(),
        );

        let watch_section = section(
            "Watched File",
            column![
                row![
                    checkbox("Watch file", form.watch_file)
                        .on_toggle(Message::SetWatchFile)
                        .spacing(8),
                    text(watch_state).size(11).color(colors::TEXT_MUTED),
                    horizontal_space(),
                    checkbox("Save back to file", form.save_back)
                        .on_toggle(Message::SetSaveBack)
                        .spacing(8),
                ]
                .spacing(8)
                .align_y(Alignment::Center),
                row![
                    text_input("path/to/text.txt", &form.watch_path)
                        .on_input(Message::SetWatchPath)
                        .width(Length::Fill),
                    small_button("Browse", Message::BrowseWatchPath),
                    small_button("Change path", Message::ChangeWatchPath),
                ]
                .spacing(8)
                .align_y(Alignment::Center),
            ]
            .spacing(8)
            .into(),
        );

        let buttons = row![
            button(text("Exit").size(13))
                .padding(Padding::from([10, 24]))
                .style(|_, s| {
                    let bg = match s {
                        button::Status::Hovered | button::Status::Pressed => colors::DANGER_HOVER,
                        _ => colors::DANGER,
                    };
                    button::Style {
                        background: Some(iced::Background::Color(bg)),
                        text_color: Color::WHITE,
                        border: iced::Border { radius: 6.0.into(), ..Default::default() },
                        ..Default::default()
                    }
                })
                .on_press(Message::Exit),
            horizontal_space(),
            text(&self.status).size(11).color(colors::TEXT_SECONDARY),
            horizontal_space(),
            button(text("Apply and save").size(13))
                .padding(Padding::from([10, 24]))
                .style(|_, s| {
                    let bg = match s {
                        button::Status::Hovered | button::Status::Pressed => colors::ACCENT_HOVER,
                        _ => colors::ACCENT,
                    };
                    button::Style {
                        background: Some(iced::Background::Color(bg)),
                        text_color: Color::WHITE,
                        border: iced::Border { radius: 6.0.into(), ..Default::default() },
                        ..Default::default()
                    }
                })
                .on_press(Message::ApplySettings),
        ]
        .align_y(Alignment::Center);

        let content = column![
            text("Overlay Settings").size(20).color(colors::TEXT_PRIMARY),
            vertical_space().height(12),
            scrollable(
                column![
                    text_section,
                    layout_section,
                    font_section,
                    overlay_section,
                    watch_section,
                ]
                .spacing(12)
                .padding(Padding { right: 16.0, ..Padding::ZERO })
            )
            .height(Length::Fill),
            vertical_space().height(16),
            buttons,
        ]
        .padding(20);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_| container::Style {
                background: Some(iced::Background::Color(colors::BG_PRIMARY)),
                ..Default::default()
            })
            .into()
    }

    fn color_picker(&self, slot: ColorSlot, label: &'static str, rgb: Rgb) -> Element<'_, Message> {
        let preview = to_color(rgb);
        let swatch = button(
            row![
                container(text(" "))
                    .width(24)
                    .height(24)
                    .style(move |_| container::Style {
                        background: Some(iced::Background::Color(preview)),
                        border: iced::Border {
                            radius: 12.0.into(),
                            color: colors::BORDER,
                            width: 1.0,
                        },
                        ..Default::default()
                    }),
                text(format!("{label} {}", rgb.to_hex())).size(12).color(colors::TEXT_PRIMARY),
            ]
            .spacing(8)
            .align_y(Alignment::Center),
        )
        .padding(Padding::from([6, 12]))
        .style(|_, _| button::Style {
            background: Some(iced::Background::Color(colors::BG_TERTIARY)),
            border: iced::Border { radius: 6.0.into(), color: colors::BORDER, width: 1.0 },
            ..Default::default()
        })
        .on_press(Message::TogglePicker(slot));

        if self.open_picker == Some(slot) {
            ColorPicker::new(
                true,
                preview,
                swatch,
                Message::PickerCancel,
                move |color| Message::PickerSubmit(slot, color),
            )
            .into()
        } else {
            swatch.into()
        }
    }
}

/// Card with a heading, matching the rest of the window
fn section<'a>(title: &'a str, body: Element<'a, Message>) -> Element<'a, Message> {
    container(
        column![
            text(title).size(14).color(colors::ACCENT),
            vertical_space().height(8),
            body,
        ]
        .spacing(4),
    )
    .padding(16)
    .width(Length::Fill)
    .style(|_| container::Style {
        background: Some(iced::Background::Color(colors::BG_SECONDARY)),
        border: iced::Border {
            color: colors::BORDER,
            width: 1.0,
            radius: 8.0.into(),
        },
        ..Default::default()
    })
    .into()
}

/// Editor contents as typed. `Content::text` pads the result with a final
/// newline, so join the lines instead.
fn editor_text(editor: &text_editor::Content) -> String {
    let mut text = String::new();
    for (i, line) in editor.lines().enumerate() {
        if i > 0 {
            text.push('\n');
        }
        text.push_str(&line);
    }
    text
}

fn number_input<'a>(
    label: &'a str,
    field: &'a NumberField,
    on_input: fn(String) -> Message,
) -> Element<'a, Message> {
    row![
        text(label).size(11).color(colors::TEXT_MUTED),
        text_input("0", field.buffer()).on_input(on_input).width(70),
    ]
    .spacing(6)
    .align_y(Alignment::Center)
    .into()
}

fn small_button(label: &str, message: Message) -> Element<'_, Message> {
    button(text(label).size(11))
        .padding(Padding::from([6, 10]))
        .style(|_, s| {
            let bg = match s {
                button::Status::Hovered | button::Status::Pressed => colors::BG_HOVER,
                _ => colors::BG_TERTIARY,
            };
            button::Style {
                background: Some(iced::Background::Color(bg)),
                text_color: colors::TEXT_PRIMARY,
                border: iced::Border { radius: 4.0.into(), ..Default::default() },
                ..Default::default()
            }
        })
        .on_press(message)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use textoverlay::{Config, DisplaySettings};

    fn window() -> SettingsWindow {
        let ctx = AppContext {
            display: DisplaySettings::default(),
            config: Config::default(),
            text: "start".into(),
        };
        SettingsWindow::new(&ctx)
    }

    #[test]
    fn picker_toggles_and_switches() {
        let mut settings = window();
        settings.toggle_picker(ColorSlot::Fill);
        assert_eq!(settings.open_picker, Some(ColorSlot::Fill));
        settings.toggle_picker(ColorSlot::Outline);
        assert_eq!(settings.open_picker, Some(ColorSlot::Outline));
        settings.toggle_picker(ColorSlot::Outline);
        assert_eq!(settings.open_picker, None);
    }

    #[test]
    fn submit_sets_color_and_closes() {
        let mut settings = window();
        settings.toggle_picker(ColorSlot::Outline);
        settings.submit_color(ColorSlot::Outline, Rgb::new(1, 2, 3));
        assert_eq!(settings.form.color2, Rgb::new(1, 2, 3));
        assert_eq!(settings.open_picker, None);
    }

    #[test]
    fn set_text_updates_form_and_editor() {
        let mut settings = window();
        settings.set_text("from file");
        assert_eq!(settings.form.text, "from file");
        assert_eq!(editor_text(&settings.editor), "from file");
    }

    #[test]
    fn edit_and_undo_keeps_text_unchanged() {
        use text_editor::{Action, Edit};

        let mut settings = window();
        settings.perform(Action::Edit(Edit::Insert('x')));
        assert_eq!(settings.form.text, "xstart");
        settings.perform(Action::Edit(Edit::Backspace));
        assert_eq!(settings.form.text, "start");
    }

    #[test]
    fn trailing_newline_survives_editing() {
        use text_editor::{Action, Edit};

        let mut settings = window();
        settings.set_text("line\n");
        settings.perform(Action::Edit(Edit::Insert('x')));
        settings.perform(Action::Edit(Edit::Backspace));
        assert_eq!(settings.form.text, "line\n");
    }

    #[test]
    fn editor_text_keeps_final_newline_as_loaded() {
        assert_eq!(editor_text(&text_editor::Content::with_text("hello")), "hello");
        assert_eq!(editor_text(&text_editor::Content::with_text("line\n")), "line\n");
        assert_eq!(editor_text(&text_editor::Content::with_text("a\nb")), "a\nb");
    }

    #[test]
    fn starts_at_saved_position() {
        assert_eq!(window().position(), (50, 50));
    }
}
