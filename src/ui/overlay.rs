// ui/overlay.rs - Transparent Overlay Window
//
// Frameless, always-on-top, transparent window hosting one text view.
// Edit mode: draggable, bordered, resizable from the bottom-right grip.
// Display mode: mouse passthrough and no chrome at all.

use iced::widget::{column, container, horizontal_space, mouse_area, row, Space};
use iced::{mouse, window, Border, Element, Length, Point, Size, Task};
use log::info;

use textoverlay::constants::overlay::{
    EDIT_BORDER_WIDTH, GRIP_SIZE, MIN_HEIGHT, MIN_WIDTH, PADDING,
};
use textoverlay::{AppContext, DisplaySettings, OverlayMode, WidgetType};

use super::theme::colors;
use super::{make_text_view, TextView};
use crate::Message;

/// Grip drag in progress: where the cursor and window started
#[derive(Debug, Clone, Copy)]
struct ResizeDrag {
    cursor_start: Point,
    size_start: Size,
}

pub struct OverlayWindow {
    id: Option<window::Id>,
    mode: OverlayMode,
    visible: bool,
    position: Point,
    size: Size,
    text_view: Box<dyn TextView>,
    resize: Option<ResizeDrag>,
}

impl OverlayWindow {
    pub fn new(ctx: &AppContext) -> Self {
        let display = &ctx.display;
        Self {
            id: None,
            mode: ctx.initial_mode(),
            visible: true,
            position: Point::new(display.x as f32, display.y as f32),
            size: Size::new(display.w as f32, display.h as f32),
            text_view: make_text_view(display.widget_type, &ctx.text, display),
            resize: None,
        }
    }

    pub fn id(&self) -> Option<window::Id> {
        self.id
    }

    pub fn is(&self, id: window::Id) -> bool {
        self.id == Some(id)
    }

    pub fn mode(&self) -> OverlayMode {
        self.mode
    }

    pub fn widget_type(&self) -> WidgetType {
        self.text_view.kind()
    }

    /// Open the window at the configured geometry
    pub fn open(&self) -> Task<window::Id> {
        let settings = window::Settings {
            size: self.size,
            min_size: Some(Size::new(MIN_WIDTH, MIN_HEIGHT)),
            position: window::Position::Specific(self.position),
            decorations: false,
            transparent: true,
            resizable: true,
            level: window::Level::AlwaysOnTop,
            visible: true,
            ..Default::default()
        };
        let (_, open_task) = window::open(settings);
        open_task
    }

    /// Record the id once the window exists and apply the starting mode
    pub fn opened(&mut self, id: window::Id) -> Task<Message> {
        self.id = Some(id);
        info!("Overlay window opened: {:?}, mode {:?}", id, self.mode);
        match self.mode {
            OverlayMode::Edit => window::disable_mouse_passthrough(id),
            OverlayMode::Display => window::enable_mouse_passthrough(id),
        }
    }

    pub fn closed(&mut self) {
        self.id = None;
        self.resize = None;
    }

    pub fn set_text(&mut self, text: &str) {
        self.text_view.set_text(text);
    }

    pub fn set_display_settings(&mut self, settings: &DisplaySettings) {
        self.text_view.set_display_settings(settings);
    }

    /// Swap the text view, keeping the current text and geometry
    pub fn change_widget_type(&mut self, kind: WidgetType, ctx: &AppContext) {
        if kind == self.widget_type() {
            return;
        }
        info!("Changing text view from {:?} to {:?}", self.widget_type(), kind);
        self.text_view = make_text_view(kind, &ctx.text, &ctx.display);
    }

    /// Switch between edit and display mode. The window is hidden while its
    /// input flags change and comes back at the same geometry.
    pub fn enter_edit_mode(&mut self, enabled: bool) -> Task<Message> {
        self.mode = OverlayMode::from_draggable(enabled);
        self.resize = None;
        info!("Overlay edit mode: {}", enabled);

        let Some(id) = self.id else {
            return Task::none();
        };

        let passthrough = if enabled {
            window::disable_mouse_passthrough(id)
        } else {
            window::enable_mouse_passthrough(id)
        };

        let hidden = window::change_mode(id, window::Mode::Hidden);
        let restore = window::move_to(id, self.position).chain(window::resize(id, self.size));
        if self.visible {
            hidden
                .chain(passthrough)
                .chain(restore)
                .chain(window::change_mode(id, window::Mode::Windowed))
        } else {
            hidden.chain(passthrough).chain(restore)
        }
    }

    pub fn set_visible(&mut self, visible: bool) -> Task<Message> {
        self.visible = visible;
        match self.id {
            Some(id) if visible => window::change_mode(id, window::Mode::Windowed),
            Some(id) => window::change_mode(id, window::Mode::Hidden),
            None => Task::none(),
        }
    }

    pub fn move_to(&mut self, x: i32, y: i32) -> Task<Message> {
        self.position = Point::new(x as f32, y as f32);
        match self.id {
            Some(id) => window::move_to(id, self.position),
            None => Task::none(),
        }
    }

    /// Window system reported a move
    pub fn moved(&mut self, position: Point) {
        self.position = position;
    }

    /// Window system reported a resize
    pub fn resized(&mut self, size: Size) {
        self.size = size;
    }

    pub fn drag(&self) -> Task<Message> {
        match self.id {
            Some(id) if self.mode.is_edit() => window::drag(id),
            _ => Task::none(),
        }
    }

    /// Grip pressed: remember where the cursor was
    pub fn begin_resize(&mut self, cursor: Point) {
        if self.mode.is_edit() {
            self.resize = Some(ResizeDrag {
                cursor_start: cursor,
                size_start: self.size,
            });
        }
    }

    pub fn is_resizing(&self) -> bool {
        self.resize.is_some()
    }

    /// Cursor moved inside the window while the grip is held. The window's
    /// top-left corner does not move, so window-relative cursor positions
    /// stay comparable.
    pub fn update_resize(&mut self, cursor: Point) -> Task<Message> {
        let (Some(drag), Some(id)) = (self.resize, self.id) else {
            return Task::none();
        };
        let size = resized_size(drag.size_start, drag.cursor_start, cursor);
        if size == self.size {
            return Task::none();
        }
        self.size = size;
        window::resize(id, size)
    }

    pub fn end_resize(&mut self) {
        self.resize = None;
    }

    pub fn view(&self) -> Element<'_, Message> {
        let edit_mode = self.mode.is_edit();
        let body = self.text_view.view(edit_mode);

        if !edit_mode {
            return container(body)
                .padding(PADDING)
                .width(Length::Fill)
                .height(Length::Fill)
                .into();
        }

        let text_area = mouse_area(
            container(body)
                .width(Length::Fill)
                .height(Length::Fill)
                .style(|_| container::Style {
                    background: Some(iced::Background::Color(colors::EDIT_TEXT_BG)),
                    border: Border {
                        color: colors::EDIT_BORDER,
                        width: 1.0,
                        radius: 0.0.into(),
                    },
                    ..Default::default()
                }),
        )
        .interaction(mouse::Interaction::Grab)
        .on_press(Message::DragOverlay);

        let grip = mouse_area(
            container(Space::new(GRIP_SIZE, GRIP_SIZE)).style(|_| container::Style {
                background: Some(iced::Background::Color(colors::EDIT_BORDER)),
                border: Border {
                    radius: 2.0.into(),
                    ..Default::default()
                },
                ..Default::default()
            }),
        )
        .interaction(mouse::Interaction::Crosshair)
        .on_press(Message::GripPressed);

        let content = column![text_area, row![horizontal_space(), grip]].spacing(2);

        container(content)
            .padding(PADDING)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_| container::Style {
                background: Some(iced::Background::Color(colors::EDIT_BG)),
                border: Border {
                    color: colors::EDIT_BORDER,
                    width: EDIT_BORDER_WIDTH,
                    radius: 0.0.into(),
                },
                ..Default::default()
            })
            .into()
    }
}

/// New window size for a grip drag, never below the minimum
fn resized_size(start: Size, cursor_start: Point, cursor: Point) -> Size {
    Size::new(
        (start.width + cursor.x - cursor_start.x).max(MIN_WIDTH),
        (start.height + cursor.y - cursor_start.y).max(MIN_HEIGHT),
    )
}
