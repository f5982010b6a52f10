// main.rs - TextOverlay Application Entry Point
//
// iced daemon with two windows: the transparent overlay that shows the text
// and the settings window that edits it. The application owns the shared
// `AppContext` and dispatches every message to the window it concerns.

use std::time::Instant;

use iced::keyboard::{self, Modifiers};
use iced::mouse::{self, ScrollDelta};
use iced::widget::{container, text, text_editor};
use iced::{daemon, event, window, Color, Element, Event, Point, Size, Subscription, Task, Theme};
use iced_aw::iced_fonts::REQUIRED_FONT_BYTES;
use log::{error, info, warn};

use textoverlay::constants::watcher::{POLL_INTERVAL, SAVEBACK_GRACE};
use textoverlay::{text_file, AppContext, ConfigStore, FileWatcher, WidgetType};

mod ui;

use ui::theme::from_color;
use ui::{ColorSlot, OverlayWindow, SettingsWindow};

#[derive(Debug, Clone)]
pub enum Message {
    // Window lifecycle
    OverlayOpened(window::Id),
    SettingsOpened(window::Id),
    WindowClosed(window::Id),
    WindowResized(window::Id, Size),
    WindowMoved(window::Id, Point),

    // Raw input routed to the overlay
    ModifiersChanged(Modifiers),
    WheelScrolled(window::Id, ScrollDelta),
    CursorMoved(window::Id, Point),
    MouseReleased(window::Id),
    DragOverlay,
    GripPressed,

    // Watcher
    Tick,
    ResumeWatcher(u64),

    // Settings form
    EditorAction(text_editor::Action),
    SetX(String),
    SetY(String),
    SetWidgetType(WidgetType),
    SetOutlineSize(String),
    SetFontName(String),
    SetFontSize(String),
    SetLineSpace(String),
    TogglePicker(ColorSlot),
    PickerCancel,
    PickerSubmit(ColorSlot, Color),
    SetDraggable(bool),
    SetShowOverlay(bool),
    SetWatchFile(bool),
    SetWatchPath(String),
    ChangeWatchPath,
    BrowseWatchPath,
    SetSaveBack(bool),
    ApplySettings,
    Exit,
}

struct TextOverlayApp {
    ctx: AppContext,
    store: ConfigStore,
    watcher: FileWatcher,
    overlay: OverlayWindow,
    settings: SettingsWindow,
    modifiers: Modifiers,
    /// Last cursor position inside the overlay, window-relative
    overlay_cursor: Point,
}

impl TextOverlayApp {
    fn new() -> (Self, Task<Message>) {
        let mut store = ConfigStore::new(ConfigStore::default_path());
        let config = store.load();
        let ctx = AppContext::from_config(config);
        info!(
            "Overlay at ({}, {}) size {}x{}, text from {:?}",
            ctx.display.x, ctx.display.y, ctx.display.w, ctx.display.h, ctx.display.text_file_path
        );

        let mut watcher = FileWatcher::new(ctx.display.text_file_path.clone(), ctx.text.clone());
        if ctx.config.watch_file && !ctx.config.text_file_path.trim().is_empty() {
            if let Err(e) = watcher.start(ctx.display.text_file_path.clone()) {
                error!("Failed to start file watcher: {:#}", e);
            }
        }

        let overlay = OverlayWindow::new(&ctx);
        let settings = SettingsWindow::new(&ctx);

        let open = Task::batch([
            overlay.open().map(Message::OverlayOpened),
            settings.open().map(Message::SettingsOpened),
        ]);

        let app = Self {
            ctx,
            store,
            watcher,
            overlay,
            settings,
            modifiers: Modifiers::default(),
            overlay_cursor: Point::ORIGIN,
        };
        (app, open)
    }

    fn title(&self, id: window::Id) -> String {
        if self.overlay.is(id) {
            "Text Overlay".to_string()
        } else {
            "Text Overlay Settings".to_string()
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::OverlayOpened(id) => return self.overlay.opened(id),
            Message::SettingsOpened(id) => {
                info!("Settings window opened: {:?}", id);
                self.settings.opened(id);
            }
            Message::WindowClosed(id) => {
                if self.settings.is(id) {
                    info!("Settings window closed, exiting");
                    return self.exit();
                }
                if self.overlay.is(id) {
                    self.overlay.closed();
                }
            }
            Message::WindowResized(id, size) => {
                if self.overlay.is(id) {
                    self.overlay.resized(size);
                    self.ctx.set_overlay_size(size.width as i32, size.height as i32);
                }
            }
            Message::WindowMoved(id, position) => {
                if self.overlay.is(id) {
                    let (x, y) = (position.x as i32, position.y as i32);
                    self.overlay.moved(position);
                    self.ctx.set_overlay_position(x, y);
                    self.settings.form.set_overlay_position(x, y);
                } else if self.settings.is(id) {
                    self.settings.moved(position);
                }
            }

            Message::ModifiersChanged(modifiers) => self.modifiers = modifiers,
            Message::WheelScrolled(id, delta) => {
                if !self.overlay.is(id) || !self.modifiers.control() {
                    return Task::none();
                }
                let y = match delta {
                    ScrollDelta::Lines { y, .. } | ScrollDelta::Pixels { y, .. } => y,
                };
                if y != 0.0 {
                    let size = self.ctx.display.step_font_size(y > 0.0);
                    self.settings.form.set_font_size(size);
                    self.overlay.set_display_settings(&self.ctx.display);
                }
            }
            Message::CursorMoved(id, position) => {
                if self.overlay.is(id) {
                    self.overlay_cursor = position;
                    if self.overlay.is_resizing() {
                        return self.overlay.update_resize(position);
                    }
                }
            }
            Message::MouseReleased(id) => {
                if self.overlay.is(id) {
                    self.overlay.end_resize();
                }
            }
            Message::DragOverlay => return self.overlay.drag(),
            Message::GripPressed => self.overlay.begin_resize(self.overlay_cursor),

            Message::Tick => {
                if let Some(contents) = self.watcher.poll(Instant::now()) {
                    if self.ctx.accept_watched_text(&contents) {
                        info!("Watched file changed, {} bytes", contents.len());
                        self.overlay.set_text(&self.ctx.text);
                        self.settings.set_text(&self.ctx.text);
                    }
                }
            }
            Message::ResumeWatcher(token) => {
                self.watcher.resume_after_write(token);
            }

            Message::EditorAction(action) => self.settings.perform(action),
            Message::SetX(value) => self.settings.form.x.set_input(&value),
            Message::SetY(value) => self.settings.form.y.set_input(&value),
            Message::SetWidgetType(kind) => self.settings.form.widget_type = kind,
            Message::SetOutlineSize(value) => self.settings.form.outline_size.set_input(&value),
            Message::SetFontName(value) => self.settings.form.font_name = value,
            Message::SetFontSize(value) => self.settings.form.font_size.set_input(&value),
            Message::SetLineSpace(value) => self.settings.form.line_space.set_input(&value),
            Message::TogglePicker(slot) => self.settings.toggle_picker(slot),
            Message::PickerCancel => self.settings.close_picker(),
            Message::PickerSubmit(slot, color) => {
                self.settings.submit_color(slot, from_color(color));
            }

            Message::SetDraggable(enabled) => {
                self.settings.form.draggable = enabled;
                self.ctx.config.draggable = enabled;
                if self.overlay.mode().is_edit() != enabled {
                    return self.overlay.enter_edit_mode(enabled);
                }
            }
            Message::SetShowOverlay(visible) => {
                self.settings.form.show_overlay = visible;
                return self.overlay.set_visible(visible);
            }
            Message::SetWatchFile(enabled) => {
                self.settings.form.watch_file = enabled;
                self.ctx.config.watch_file = enabled;
                if enabled {
                    self.start_watcher();
                } else {
                    self.watcher.stop();
                    self.settings.set_status("Stopped watching");
                }
            }
            Message::SetWatchPath(path) => self.settings.form.watch_path = path,
            Message::ChangeWatchPath => self.change_watch_path(),
            Message::BrowseWatchPath => {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Text", &["txt"])
                    .add_filter("All files", &["*"])
                    .pick_file()
                {
                    self.settings.form.watch_path = path.display().to_string();
                    self.change_watch_path();
                }
            }
            Message::SetSaveBack(enabled) => self.settings.form.save_back = enabled,

            Message::ApplySettings => return self.apply_settings(),
            Message::Exit => return self.exit(),
        }
        Task::none()
    }

    /// Copy the form into the context, push it to the overlay and persist
    fn apply_settings(&mut self) -> Task<Message> {
        let settings_pos = self.settings.position();
        let outcome = self.settings.form.apply(&mut self.ctx, settings_pos);

        let mut tasks = Vec::new();
        if outcome.widget_type_changed {
            self.overlay
                .change_widget_type(self.ctx.display.widget_type, &self.ctx);
        }
        if outcome.text_changed {
            self.overlay.set_text(&self.ctx.text);
        }
        if outcome.write_back {
            tasks.push(self.save_back());
        }

        self.overlay.set_display_settings(&self.ctx.display);
        tasks.push(self.overlay.move_to(self.ctx.display.x, self.ctx.display.y));

        match self.store.save(&self.ctx.config) {
            Ok(true) => self.settings.set_status("Settings saved"),
            Ok(false) => self.settings.set_status("No changes to save"),
            Err(e) => {
                error!("Failed to save settings: {:#}", e);
                self.settings.set_status("Saving settings failed");
            }
        }

        Task::batch(tasks)
    }

    /// Write the current text to the watched file without the watcher
    /// reporting it back, then resume after a grace period.
    fn save_back(&mut self) -> Task<Message> {
        let path = self.ctx.display.text_file_path.clone();
        let token = self.watcher.pause_for_write();
        match text_file::save_text(&path, &self.ctx.text) {
            Ok(()) => info!("Saved text back to {:?}", path),
            Err(e) => error!("{:#}", e),
        }
        self.watcher.set_last_contents(self.ctx.text.clone());
        Task::perform(tokio::time::sleep(SAVEBACK_GRACE), move |_| {
            Message::ResumeWatcher(token)
        })
    }

    fn start_watcher(&mut self) {
        let path = self.settings.form.watch_path.trim().to_string();
        if path.is_empty() {
            warn!("Watch requested with an empty path");
            self.settings.set_status("Enter a file path to watch");
            return;
        }
        match self.watcher.start(path.as_str()) {
            Ok(()) => self.settings.set_status(format!("Watching {}", path)),
            Err(e) => {
                error!("Failed to start file watcher: {:#}", e);
                self.settings.set_status("Could not watch that file");
            }
        }
    }

    fn change_watch_path(&mut self) {
        let path = self.settings.form.watch_path.trim().to_string();
        if path.is_empty() {
            self.settings.set_status("Enter a file path to watch");
            return;
        }
        info!("Watch path changed to {}", path);
        self.ctx.display.text_file_path = path.clone().into();
        self.ctx.config.text_file_path = path;
        if self.settings.form.watch_file {
            self.start_watcher();
        }
    }

    fn exit(&mut self) -> Task<Message> {
        self.watcher.stop();
        let closes = [self.overlay.id(), self.settings.id()]
            .into_iter()
            .flatten()
            .map(window::close);
        Task::batch(closes).chain(iced::exit())
    }

    fn view(&self, id: window::Id) -> Element<'_, Message> {
        if self.overlay.is(id) {
            self.overlay.view()
        } else if self.settings.is(id) {
            self.settings.view(self.watch_state())
        } else {
            container(text("")).into()
        }
    }

    /// Short watcher status for the settings window
    fn watch_state(&self) -> String {
        if !self.watcher.is_running() {
            "stopped".to_string()
        } else if self.watcher.is_paused() {
            "paused while saving".to_string()
        } else {
            format!("watching {}", self.watcher.path().display())
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        let mut subs = vec![];

        if self.watcher.is_running() {
            subs.push(iced::time::every(POLL_INTERVAL).map(|_| Message::Tick));
        }

        subs.push(window::resize_events().map(|(id, size)| Message::WindowResized(id, size)));
        subs.push(window::close_events().map(Message::WindowClosed));
        subs.push(event::listen_with(route_event));

        Subscription::batch(subs)
    }

    fn theme(&self, _window_id: window::Id) -> Theme {
        Theme::Dark
    }
}

/// Raw events the widgets do not hand out themselves
fn route_event(event: Event, _status: event::Status, id: window::Id) -> Option<Message> {
    match event {
        Event::Keyboard(keyboard::Event::ModifiersChanged(modifiers)) => {
            Some(Message::ModifiersChanged(modifiers))
        }
        Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
            Some(Message::WheelScrolled(id, delta))
        }
        Event::Mouse(mouse::Event::CursorMoved { position }) => {
            Some(Message::CursorMoved(id, position))
        }
        Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
            Some(Message::MouseReleased(id))
        }
        Event::Window(window::Event::Moved(position)) => Some(Message::WindowMoved(id, position)),
        _ => None,
    }
}

fn main() -> iced::Result {
    // Initialize logger with wgpu warnings filtered out
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("wgpu_hal", log::LevelFilter::Error)
        .filter_module("wgpu_core", log::LevelFilter::Error)
        .filter_module("naga", log::LevelFilter::Error)
        .init();
    info!("TextOverlay starting...");

    daemon(
        TextOverlayApp::title,
        TextOverlayApp::update,
        TextOverlayApp::view,
    )
    .font(REQUIRED_FONT_BYTES)
    .subscription(TextOverlayApp::subscription)
    .theme(TextOverlayApp::theme)
    .style(|_, theme| iced::daemon::Appearance {
        background_color: Color::TRANSPARENT,
        text_color: theme.palette().text,
    })
    .run_with(TextOverlayApp::new)
}
