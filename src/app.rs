//! Main application module for Mdpad
//!
//! This module implements the eframe App trait for the main application,
//! wiring the lifecycle controller to the native dialogs, the disk, and the
//! egui widgets, and turning menu clicks and close requests into flows.

use crate::config::{save_config_silent, Settings, Theme, WindowSize};
use crate::document::DocumentState;
use crate::error::{Error, Result};
use crate::files::{DiskFileSystem, NativeConfirmPrompt, NativeFilePicker};
use crate::lifecycle::{
    Collaborators, ConfirmPrompt, FilePicker, FileSystem, FlowOutcome, LifecycleController,
    QuitDecision, SaveOutcome,
};
use crate::ui::{open_markdown_spec, AboutPanel, EditorSurface, WindowChrome};
use crate::APP_NAME;
use eframe::egui;
use log::{debug, error, info, warn};
use std::path::PathBuf;

/// Menu actions collected while rendering and executed afterwards.
///
/// Flows open blocking native dialogs, so they must not run while the
/// menu closure still borrows the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    New,
    Open,
    Save,
    Quit,
    MarkdownSpec,
    About,
}

/// What the window does with a close request once the quit flow has run.
#[derive(Debug)]
enum CloseResponse {
    Close,
    /// Keep the window open
    Cancel,
    /// Keep the window open and report the failed save
    CancelWithError(Error),
}

/// Map the quit flow result onto the window's reaction.
///
/// A failed save is a veto: the window stays open with the buffer intact.
fn close_response(result: Result<QuitDecision>) -> CloseResponse {
    match result {
        Ok(QuitDecision::Exit) => CloseResponse::Close,
        Ok(QuitDecision::Veto) => CloseResponse::Cancel,
        Err(e) => CloseResponse::CancelWithError(e),
    }
}

/// The viewport command that answers a close request, if any.
fn close_command(response: &CloseResponse) -> Option<egui::ViewportCommand> {
    match response {
        CloseResponse::Close => None,
        CloseResponse::Cancel | CloseResponse::CancelWithError(_) => {
            Some(egui::ViewportCommand::CancelClose)
        }
    }
}

/// The main application struct that holds all state and implements eframe::App.
pub struct MdpadApp {
    /// Document lifecycle (owns the document)
    controller: LifecycleController,
    /// Shared buffer rendered by the editor widget
    surface: EditorSurface,
    /// Title and Save-enabled mirror of the document
    chrome: WindowChrome,
    /// User settings (loaded from config)
    settings: Settings,
    about_panel: AboutPanel,
    show_about: bool,
    /// Message of an escalated flow error, shown in a modal
    error_message: Option<String>,
    /// File passed on the command line, opened after the first frame
    startup_file: Option<PathBuf>,
    /// Track if we should exit (after the quit flow allowed it)
    should_exit: bool,
    /// Last known window size (for detecting changes)
    last_window_size: Option<egui::Vec2>,
    /// Last known window position (for detecting changes)
    last_window_pos: Option<egui::Pos2>,
}

impl MdpadApp {
    /// Create a new MdpadApp instance.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        startup_file: Option<PathBuf>,
    ) -> Self {
        Self::with_collaborators(
            &cc.egui_ctx,
            settings,
            startup_file,
            Box::new(DiskFileSystem),
            Box::new(NativeFilePicker),
            Box::new(NativeConfirmPrompt),
        )
    }

    /// Create the app around the given disk and dialog collaborators.
    fn with_collaborators(
        ctx: &egui::Context,
        settings: Settings,
        startup_file: Option<PathBuf>,
        fs: Box<dyn FileSystem>,
        picker: Box<dyn FilePicker>,
        confirm: Box<dyn ConfirmPrompt>,
    ) -> Self {
        info!("Initializing {}", APP_NAME);

        apply_theme(ctx, settings.theme);

        let surface = EditorSurface::new();
        let chrome = WindowChrome::new(ctx.clone(), APP_NAME);
        let document = DocumentState::new(APP_NAME, Box::new(chrome.clone()));

        let controller = LifecycleController::new(
            document,
            Collaborators {
                fs,
                picker,
                confirm,
                display: Box::new(surface.clone()),
            },
        )
        .with_picker_directory(settings.picker_directory());

        Self {
            controller,
            surface,
            chrome,
            settings,
            about_panel: AboutPanel::new(APP_NAME),
            show_about: false,
            error_message: None,
            startup_file,
            should_exit: false,
            last_window_size: None,
            last_window_pos: None,
        }
    }

    /// Log an error from a flow and show it in the error modal.
    fn escalate(&mut self, context: &str, err: Error) {
        error!("{}: {}", context, err);
        self.error_message = Some(format!("{}:\n{}", context, err));
    }

    /// Update window size in settings if changed.
    fn update_window_state(&mut self, ctx: &egui::Context) {
        let mut changed = false;

        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                let current_size = rect.size();
                let current_pos = rect.min;

                let size_changed = self
                    .last_window_size
                    .map(|s| (s - current_size).length() > 1.0)
                    .unwrap_or(true);
                let pos_changed = self
                    .last_window_pos
                    .map(|p| (p - current_pos).length() > 1.0)
                    .unwrap_or(true);

                if size_changed || pos_changed {
                    self.last_window_size = Some(current_size);
                    self.last_window_pos = Some(current_pos);
                    changed = true;
                }
            }
        });

        if changed {
            if let (Some(size), Some(pos)) = (self.last_window_size, self.last_window_pos) {
                let maximized = ctx.input(|i| i.viewport().maximized.unwrap_or(false));
                self.settings.window_size = WindowSize {
                    width: size.x,
                    height: size.y,
                    x: Some(pos.x),
                    y: Some(pos.y),
                    maximized,
                };
                debug!(
                    "Window state updated: {}x{} at ({}, {}), maximized: {}",
                    size.x, size.y, pos.x, pos.y, maximized
                );
            }
        }
    }

    /// Open the command-line file once the editor is on screen.
    fn open_startup_file(&mut self) {
        if let Some(path) = self.startup_file.take() {
            info!("Opening startup file: {}", path.display());
            if let Err(e) = self.controller.open_file(&path) {
                self.escalate("Failed to open file", e);
            }
        }
    }

    /// Handle close request from the window.
    ///
    /// Returns the command to send back to the viewport, `None` to let it close.
    fn handle_close_request(&mut self) -> Option<egui::ViewportCommand> {
        if self.should_exit {
            return None;
        }

        let response = close_response(self.controller.quit_guarded());
        let command = close_command(&response);
        match response {
            CloseResponse::Close => self.should_exit = true,
            CloseResponse::Cancel => debug!("Close request cancelled"),
            CloseResponse::CancelWithError(e) => {
                self.escalate("Failed to save file before quitting", e)
            }
        }
        command
    }

    /// Run the flow behind a menu action.
    fn handle_menu_action(&mut self, action: MenuAction, ctx: &egui::Context) {
        debug!("Menu: {:?}", action);
        match action {
            MenuAction::New => match self.controller.new_file_guarded() {
                Ok(FlowOutcome::Completed) => {}
                Ok(FlowOutcome::Cancelled) => debug!("New document cancelled"),
                Err(e) => self.escalate("Failed to save file", e),
            },
            MenuAction::Open => match self.controller.open_file_guarded() {
                Ok(FlowOutcome::Completed) => {}
                Ok(FlowOutcome::Cancelled) => debug!("Open cancelled"),
                Err(e @ Error::FileRead { .. }) => self.escalate("Failed to open file", e),
                Err(e) => self.escalate("Failed to save file", e),
            },
            MenuAction::Save => match self.controller.save_file() {
                Ok(SaveOutcome::Saved(path)) => debug!("Saved {}", path.display()),
                Ok(SaveOutcome::Cancelled) => {}
                Err(e) => self.escalate("Failed to save file", e),
            },
            MenuAction::Quit => {
                // Goes through the same close-request path as the window's close button
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            MenuAction::MarkdownSpec => open_markdown_spec(),
            MenuAction::About => self.show_about = true,
        }
    }

    /// Render the menu bar and return the clicked action, if any.
    fn render_menu_bar(&mut self, ctx: &egui::Context) -> Option<MenuAction> {
        let mut action = None;
        let save_enabled = self.chrome.save_enabled();

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("New").clicked() {
                        action = Some(MenuAction::New);
                        ui.close_menu();
                    }
                    if ui.button("Open").clicked() {
                        action = Some(MenuAction::Open);
                        ui.close_menu();
                    }
                    if ui
                        .add_enabled(save_enabled, egui::Button::new("Save"))
                        .clicked()
                    {
                        action = Some(MenuAction::Save);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        action = Some(MenuAction::Quit);
                        ui.close_menu();
                    }
                });

                ui.menu_button("Help", |ui| {
                    if ui.button("Markdown spec").clicked() {
                        action = Some(MenuAction::MarkdownSpec);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("About").clicked() {
                        action = Some(MenuAction::About);
                        ui.close_menu();
                    }
                });
            });
        });

        action
    }

    /// Render the editor and feed edits back to the controller.
    fn render_editor(&mut self, ctx: &egui::Context) {
        let font = egui::FontId::monospace(self.settings.font_size);
        let word_wrap = self.settings.word_wrap;
        // A new id per replaced document drops stale cursor/undo state
        let editor_id = egui::Id::new(("editor", self.surface.version()));
        let surface = &self.surface;

        let edited = egui::CentralPanel::default()
            .show(ctx, |ui| {
                let scroll = if word_wrap {
                    egui::ScrollArea::vertical()
                } else {
                    egui::ScrollArea::both()
                };

                scroll
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        let width = if word_wrap {
                            ui.available_width()
                        } else {
                            f32::INFINITY
                        };
                        let min_rows = (ui.available_height() / font.size).max(1.0) as usize;

                        surface.with_text(|text| {
                            let response = ui.add(
                                egui::TextEdit::multiline(text)
                                    .id(editor_id)
                                    .font(font.clone())
                                    .frame(false)
                                    .desired_width(width)
                                    .desired_rows(min_rows)
                                    .lock_focus(true),
                            );
                            response.changed().then(|| text.clone())
                        })
                    })
                    .inner
            })
            .inner;

        if let Some(content) = edited {
            self.controller.apply_edit(content);
        }
    }

    /// Render modal windows.
    fn render_dialogs(&mut self, ctx: &egui::Context) {
        if let Some(message) = self.error_message.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(egui::RichText::new("⚠").size(24.0));
                    ui.label(message);
                    ui.separator();
                    if ui.button("OK").clicked() {
                        self.error_message = None;
                    }
                });
        }

        if self.show_about {
            let is_dark = ctx.style().visuals.dark_mode;
            let output = self.about_panel.show(ctx, is_dark);
            if output.close_requested {
                self.show_about = false;
            }
        }
    }
}

/// Apply the configured color theme to egui.
///
/// `System` keeps eframe's default, which follows the OS preference.
fn apply_theme(ctx: &egui::Context, theme: Theme) {
    match theme {
        Theme::Light => ctx.set_visuals(egui::Visuals::light()),
        Theme::Dark => ctx.set_visuals(egui::Visuals::dark()),
        Theme::System => {}
    }
}

impl eframe::App for MdpadApp {
    /// Called each time the UI needs repainting.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window size/position changes for persistence
        self.update_window_state(ctx);

        // Handle close request from window
        if ctx.input(|i| i.viewport().close_requested()) {
            if let Some(command) = self.handle_close_request() {
                ctx.send_viewport_cmd(command);
            }
        }

        let action = self.render_menu_bar(ctx);
        self.render_editor(ctx);
        self.render_dialogs(ctx);

        // The editor has been painted at least once from here on
        self.surface.mark_shown();
        self.open_startup_file();

        if let Some(action) = action {
            self.handle_menu_action(action, ctx);
        }
    }

    /// Called when the application is about to close.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application exiting");
        if self.controller.document().is_dirty {
            warn!("Discarding unsaved changes in '{}'", self.chrome.title());
        }
        save_config_silent(&self.settings);
    }
}
