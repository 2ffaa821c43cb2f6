//! About Panel Component for Mdpad
//!
//! A small modal window with the application name, version and copyright.

use eframe::egui::{self, Color32, RichText};

/// Where "Help > Markdown spec" points.
pub const MARKDOWN_SPEC_URL: &str = "https://github.github.com/gfm/";

/// Output from the about panel.
#[derive(Debug, Clone, Default)]
pub struct AboutPanelOutput {
    /// Whether the panel should be closed
    pub close_requested: bool,
}

/// About panel state.
#[derive(Debug, Clone)]
pub struct AboutPanel {
    app_name: String,
}

impl AboutPanel {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }

    /// Show the about panel as a modal window.
    pub fn show(&mut self, ctx: &egui::Context, is_dark: bool) -> AboutPanelOutput {
        let mut output = AboutPanelOutput::default();

        // Semi-transparent overlay blocks clicks on the editor behind
        let screen_rect = ctx.screen_rect();
        let overlay_color = if is_dark {
            Color32::from_rgba_unmultiplied(0, 0, 0, 180)
        } else {
            Color32::from_rgba_unmultiplied(0, 0, 0, 120)
        };

        egui::Area::new(egui::Id::new("about_overlay"))
            .order(egui::Order::Middle)
            .fixed_pos(screen_rect.min)
            .show(ctx, |ui| {
                let response = ui.allocate_response(screen_rect.size(), egui::Sense::click());
                ui.painter().rect_filled(screen_rect, 0.0, overlay_color);

                if response.clicked() {
                    output.close_requested = true;
                }
            });

        egui::Window::new(format!("About {}", self.app_name))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                    output.close_requested = true;
                }

                ui.vertical_centered(|ui| {
                    ui.add_space(8.0);
                    ui.heading(RichText::new(&self.app_name).size(24.0).strong());
                    ui.add_space(4.0);
                    ui.label(
                        RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                            .size(14.0)
                            .weak(),
                    );
                    ui.add_space(8.0);
                    ui.label(env!("CARGO_PKG_DESCRIPTION"));
                    ui.add_space(8.0);
                    ui.label(RichText::new(copyright_line()).small().weak());
                    ui.add_space(8.0);
                });

                ui.separator();

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Close").clicked() {
                        output.close_requested = true;
                    }
                });
            });

        output
    }
}

/// Copyright notice built from the package metadata.
fn copyright_line() -> String {
    format!("Copyright © {}", env!("CARGO_PKG_AUTHORS").replace(':', ", "))
}

/// Open the GitHub Flavored Markdown spec in the default browser.
pub fn open_markdown_spec() {
    if let Err(e) = open::that(MARKDOWN_SPEC_URL) {
        log::warn!("Failed to open {}: {}", MARKDOWN_SPEC_URL, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_default() {
        let output = AboutPanelOutput::default();
        assert!(!output.close_requested);
    }

    #[test]
    fn test_copyright_mentions_authors() {
        let line = copyright_line();
        assert!(line.starts_with("Copyright © "));
        assert!(line.len() > "Copyright © ".len());
    }
}
