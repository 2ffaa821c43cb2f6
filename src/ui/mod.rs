//! UI components for Mdpad
//!
//! This module contains the egui-side pieces: the editor surface handed to
//! the lifecycle controller, the window chrome observer, and the About panel.

mod about;
mod chrome;
mod editor_surface;

pub use about::{open_markdown_spec, AboutPanel};
pub use chrome::WindowChrome;
pub use editor_surface::EditorSurface;
