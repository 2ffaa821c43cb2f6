//! Boundaries between the lifecycle controller and the outside world.
//!
//! The controller never touches the disk, native dialogs or widgets
//! directly. It talks to these traits, which the application wires to
//! `std::fs`, `rfd` and egui, and which tests replace with fakes.

use super::guard::GuardChoice;
use std::io;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// File Filters
// ─────────────────────────────────────────────────────────────────────────────

/// A named group of file extensions offered by the pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
}

const MARKDOWN_EXTENSIONS: &[&str] = &["md", "mkd", "mdown", "markdown"];
const TEXT_EXTENSIONS: &[&str] = &["txt", "text"];

/// Filters offered by both the open and the save picker, in display order.
pub const DOCUMENT_FILTERS: &[FileFilter] = &[
    FileFilter {
        name: "Markdown Files",
        extensions: MARKDOWN_EXTENSIONS,
    },
    FileFilter {
        name: "Text Files",
        extensions: TEXT_EXTENSIONS,
    },
    FileFilter {
        name: "All Files",
        extensions: &["*"],
    },
];

// ─────────────────────────────────────────────────────────────────────────────
// Collaborator Traits
// ─────────────────────────────────────────────────────────────────────────────

/// Whole-file reads and writes.
pub trait FileSystem {
    fn read(&mut self, path: &Path) -> io::Result<String>;
    fn write(&mut self, path: &Path, content: &str) -> io::Result<()>;
}

/// Native open/save pickers. `None` means the user cancelled.
pub trait FilePicker {
    fn pick_open_path(&mut self, default_dir: Option<&Path>, filters: &[FileFilter])
        -> Option<PathBuf>;
    fn pick_save_path(&mut self, default_dir: Option<&Path>, filters: &[FileFilter])
        -> Option<PathBuf>;
}

/// The modal "Save changes?" prompt.
///
/// Must block until answered. `Save` is the default option and dismissing
/// the prompt counts as `Cancel`.
pub trait ConfirmPrompt {
    fn ask_save_changes(&mut self) -> GuardChoice;
}

/// The widget that displays the document content.
pub trait DisplaySurface {
    /// Replace the displayed content with a freshly opened file.
    fn on_open(&mut self, content: &str);
    /// Clear the display for a new document.
    fn on_new(&mut self);
    /// Whether the window is currently shown to the user.
    fn is_visible(&self) -> bool;
}

/// Everything the controller needs from the outside world.
pub struct Collaborators {
    pub fs: Box<dyn FileSystem>,
    pub picker: Box<dyn FilePicker>,
    pub confirm: Box<dyn ConfirmPrompt>,
    pub display: Box<dyn DisplaySurface>,
}
