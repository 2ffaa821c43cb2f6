//! Window title formatting.

use std::path::Path;

/// Bullet shown in front of the title while the document has unsaved changes.
pub const DIRTY_PREFIX: &str = "• ";

/// Build the window title for a document.
///
/// Returns `"<basename> - <app>"` when the document has a path and
/// `"<app>"` otherwise, prefixed with a bullet when dirty.
pub fn window_title(path: Option<&Path>, is_dirty: bool, app_name: &str) -> String {
    let prefix = if is_dirty { DIRTY_PREFIX } else { "" };

    let file_name = path
        .and_then(|p| p.file_name())
        .map(|name| name.to_string_lossy());

    match file_name {
        Some(name) => format!("{}{} - {}", prefix, name, app_name),
        None => format!("{}{}", prefix, app_name),
    }
}
