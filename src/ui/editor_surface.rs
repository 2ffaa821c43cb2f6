//! The editor text area as seen by the lifecycle controller.
//!
//! `EditorSurface` is a shared handle: the controller owns one clone as its
//! `DisplaySurface`, the app keeps another to render the text widget.

use crate::lifecycle::DisplaySurface;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct SurfaceState {
    text: String,
    /// Set once the first frame with the editor has been painted
    shown: bool,
    /// Bumped whenever the controller replaces the text
    version: u64,
}

/// Shared buffer behind the editor widget.
#[derive(Debug, Clone, Default)]
pub struct EditorSurface {
    inner: Rc<RefCell<SurfaceState>>,
}

impl EditorSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with mutable access to the displayed text.
    ///
    /// The borrow ends when `f` returns; do not call into the controller from `f`.
    pub fn with_text<R>(&self, f: impl FnOnce(&mut String) -> R) -> R {
        f(&mut self.inner.borrow_mut().text)
    }

    /// Record that the window has been shown to the user.
    pub fn mark_shown(&self) {
        self.inner.borrow_mut().shown = true;
    }

    /// Counter that changes whenever the text is replaced from outside the widget.
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    fn replace(&self, text: &str) {
        let mut state = self.inner.borrow_mut();
        state.text.clear();
        state.text.push_str(text);
        state.version = state.version.wrapping_add(1);
    }
}

impl DisplaySurface for EditorSurface {
    fn on_open(&mut self, content: &str) {
        self.replace(content);
    }

    fn on_new(&mut self) {
        self.replace("");
    }

    /// True from the first painted frame onwards.
    ///
    /// Minimizing or hiding the window does not clear it, so only a quit
    /// requested before the first frame skips the save-changes prompt.
    fn is_visible(&self) -> bool {
        self.inner.borrow().shown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_buffer() {
        let surface = EditorSurface::new();
        let mut handle = surface.clone();

        handle.on_open("shared");
        assert_eq!(surface.with_text(|t| t.clone()), "shared");
        assert_eq!(surface.version(), 1);

        handle.on_new();
        assert_eq!(surface.with_text(|t| t.len()), 0);
        assert_eq!(surface.version(), 2);
    }

    #[test]
    fn test_widget_edits_do_not_bump_version() {
        let surface = EditorSurface::new();
        surface.with_text(|t| t.push_str("typed"));
        assert_eq!(surface.version(), 0);
        assert_eq!(surface.with_text(|t| t.clone()), "typed");
    }

    #[test]
    fn test_visible_only_after_first_frame() {
        let surface = EditorSurface::new();
        assert!(!surface.is_visible());
        surface.mark_shown();
        assert!(surface.is_visible());
    }

    #[test]
    fn test_visibility_survives_document_replacement() {
        let surface = EditorSurface::new();
        let mut handle = surface.clone();
        surface.mark_shown();

        handle.on_open("text");
        handle.on_new();
        surface.mark_shown();

        assert!(handle.is_visible());
    }
}
