//! The single open document and its mutation rules.
//!
//! `DocumentState` is the only source of truth for the current path, the
//! in-memory buffer and the dirty flag. Every mutation goes through
//! [`DocumentState::set`], which notifies the [`DocumentObserver`] before
//! returning so that the window title and the Save action never lag behind.

use super::title::window_title;
use log::debug;
use std::fmt;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Snapshot & Update
// ─────────────────────────────────────────────────────────────────────────────

/// Immutable view of the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSnapshot {
    /// File location (None for new, never-saved documents)
    pub path: Option<PathBuf>,
    /// Current buffer content
    pub data: String,
    /// Whether `data` differs from the last loaded or saved content
    pub is_dirty: bool,
}

/// A partial update merged into the document by [`DocumentState::set`].
///
/// Fields left as `None` are not touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentUpdate {
    pub path: Option<Option<PathBuf>>,
    pub data: Option<String>,
    pub is_dirty: Option<bool>,
}

impl DocumentUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// An update that returns every field to the initial empty document.
    pub fn initial() -> Self {
        Self {
            path: Some(None),
            data: Some(String::new()),
            is_dirty: Some(false),
        }
    }

    pub fn path(mut self, path: Option<PathBuf>) -> Self {
        self.path = Some(path);
        self
    }

    pub fn data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn dirty(mut self, is_dirty: bool) -> Self {
        self.is_dirty = Some(is_dirty);
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Observer
// ─────────────────────────────────────────────────────────────────────────────

/// Receives UI-facing consequences of document changes.
///
/// Implemented by the window layer; the document never reaches into UI internals.
pub trait DocumentObserver {
    /// The window title must change to `title`.
    fn title_changed(&mut self, title: &str);

    /// The Save action must become enabled or disabled.
    fn save_enabled_changed(&mut self, enabled: bool);
}

// ─────────────────────────────────────────────────────────────────────────────
// Document State
// ─────────────────────────────────────────────────────────────────────────────

/// Owner of the open document.
pub struct DocumentState {
    snapshot: DocumentSnapshot,
    /// Content at the last successful load, save or reset
    baseline: String,
    app_name: String,
    observer: Box<dyn DocumentObserver>,
}

impl DocumentState {
    /// Create the initial, empty, clean document.
    pub fn new(app_name: impl Into<String>, observer: Box<dyn DocumentObserver>) -> Self {
        Self {
            snapshot: DocumentSnapshot::default(),
            baseline: String::new(),
            app_name: app_name.into(),
            observer,
        }
    }

    /// Current snapshot of the document.
    pub fn get(&self) -> &DocumentSnapshot {
        &self.snapshot
    }

    /// Merge `update` into the document and return the new snapshot.
    ///
    /// Recomputes the title when the path or dirty flag is part of the update,
    /// and the Save action state when the dirty flag is.
    pub fn set(&mut self, update: DocumentUpdate) -> &DocumentSnapshot {
        let title_affected = update.path.is_some() || update.is_dirty.is_some();

        if let Some(path) = update.path {
            self.snapshot.path = path;
        }
        if let Some(data) = update.data {
            self.snapshot.data = data;
        }
        if let Some(is_dirty) = update.is_dirty {
            self.snapshot.is_dirty = is_dirty;
            if !is_dirty {
                // Clean means "matches what is on disk (or the empty document)"
                self.baseline.clone_from(&self.snapshot.data);
            }
        }

        if title_affected {
            let title = self.title();
            self.observer.title_changed(&title);
        }
        if let Some(is_dirty) = update.is_dirty {
            self.observer.save_enabled_changed(is_dirty);
        }

        &self.snapshot
    }

    /// Apply content edited in the display surface.
    ///
    /// The document is dirty iff the new content differs from the baseline.
    pub fn edit(&mut self, content: String) -> &DocumentSnapshot {
        let is_dirty = content != self.baseline;
        if is_dirty != self.snapshot.is_dirty {
            debug!("Document dirty flag -> {}", is_dirty);
        }
        self.set(DocumentUpdate::new().data(content).dirty(is_dirty))
    }

    /// Replace the document with the initial empty value.
    pub fn reset(&mut self) -> &DocumentSnapshot {
        self.set(DocumentUpdate::initial())
    }

    /// The window title for the current state.
    pub fn title(&self) -> String {
        window_title(
            self.snapshot.path.as_deref(),
            self.snapshot.is_dirty,
            &self.app_name,
        )
    }
}

impl fmt::Debug for DocumentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentState")
            .field("snapshot", &self.snapshot)
            .field("app_name", &self.app_name)
            .finish_non_exhaustive()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
