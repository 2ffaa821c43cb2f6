//! Document lifecycle flows: new, open, save and quit.
//!
//! Every flow takes `&mut self` and runs to completion, including any modal
//! prompt and file I/O, before control returns to the event loop. The
//! collaborators hold no handle back to the controller, so a flow can never
//! be re-entered while another one is in flight.

use super::collaborators::{Collaborators, DOCUMENT_FILTERS};
use super::guard::{confirm_discard, GuardChoice};
use crate::document::{DocumentSnapshot, DocumentState, DocumentUpdate};
use crate::error::{Error, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Result of the save flow when no I/O error occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The buffer was written to this path
    Saved(PathBuf),
    /// The user closed the save picker without choosing a destination
    Cancelled,
}

/// Result of a guarded new/open flow when no I/O error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
    Completed,
    /// The user backed out at a prompt or picker; nothing changed
    Cancelled,
}

/// Whether the application may terminate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuitDecision {
    Exit,
    Veto,
}

/// Orchestrates user-initiated transitions of the open document.
pub struct LifecycleController {
    document: DocumentState,
    collaborators: Collaborators,
    /// Directory the pickers start in
    picker_dir: Option<PathBuf>,
}

impl LifecycleController {
    pub fn new(document: DocumentState, collaborators: Collaborators) -> Self {
        Self {
            document,
            collaborators,
            picker_dir: None,
        }
    }

    /// Set the directory the open/save pickers start in.
    pub fn with_picker_directory(mut self, dir: Option<PathBuf>) -> Self {
        self.picker_dir = dir;
        self
    }

    /// Current document snapshot.
    pub fn document(&self) -> &DocumentSnapshot {
        self.document.get()
    }

    /// Feed content edited in the display surface back into the document.
    pub fn apply_edit(&mut self, content: String) {
        self.document.edit(content);
    }

    /// Run the unsaved-changes guard against the current document.
    pub fn confirm_discard(&mut self) -> GuardChoice {
        confirm_discard(self.document.get(), self.collaborators.confirm.as_mut())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Open
    // ─────────────────────────────────────────────────────────────────────────

    /// Load `path` into the document without consulting the guard.
    ///
    /// Used for the startup argument and after the guard has already passed.
    /// On a read failure the document is left untouched.
    pub fn open_file(&mut self, path: &Path) -> Result<()> {
        let content = self
            .collaborators
            .fs
            .read(path)
            .map_err(|source| Error::FileRead {
                path: path.to_path_buf(),
                source,
            })?;

        self.document.set(
            DocumentUpdate::new()
                .path(Some(path.to_path_buf()))
                .data(content)
                .dirty(false),
        );
        self.collaborators.display.on_open(&self.document.get().data);

        info!("Opened file: {}", path.display());
        Ok(())
    }

    /// "File > Open": guard, pick a path, load it.
    pub fn open_file_guarded(&mut self) -> Result<FlowOutcome> {
        if !self.clear_to_proceed("open")? {
            return Ok(FlowOutcome::Cancelled);
        }

        let picked = self
            .collaborators
            .picker
            .pick_open_path(self.picker_dir.as_deref(), DOCUMENT_FILTERS);

        match picked {
            Some(path) => {
                self.open_file(&path)?;
                Ok(FlowOutcome::Completed)
            }
            None => {
                debug!("Open dialog cancelled");
                Ok(FlowOutcome::Cancelled)
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Save
    // ─────────────────────────────────────────────────────────────────────────

    /// "File > Save": write the buffer to its path, asking for one if needed.
    ///
    /// A write failure leaves path and dirty flag exactly as they were.
    pub fn save_file(&mut self) -> Result<SaveOutcome> {
        let (path, is_new_path) = match self.document.get().path.clone() {
            Some(path) => (path, false),
            None => {
                let picked = self
                    .collaborators
                    .picker
                    .pick_save_path(self.picker_dir.as_deref(), DOCUMENT_FILTERS);
                match picked {
                    Some(path) => (path, true),
                    None => {
                        debug!("Save dialog cancelled");
                        return Ok(SaveOutcome::Cancelled);
                    }
                }
            }
        };

        self.collaborators
            .fs
            .write(&path, &self.document.get().data)
            .map_err(|source| Error::FileWrite {
                path: path.clone(),
                source,
            })?;

        let update = if is_new_path {
            DocumentUpdate::new().path(Some(path.clone())).dirty(false)
        } else {
            DocumentUpdate::new().dirty(false)
        };
        self.document.set(update);

        info!("Saved file: {}", path.display());
        Ok(SaveOutcome::Saved(path))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // New
    // ─────────────────────────────────────────────────────────────────────────

    /// "File > New": guard, then replace the document with an empty one.
    pub fn new_file_guarded(&mut self) -> Result<FlowOutcome> {
        if !self.clear_to_proceed("new")? {
            return Ok(FlowOutcome::Cancelled);
        }

        self.document.reset();
        self.collaborators.display.on_new();
        info!("Started new document");
        Ok(FlowOutcome::Completed)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Quit
    // ─────────────────────────────────────────────────────────────────────────

    /// Decide whether an exit request may go ahead.
    ///
    /// An invisible window skips the guard entirely: there is no way to show
    /// a prompt, so unsaved changes are lost. An `Err` is a failed save and
    /// must be treated as a veto by the caller.
    pub fn quit_guarded(&mut self) -> Result<QuitDecision> {
        if !self.collaborators.display.is_visible() {
            info!("Window not visible, exiting without save-changes prompt");
            return Ok(QuitDecision::Exit);
        }

        if self.clear_to_proceed("quit")? {
            Ok(QuitDecision::Exit)
        } else {
            debug!("Exit vetoed");
            Ok(QuitDecision::Veto)
        }
    }

    /// Run the guard and, if asked to, the save flow.
    ///
    /// Returns `Ok(true)` when the destructive continuation of `flow` may run.
    fn clear_to_proceed(&mut self, flow: &str) -> Result<bool> {
        match self.confirm_discard() {
            GuardChoice::Discard => Ok(true),
            GuardChoice::Cancel => {
                debug!("{} cancelled at save-changes prompt", flow);
                Ok(false)
            }
            GuardChoice::Save => match self.save_file()? {
                SaveOutcome::Saved(_) => Ok(true),
                SaveOutcome::Cancelled => {
                    debug!("{} cancelled at save dialog", flow);
                    Ok(false)
                }
            },
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
