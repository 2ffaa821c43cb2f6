//! Document lifecycle for Mdpad
//!
//! This module mediates every transition of the open document (new, open,
//! save, quit) through the unsaved-changes guard, talking to disk, dialogs
//! and the editor widget only through the collaborator traits.

mod collaborators;
mod controller;
mod guard;

#[cfg(test)]
pub(crate) mod testing;

pub use collaborators::{
    Collaborators, ConfirmPrompt, DisplaySurface, FileFilter, FilePicker, FileSystem,
};
pub use controller::{FlowOutcome, LifecycleController, QuitDecision, SaveOutcome};
pub use guard::GuardChoice;
