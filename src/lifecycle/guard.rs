//! The unsaved-changes guard run before new, open and quit.

use super::collaborators::ConfirmPrompt;
use crate::document::DocumentSnapshot;
use log::debug;

/// The user's answer to "Save changes?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuardChoice {
    /// Throw away the unsaved changes and continue
    Discard,
    /// Abort the whole flow
    Cancel,
    /// Save first, then continue
    #[default]
    Save,
}

/// Decide whether a destructive action may proceed.
///
/// A clean document is discarded silently; only a dirty one prompts.
pub fn confirm_discard(document: &DocumentSnapshot, prompt: &mut dyn ConfirmPrompt) -> GuardChoice {
    if !document.is_dirty {
        // Nothing to lose
        return GuardChoice::Discard;
    }

    let choice = prompt.ask_save_changes();
    debug!("Save-changes prompt answered: {:?}", choice);
    choice
}
