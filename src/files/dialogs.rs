//! Native dialog integration using the rfd crate
//!
//! This module provides the open/save pickers and the "Save changes?"
//! prompt used by the lifecycle controller. All dialogs are blocking and
//! modal, so the document cannot change while one is open.

use crate::lifecycle::{ConfirmPrompt, FileFilter, FilePicker, GuardChoice};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use std::path::{Path, PathBuf};

const OPEN_TITLE: &str = "Open Markdown file";
const SAVE_TITLE: &str = "Save Markdown file";

const CONFIRM_TITLE: &str = "Save changes?";
const CONFIRM_MESSAGE: &str = "Save changes before closing?";

const SAVE_LABEL: &str = "Save";
const DISCARD_LABEL: &str = "Discard";
const CANCEL_LABEL: &str = "Cancel";

/// Build a file dialog with the given title, start directory and filters.
fn file_dialog(title: &str, default_dir: Option<&Path>, filters: &[FileFilter]) -> FileDialog {
    let mut dialog = FileDialog::new().set_title(title);

    for filter in filters {
        dialog = dialog.add_filter(filter.name, filter.extensions);
    }

    if let Some(dir) = default_dir {
        dialog = dialog.set_directory(dir);
    }

    dialog
}

/// Open/save pickers backed by the platform's native file dialogs.
#[derive(Debug, Default)]
pub struct NativeFilePicker;

impl FilePicker for NativeFilePicker {
    fn pick_open_path(
        &mut self,
        default_dir: Option<&Path>,
        filters: &[FileFilter],
    ) -> Option<PathBuf> {
        file_dialog(OPEN_TITLE, default_dir, filters).pick_file()
    }

    fn pick_save_path(
        &mut self,
        default_dir: Option<&Path>,
        filters: &[FileFilter],
    ) -> Option<PathBuf> {
        file_dialog(SAVE_TITLE, default_dir, filters).save_file()
    }
}

/// The three-way "Save changes?" prompt as a native message box.
///
/// rfd has no default-button setter, so Save takes the first (affirmative)
/// slot, which Windows and macOS make the default button.
#[derive(Debug, Default)]
pub struct NativeConfirmPrompt;

impl ConfirmPrompt for NativeConfirmPrompt {
    fn ask_save_changes(&mut self) -> GuardChoice {
        let result = MessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title(CONFIRM_TITLE)
            .set_description(CONFIRM_MESSAGE)
            .set_buttons(confirm_buttons())
            .show();

        choice_from_result(&result)
    }
}

/// Save, Discard, Cancel in the Yes, No, Cancel slots.
fn confirm_buttons() -> MessageButtons {
    MessageButtons::YesNoCancelCustom(
        SAVE_LABEL.to_string(),
        DISCARD_LABEL.to_string(),
        CANCEL_LABEL.to_string(),
    )
}

/// Map a message box result to a guard choice.
///
/// Backends report custom buttons either by label or as Yes/No/Cancel.
/// Anything else, including closing the box, is a cancel.
fn choice_from_result(result: &MessageDialogResult) -> GuardChoice {
    match result {
        MessageDialogResult::Yes => GuardChoice::Save,
        MessageDialogResult::No => GuardChoice::Discard,
        MessageDialogResult::Custom(label) if label == SAVE_LABEL => GuardChoice::Save,
        MessageDialogResult::Custom(label) if label == DISCARD_LABEL => GuardChoice::Discard,
        _ => GuardChoice::Cancel,
    }
}
