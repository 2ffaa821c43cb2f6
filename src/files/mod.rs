//! File operations module for Mdpad
//!
//! This module provides the production collaborators for the lifecycle
//! controller: native file dialogs, the save-changes prompt, and disk I/O.

pub mod dialogs;
mod disk;

pub use dialogs::{NativeConfirmPrompt, NativeFilePicker};
pub use disk::DiskFileSystem;
