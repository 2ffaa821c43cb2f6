//! Document module for Mdpad
//!
//! This module owns the single open document: its path, buffer and
//! dirty flag, plus the window title derived from them.

mod state;
mod title;

pub use state::{DocumentObserver, DocumentSnapshot, DocumentState, DocumentUpdate};
