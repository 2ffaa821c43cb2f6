//! Window chrome that mirrors the document: title bar and Save action.

use crate::document::DocumentObserver;
use eframe::egui;
use log::debug;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Forwards document changes to the viewport title and the menu bar.
///
/// Clones share state, so the document can own one while the menu bar
/// reads `save_enabled` from another.
#[derive(Clone)]
pub struct WindowChrome {
    ctx: egui::Context,
    title: Rc<RefCell<String>>,
    save_enabled: Rc<Cell<bool>>,
}

impl WindowChrome {
    pub fn new(ctx: egui::Context, initial_title: impl Into<String>) -> Self {
        Self {
            ctx,
            title: Rc::new(RefCell::new(initial_title.into())),
            save_enabled: Rc::new(Cell::new(false)),
        }
    }

    /// Current window title.
    pub fn title(&self) -> String {
        self.title.borrow().clone()
    }

    /// Whether the Save menu item should be enabled.
    pub fn save_enabled(&self) -> bool {
        self.save_enabled.get()
    }
}

impl DocumentObserver for WindowChrome {
    fn title_changed(&mut self, title: &str) {
        if *self.title.borrow() == title {
            return;
        }
        debug!("Window title -> {:?}", title);
        *self.title.borrow_mut() = title.to_string();
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::Title(title.to_string()));
    }

    fn save_enabled_changed(&mut self, enabled: bool) {
        self.save_enabled.set(enabled);
    }
}
