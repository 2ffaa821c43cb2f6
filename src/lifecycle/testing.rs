//! In-memory fakes for the lifecycle collaborators.
//!
//! Every fake is a cheap handle over shared state, so a test can hand one
//! clone to the controller and keep another to script answers and inspect
//! what happened.

use super::collaborators::{
    Collaborators, ConfirmPrompt, DisplaySurface, FileFilter, FilePicker, FileSystem,
};
use super::controller::LifecycleController;
use super::guard::GuardChoice;
use crate::document::{DocumentObserver, DocumentState};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

// ─────────────────────────────────────────────────────────────────────────────
// Observer
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChromeEvent {
    Title(String),
    SaveEnabled(bool),
}

#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Rc<RefCell<Vec<ChromeEvent>>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<ChromeEvent> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn last_title(&self) -> Option<String> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            ChromeEvent::Title(t) => Some(t.clone()),
            ChromeEvent::SaveEnabled(_) => None,
        })
    }

    pub fn last_save_enabled(&self) -> Option<bool> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            ChromeEvent::SaveEnabled(enabled) => Some(*enabled),
            ChromeEvent::Title(_) => None,
        })
    }
}

impl DocumentObserver for RecordingObserver {
    fn title_changed(&mut self, title: &str) {
        self.events
            .borrow_mut()
            .push(ChromeEvent::Title(title.to_string()));
    }

    fn save_enabled_changed(&mut self, enabled: bool) {
        self.events
            .borrow_mut()
            .push(ChromeEvent::SaveEnabled(enabled));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File System
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct MemoryFs {
    files: HashMap<PathBuf, String>,
    failing_writes: HashSet<PathBuf>,
    reads: Vec<PathBuf>,
    writes: Vec<(PathBuf, String)>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    inner: Rc<RefCell<MemoryFs>>,
}

impl MemoryFileSystem {
    pub fn insert(&self, path: impl Into<PathBuf>, content: &str) {
        self.inner
            .borrow_mut()
            .files
            .insert(path.into(), content.to_string());
    }

    pub fn fail_writes_to(&self, path: impl Into<PathBuf>) {
        self.inner.borrow_mut().failing_writes.insert(path.into());
    }

    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.inner.borrow().files.get(path.as_ref()).cloned()
    }

    pub fn reads(&self) -> Vec<PathBuf> {
        self.inner.borrow().reads.clone()
    }

    pub fn writes(&self) -> Vec<(PathBuf, String)> {
        self.inner.borrow().writes.clone()
    }
}

impl FileSystem for MemoryFileSystem {
    fn read(&mut self, path: &Path) -> io::Result<String> {
        let mut fs = self.inner.borrow_mut();
        fs.reads.push(path.to_path_buf());
        fs.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }

    fn write(&mut self, path: &Path, content: &str) -> io::Result<()> {
        let mut fs = self.inner.borrow_mut();
        if fs.failing_writes.contains(path) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
        }
        fs.writes.push((path.to_path_buf(), content.to_string()));
        fs.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Picker
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct Picks {
    open: VecDeque<Option<PathBuf>>,
    save: VecDeque<Option<PathBuf>>,
    open_calls: usize,
    save_calls: usize,
    last_dir: Option<PathBuf>,
    last_filters: Vec<&'static str>,
}

/// Answers picker requests from a script; an unscripted request is a cancel.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPicker {
    inner: Rc<RefCell<Picks>>,
}

impl ScriptedPicker {
    pub fn answer_open(&self, path: Option<&str>) {
        self.inner
            .borrow_mut()
            .open
            .push_back(path.map(PathBuf::from));
    }

    pub fn answer_save(&self, path: Option<&str>) {
        self.inner
            .borrow_mut()
            .save
            .push_back(path.map(PathBuf::from));
    }

    pub fn open_calls(&self) -> usize {
        self.inner.borrow().open_calls
    }

    pub fn save_calls(&self) -> usize {
        self.inner.borrow().save_calls
    }

    pub fn last_dir(&self) -> Option<PathBuf> {
        self.inner.borrow().last_dir.clone()
    }

    pub fn last_filters(&self) -> Vec<&'static str> {
        self.inner.borrow().last_filters.clone()
    }

    fn record(picks: &mut Picks, default_dir: Option<&Path>, filters: &[FileFilter]) {
        picks.last_dir = default_dir.map(Path::to_path_buf);
        picks.last_filters = filters.iter().map(|f| f.name).collect();
    }
}

impl FilePicker for ScriptedPicker {
    fn pick_open_path(
        &mut self,
        default_dir: Option<&Path>,
        filters: &[FileFilter],
    ) -> Option<PathBuf> {
        let mut picks = self.inner.borrow_mut();
        picks.open_calls += 1;
        Self::record(&mut picks, default_dir, filters);
        picks.open.pop_front().flatten()
    }

    fn pick_save_path(
        &mut self,
        default_dir: Option<&Path>,
        filters: &[FileFilter],
    ) -> Option<PathBuf> {
        let mut picks = self.inner.borrow_mut();
        picks.save_calls += 1;
        Self::record(&mut picks, default_dir, filters);
        picks.save.pop_front().flatten()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Confirmation Prompt
// ─────────────────────────────────────────────────────────────────────────────

/// Answers the save-changes prompt from a script.
///
/// Running out of answers fails the test: an unexpected prompt is a bug.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    answers: Rc<RefCell<VecDeque<GuardChoice>>>,
    asked: Rc<Cell<usize>>,
}

impl ScriptedPrompt {
    pub fn new(answers: impl IntoIterator<Item = GuardChoice>) -> Self {
        Self {
            answers: Rc::new(RefCell::new(answers.into_iter().collect())),
            asked: Rc::new(Cell::new(0)),
        }
    }

    pub fn answer(&self, choice: GuardChoice) {
        self.answers.borrow_mut().push_back(choice);
    }

    pub fn asked(&self) -> usize {
        self.asked.get()
    }
}

impl ConfirmPrompt for ScriptedPrompt {
    fn ask_save_changes(&mut self) -> GuardChoice {
        self.asked.set(self.asked.get() + 1);
        self.answers
            .borrow_mut()
            .pop_front()
            .expect("save-changes prompt shown without a scripted answer")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Display Surface
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEvent {
    Open(String),
    New,
}

#[derive(Debug, Clone)]
pub struct FakeDisplay {
    events: Rc<RefCell<Vec<DisplayEvent>>>,
    visible: Rc<Cell<bool>>,
}

impl Default for FakeDisplay {
    fn default() -> Self {
        Self {
            events: Rc::default(),
            visible: Rc::new(Cell::new(true)),
        }
    }
}

impl FakeDisplay {
    pub fn events(&self) -> Vec<DisplayEvent> {
        self.events.borrow().clone()
    }

    pub fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
    }
}

impl DisplaySurface for FakeDisplay {
    fn on_open(&mut self, content: &str) {
        self.events
            .borrow_mut()
            .push(DisplayEvent::Open(content.to_string()));
    }

    fn on_new(&mut self) {
        self.events.borrow_mut().push(DisplayEvent::New);
    }

    fn is_visible(&self) -> bool {
        self.visible.get()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Harness
// ─────────────────────────────────────────────────────────────────────────────

/// A controller wired to fakes, plus handles to those fakes.
pub struct Harness {
    pub controller: LifecycleController,
    pub fs: MemoryFileSystem,
    pub picker: ScriptedPicker,
    pub prompt: ScriptedPrompt,
    pub display: FakeDisplay,
    pub observer: RecordingObserver,
}

impl Harness {
    pub fn new() -> Self {
        let fs = MemoryFileSystem::default();
        let picker = ScriptedPicker::default();
        let prompt = ScriptedPrompt::default();
        let display = FakeDisplay::default();
        let observer = RecordingObserver::default();

        let document = DocumentState::new("Mdpad", Box::new(observer.clone()));
        let controller = LifecycleController::new(
            document,
            Collaborators {
                fs: Box::new(fs.clone()),
                picker: Box::new(picker.clone()),
                confirm: Box::new(prompt.clone()),
                display: Box::new(display.clone()),
            },
        );

        Self {
            controller,
            fs,
            picker,
            prompt,
            display,
            observer,
        }
    }

    /// A harness whose document was loaded from `path` and then edited.
    pub fn with_dirty_file(path: &str, saved: &str, edited: &str) -> Self {
        let mut harness = Self::new();
        harness.fs.insert(path, saved);
        harness
            .controller
            .open_file(Path::new(path))
            .expect("fixture file should open");
        harness.controller.apply_edit(edited.to_string());
        harness.observer.clear();
        harness
    }
}
