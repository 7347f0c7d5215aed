use std::cell::RefCell;
use std::fmt;
use std::path::Path;
use std::rc::Rc;

use serde_json::Value;
use tracing::debug;

use crate::store::{get_localized, set_localized};
use crate::{AnswerPath, AnswerStore, Answers, JsonFileStore, MemoryStore, StoreError};

/// Directory under the home directory used by [`Session::open_default`].
pub const DEFAULT_DIR: &str = ".questioner";

/// File name of the cross-project store.
pub const GLOBAL_FILE: &str = "globals.json";

/// Answers shared by every question set created from the same session.
///
/// A session bundles the in-process answer cache with the three stores that
/// outlive the process:
///
/// - the project store, holding each question's answers and defaults
/// - the global store, holding values shared across projects
/// - the hint store, holding the last answer seen for each question
///
/// Cloning a session is cheap and yields a handle to the same state, so two
/// question sets built from clones see each other's answers.
///
/// The in-process answers are keyed by name only. Locale and scope partition
/// the stores, not this cache, so an answer given under one locale is reused
/// under another for the rest of the session.
#[derive(Clone)]
pub struct Session {
    state: Rc<RefCell<SessionState>>,
}

struct SessionState {
    answers: Answers,
    project: Box<dyn AnswerStore>,
    global: Box<dyn AnswerStore>,
    hints: Box<dyn AnswerStore>,
}

impl Session {
    /// Create a session over the given stores.
    pub fn new(
        project: impl AnswerStore + 'static,
        global: impl AnswerStore + 'static,
        hints: impl AnswerStore + 'static,
    ) -> Self {
        Self {
            state: Rc::new(RefCell::new(SessionState {
                answers: Answers::new(),
                project: Box::new(project),
                global: Box::new(global),
                hints: Box::new(hints),
            })),
        }
    }

    /// Create a session that keeps everything in memory.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new(), MemoryStore::new(), MemoryStore::new())
    }

    /// Open file-backed stores for `project` in `dir`.
    ///
    /// Uses `<project>.json`, `<project>.hints.json` and `globals.json`.
    pub fn open(dir: impl AsRef<Path>, project: &str) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        debug!(dir = %dir.display(), project, "opening session");
        Ok(Self::new(
            JsonFileStore::open(dir.join(format!("{project}.json")))?,
            JsonFileStore::open(dir.join(GLOBAL_FILE))?,
            JsonFileStore::open(dir.join(format!("{project}.hints.json")))?,
        ))
    }

    /// Open file-backed stores for `project` in `~/.questioner`.
    pub fn open_default(project: &str) -> Result<Self, StoreError> {
        let dir = dirs::home_dir().unwrap_or_default().join(DEFAULT_DIR);
        Self::open(dir, project)
    }

    /// A snapshot of the answers accumulated in this session.
    pub fn answers(&self) -> Answers {
        self.state.borrow().answers.clone()
    }

    /// Fold `value` into the session answers under `name`.
    pub fn set_answer(&self, name: impl Into<AnswerPath>, value: impl Into<Value>) {
        self.state.borrow_mut().answers.insert(name, value);
    }

    /// Get the session answer under `name`.
    pub fn get_answer(&self, name: &AnswerPath) -> Option<Value> {
        self.state.borrow().answers.get(name).cloned()
    }

    /// Check if the session holds an answer under `name`.
    pub fn has_answer(&self, name: &AnswerPath) -> bool {
        self.state.borrow().answers.contains(name)
    }

    /// Remove the session answer under `name`.
    pub fn remove_answer(&self, name: &AnswerPath) -> Option<Value> {
        self.state.borrow_mut().answers.remove(name)
    }

    /// Forget every session answer. Stores are not touched.
    pub fn clear_answers(&self) {
        self.state.borrow_mut().answers.clear();
    }

    pub(crate) fn load_record(&self, name: &str) -> Result<Option<Value>, StoreError> {
        self.state.borrow().project.get(name)
    }

    pub(crate) fn save_record(&self, name: &str, record: Value) -> Result<(), StoreError> {
        self.state.borrow_mut().project.set(name, record)
    }

    pub(crate) fn delete_record(&self, name: &str) -> Result<(), StoreError> {
        self.state.borrow_mut().project.del(name)
    }

    pub(crate) fn global(&self, name: &str, locale: &str) -> Result<Option<Value>, StoreError> {
        get_localized(self.state.borrow().global.as_ref(), name, locale)
    }

    pub(crate) fn set_global(&self, name: &str, locale: &str, value: Value) -> Result<(), StoreError> {
        set_localized(self.state.borrow_mut().global.as_mut(), name, locale, value)
    }

    pub(crate) fn hint(&self, name: &str, locale: &str) -> Result<Option<Value>, StoreError> {
        get_localized(self.state.borrow().hints.as_ref(), name, locale)
    }

    pub(crate) fn set_hint(&self, name: &str, locale: &str, value: Value) -> Result<(), StoreError> {
        set_localized(self.state.borrow_mut().hints.as_mut(), name, locale, value)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("answers", &self.state.borrow().answers)
            .finish_non_exhaustive()
    }
}
