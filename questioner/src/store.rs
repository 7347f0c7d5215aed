//! Answer stores.
//!
//! A store is a flat map of question name to JSON value. Three stores take part
//! in a session: the project store holds each question's [`AnswerRecord`]
//! (answers per locale and scope, plus defaults), while the global and hint
//! stores hold one value per locale.
//!
//! [`AnswerRecord`]: crate::AnswerRecord

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;

use crate::{AnswerStore, StoreError};

/// An in-memory store. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl AnswerStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn del(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

/// A store backed by a single JSON object on disk.
///
/// The file is read once when opened and rewritten after every change.
/// A missing or blank file is an empty store; parent directories are created
/// on first write.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonFileStore {
    /// Open the store at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let values = load_json_file(&path)?;
        debug!(path = %path.display(), keys = values.len(), "opened answer store");
        Ok(Self { path, values })
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All stored values.
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    fn save(&self) -> Result<(), StoreError> {
        save_json_file(&self.path, &self.values)
    }
}

impl AnswerStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        if self.values.get(key) == Some(&value) {
            return Ok(());
        }
        self.values.insert(key.to_string(), value);
        self.save()
    }

    fn del(&mut self, key: &str) -> Result<(), StoreError> {
        if self.values.remove(key).is_some() {
            self.save()?;
        }
        Ok(())
    }
}

fn load_json_file(path: &Path) -> Result<Map<String, Value>, StoreError> {
    if !path.exists() {
        return Ok(Map::new());
    }

    let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if content.trim().is_empty() {
        return Ok(Map::new());
    }

    Ok(serde_json::from_str(&content)?)
}

fn save_json_file(path: &Path, values: &Map<String, Value>) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StoreError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let content = serde_json::to_string_pretty(values)?;
    fs::write(path, content).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Saved answers to {}", path.display());
    Ok(())
}

/// Read the value stored for `locale` under `key` in a per-locale store.
pub(crate) fn get_localized(
    store: &dyn AnswerStore,
    key: &str,
    locale: &str,
) -> Result<Option<Value>, StoreError> {
    Ok(store
        .get(key)?
        .and_then(|entry| entry.get(locale).cloned()))
}

/// Store `value` for `locale` under `key`, keeping the other locales.
pub(crate) fn set_localized(
    store: &mut dyn AnswerStore,
    key: &str,
    locale: &str,
    value: Value,
) -> Result<(), StoreError> {
    let mut entry = match store.get(key)? {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };
    entry.insert(locale.to_string(), value);
    store.set(key, Value::Object(entry))
}
