use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::AnswerPath;

/// Error type for answer access operations.
#[derive(Debug, thiserror::Error)]
pub enum AnswerError {
    #[error("Missing answer for path: {0}")]
    MissingPath(AnswerPath),

    #[error("Type mismatch at path '{path}': expected {expected}, got {actual}")]
    TypeMismatch {
        path: AnswerPath,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Accumulated answers.
///
/// Unlike a flat map, answers are nested by dot path: inserting `"author.name"`
/// and `"author.url"` produces `{"author": {"name": ..., "url": ...}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers {
    values: Map<String, Value>,
}

impl Answers {
    /// Create a new empty answers object.
    pub fn new() -> Self {
        Self { values: Map::new() }
    }

    /// Build answers from a JSON value. Non-object values produce empty answers.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(values) => Self { values },
            _ => Self::new(),
        }
    }

    /// Insert an answer at the given path, creating intermediate objects.
    ///
    /// Any non-object value standing in the way of the path is replaced.
    pub fn insert(&mut self, path: impl Into<AnswerPath>, value: impl Into<Value>) {
        let path = path.into();
        let segments: Vec<&str> = path.segments().collect();
        let Some((last, parents)) = segments.split_last() else {
            return;
        };

        let mut current = &mut self.values;
        for segment in parents {
            let entry = current
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            current = match entry {
                Value::Object(map) => map,
                _ => return,
            };
        }
        current.insert(last.to_string(), value.into());
    }

    /// Get the answer at the given path.
    pub fn get(&self, path: &AnswerPath) -> Option<&Value> {
        let mut segments = path.segments();
        let mut current = self.values.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Check if an answer exists at the given path.
    pub fn contains(&self, path: &AnswerPath) -> bool {
        self.get(path).is_some()
    }

    /// Remove the answer at the given path. Empty parent objects are kept.
    pub fn remove(&mut self, path: &AnswerPath) -> Option<Value> {
        let segments: Vec<&str> = path.segments().collect();
        let (last, parents) = segments.split_last()?;

        let mut current = &mut self.values;
        for segment in parents {
            current = current.get_mut(*segment)?.as_object_mut()?;
        }
        current.remove(*last)
    }

    /// Get the number of top-level entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no answers.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Deep-merge another answers object into this one. Values from `other` win.
    pub fn extend(&mut self, other: Answers) {
        merge_maps(&mut self.values, other.values);
    }

    /// Remove every answer.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Borrow the underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Convert into a JSON value.
    pub fn into_value(self) -> Value {
        Value::Object(self.values)
    }

    /// Get a string answer at the given path.
    pub fn get_str(&self, path: &AnswerPath) -> Result<&str, AnswerError> {
        match self.get(path) {
            Some(Value::String(s)) => Ok(s),
            Some(other) => Err(mismatch(path, "String", other)),
            None => Err(AnswerError::MissingPath(path.clone())),
        }
    }

    /// Get a boolean answer at the given path.
    pub fn get_bool(&self, path: &AnswerPath) -> Result<bool, AnswerError> {
        match self.get(path) {
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(mismatch(path, "Bool", other)),
            None => Err(AnswerError::MissingPath(path.clone())),
        }
    }
}

fn merge_maps(into: &mut Map<String, Value>, from: Map<String, Value>) {
    for (key, value) in from {
        match (into.get_mut(&key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                merge_maps(existing, incoming);
            }
            (_, value) => {
                into.insert(key, value);
            }
        }
    }
}

fn mismatch(path: &AnswerPath, expected: &'static str, actual: &Value) -> AnswerError {
    AnswerError::TypeMismatch {
        path: path.clone(),
        expected,
        actual: type_name(actual),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "Null",
        Value::Bool(_) => "Bool",
        Value::Number(_) => "Number",
        Value::String(_) => "String",
        Value::Array(_) => "List",
        Value::Object(_) => "Object",
    }
}

impl From<Answers> for Value {
    fn from(answers: Answers) -> Self {
        answers.into_value()
    }
}
