use serde_json::Value;

use crate::{AnswerPath, Answers};

/// Caller-supplied values consulted before prompting.
///
/// Typically filled from command-line flags or a config file: a question whose
/// name has a value here is answered without being asked. Keys are dot paths,
/// so `author.name` and `{"author": {"name": ..}}` address the same value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataBag {
    values: Answers,
}

impl DataBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value under `name`.
    pub fn set(&mut self, name: impl Into<AnswerPath>, value: impl Into<Value>) {
        self.values.insert(name, value);
    }

    /// Deep-merge a JSON object into the bag. Non-objects are ignored.
    pub fn merge(&mut self, values: Value) {
        if values.is_object() {
            self.values.extend(Answers::from_value(values));
        }
    }

    pub fn get(&self, name: &AnswerPath) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn has(&self, name: &AnswerPath) -> bool {
        self.values.contains(name)
    }

    pub fn remove(&mut self, name: &AnswerPath) -> Option<Value> {
        self.values.remove(name)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
