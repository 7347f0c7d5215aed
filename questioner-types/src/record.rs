use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stored answers for one question.
///
/// Answers are partitioned by locale and then by scope (usually the project
/// directory), so the same question can carry a different answer per project.
/// Each locale additionally has a default slot that seeds the prompt when no
/// real answer exists yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    answers: BTreeMap<String, BTreeMap<String, Value>>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    defaults: BTreeMap<String, Value>,
}

impl AnswerRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the real answer for a locale and scope.
    pub fn get(&self, locale: &str, scope: &str) -> Option<&Value> {
        self.answers.get(locale)?.get(scope)
    }

    /// Set the real answer for a locale and scope.
    pub fn set(&mut self, locale: &str, scope: &str, value: Value) {
        self.answers
            .entry(locale.to_string())
            .or_default()
            .insert(scope.to_string(), value);
    }

    /// Delete the real answer for a locale and scope.
    pub fn del(&mut self, locale: &str, scope: &str) -> Option<Value> {
        let scopes = self.answers.get_mut(locale)?;
        let removed = scopes.remove(scope);
        if scopes.is_empty() {
            self.answers.remove(locale);
        }
        removed
    }

    /// Check if a real answer exists for a locale and scope.
    pub fn has(&self, locale: &str, scope: &str) -> bool {
        self.get(locale, scope).is_some()
    }

    /// Get the default for a locale.
    pub fn get_default(&self, locale: &str) -> Option<&Value> {
        self.defaults.get(locale)
    }

    /// Set the default for a locale.
    pub fn set_default(&mut self, locale: &str, value: Value) {
        self.defaults.insert(locale.to_string(), value);
    }

    /// Delete the default for a locale.
    pub fn del_default(&mut self, locale: &str) -> Option<Value> {
        self.defaults.remove(locale)
    }

    /// Check if a default exists for a locale.
    pub fn has_default(&self, locale: &str) -> bool {
        self.defaults.contains_key(locale)
    }

    /// Resolve the usable answer: the real answer first, then the default.
    ///
    /// A default never shadows a real answer, regardless of which was set last.
    pub fn resolve(&self, locale: &str, scope: &str) -> Option<&Value> {
        self.get(locale, scope).or_else(|| self.get_default(locale))
    }

    /// Forget every answer and default.
    pub fn erase(&mut self) {
        self.answers.clear();
        self.defaults.clear();
    }

    /// Check if the record holds nothing at all.
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty() && self.defaults.is_empty()
    }
}
