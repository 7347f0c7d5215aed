use std::collections::HashMap;

use crate::AnswerPath;

/// Index of namespaced question names by their first segment.
///
/// `author.name` and `author.url` both land in the `author` group, in
/// registration order. Names without a dot belong to no group.
#[derive(Debug, Clone, Default)]
pub struct GroupIndex {
    groups: HashMap<String, Vec<String>>,
}

impl GroupIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name` in its group. Adding a name twice keeps one entry.
    pub fn add(&mut self, name: &AnswerPath) {
        let Some(group) = name.group() else {
            return;
        };
        let names = self.groups.entry(group.to_string()).or_default();
        if !names.iter().any(|n| n == name.as_str()) {
            names.push(name.to_string());
        }
    }

    /// Remove `name` from its group, dropping the group once empty.
    pub fn remove(&mut self, name: &AnswerPath) {
        let Some(group) = name.group() else {
            return;
        };
        if let Some(names) = self.groups.get_mut(group) {
            names.retain(|n| n != name.as_str());
            if names.is_empty() {
                self.groups.remove(group);
            }
        }
    }

    /// The names in `group`, in registration order.
    pub fn get(&self, group: &str) -> &[String] {
        self.groups.get(group).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn contains(&self, group: &str) -> bool {
        self.groups.contains_key(group)
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }
}
