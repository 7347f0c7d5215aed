use std::fmt;

use serde::{Deserialize, Serialize};

/// The name of a question, e.g., `"author.name"`.
///
/// Names double as keys into the answers object. A name without dots is a
/// flat key; a dotted name is namespaced and nests its answer
/// (`"author.name"` becomes `{"author": {"name": ...}}`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerPath {
    /// Dot-separated path string, e.g. "author.name"
    path: String,
}

impl AnswerPath {
    /// Create a new path from a dot-separated string.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Get the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Get the segments of this path as an iterator.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('.').filter(|s| !s.is_empty())
    }

    /// Get the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments().count()
    }

    /// Check if this name lives inside a namespace (contains a dot).
    pub fn is_namespaced(&self) -> bool {
        self.len() > 1
    }

    /// The namespace this name belongs to, if any.
    ///
    /// `"author.name"` belongs to the `"author"` group; `"name"` has no group.
    pub fn group(&self) -> Option<&str> {
        if self.is_namespaced() {
            self.first()
        } else {
            None
        }
    }

    /// Returns true if `prefix` equals this path or is a whole-segment prefix of it.
    ///
    /// `"author.name"` starts with `"author"` and `"author.name"`, but not with `"auth"`.
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.strip_prefix(prefix).is_some()
    }

    /// Returns a new path with the given prefix segment removed, if it matches.
    pub fn strip_prefix(&self, prefix: &str) -> Option<Self> {
        if self.path == prefix {
            Some(Self::new(String::new()))
        } else if self.path.starts_with(prefix) && self.path[prefix.len()..].starts_with('.') {
            Some(Self::new(&self.path[prefix.len() + 1..]))
        } else {
            None
        }
    }

    /// Get the first segment, if any.
    pub fn first(&self) -> Option<&str> {
        self.segments().next()
    }
}

impl fmt::Display for AnswerPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)
    }
}

impl AsRef<str> for AnswerPath {
    fn as_ref(&self) -> &str {
        &self.path
    }
}

impl From<&str> for AnswerPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AnswerPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&String> for AnswerPath {
    fn from(s: &String) -> Self {
        Self::new(s.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_of_namespaced_name() {
        assert_eq!(AnswerPath::new("author.name").group(), Some("author"));
        assert_eq!(AnswerPath::new("name").group(), None);
    }

    #[test]
    fn starts_with_whole_segments_only() {
        let path = AnswerPath::new("author.name");
        assert!(path.starts_with("author"));
        assert!(path.starts_with("author.name"));
        assert!(!path.starts_with("auth"));
        assert!(!path.starts_with("author.n"));
    }

    #[test]
    fn strip_prefix() {
        let path = AnswerPath::new("author.url");
        let stripped = path.strip_prefix("author").unwrap();
        assert_eq!(stripped.as_str(), "url");

        assert!(path.strip_prefix("project").is_none());
        assert!(path.strip_prefix("author.url").is_some_and(|p| p.is_empty()));
    }

    #[test]
    fn segments() {
        let path = AnswerPath::new("project.repo.url");
        let segments: Vec<_> = path.segments().collect();
        assert_eq!(segments, vec!["project", "repo", "url"]);
        assert_eq!(path.len(), 3);
        assert_eq!(path.first(), Some("project"));
    }

    #[test]
    fn display() {
        let path = AnswerPath::new("author.name");
        assert_eq!(format!("{}", path), "author.name");
    }
}
