use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::QuestionError;

/// Glob patterns matched against question names.
///
/// A name matches if any pattern matches the whole name or one of its dot
/// prefixes, so `author` matches `author.name` just like `author.*` does.
#[derive(Debug, Clone)]
pub struct Pattern {
    set: GlobSet,
}

impl Pattern {
    /// Compile `patterns`. Fails with `InvalidArgument` on a malformed glob.
    pub fn new<I, S>(patterns: I) -> Result<Self, QuestionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let glob = Glob::new(pattern).map_err(|e| {
                QuestionError::InvalidArgument(format!("invalid pattern '{pattern}': {e}"))
            })?;
            builder.add(glob);
        }
        let set = builder
            .build()
            .map_err(|e| QuestionError::InvalidArgument(e.to_string()))?;
        Ok(Self { set })
    }

    /// Check if `name` matches any pattern.
    pub fn is_match(&self, name: &str) -> bool {
        if self.set.is_match(name) {
            return true;
        }
        name.match_indices('.')
            .any(|(i, _)| self.set.is_match(&name[..i]))
    }

    /// Check if there are no patterns. An empty pattern matches nothing.
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}
