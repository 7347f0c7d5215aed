use std::path::PathBuf;

/// Error raised by a prompter.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    /// User cancelled the prompt (Ctrl+C, Escape, closed input, etc.)
    #[error("Prompt cancelled by user")]
    Cancelled,

    /// Backend-specific failure (I/O, terminal errors, unexpected answers, etc.)
    #[error("Backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

impl PromptError {
    /// Create a backend error from any error type.
    pub fn backend(err: impl Into<anyhow::Error>) -> Self {
        Self::Backend(err.into())
    }

    /// Check if this error represents user cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Error raised by an answer store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store I/O error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Store data error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store backend error: {0}")]
    Backend(anyhow::Error),
}

impl StoreError {
    /// Create a backend error from any error type.
    pub fn backend(err: impl Into<anyhow::Error>) -> Self {
        Self::Backend(err.into())
    }
}

/// Error type for question registration and the asking pipeline.
#[derive(Debug, thiserror::Error)]
pub enum QuestionError {
    /// Malformed registration, e.g. a missing name or an invalid pattern.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Singular lookup of a question that was never registered.
    #[error("Question not found: {0}")]
    NotFound(String),

    /// Propagated verbatim from the prompter.
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// Propagated verbatim from an answer store.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl QuestionError {
    /// Check if this error represents user cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Prompt(PromptError::Cancelled))
    }
}
