use serde::Deserialize;
use tracing::warn;

use crate::QuestionOptions;
use crate::question::DEFAULT_LOCALE;

/// Where a question set accumulates answers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswersMode {
    /// Accumulate into the session, shared by every set on the same [`Session`](crate::Session).
    /// A question answered once in the session is not asked again.
    #[default]
    Session,

    /// Start every `ask` call from empty answers.
    Fresh,
}

/// Configuration of a [`QuestionSet`](crate::QuestionSet).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QuestionSetConfig {
    /// Locale for questions that do not set one.
    pub locale: String,

    /// Scope key for questions that do not set one. Defaults to the working directory.
    pub scope: String,

    /// Instance-level options, overridden by question and call options.
    pub options: QuestionOptions,

    /// Where answers accumulate.
    pub answers: AnswersMode,
}

impl Default for QuestionSetConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            scope: default_scope(),
            options: QuestionOptions::default(),
            answers: AnswersMode::default(),
        }
    }
}

impl QuestionSetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    pub fn with_options(mut self, options: QuestionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_answers(mut self, answers: AnswersMode) -> Self {
        self.answers = answers;
        self
    }
}

/// The current working directory, used as the default scope key.
pub(crate) fn default_scope() -> String {
    match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(e) => {
            warn!("Cannot read the working directory, using '.' as scope: {e}");
            ".".to_string()
        }
    }
}
