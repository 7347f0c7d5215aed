use serde::Deserialize;
use serde_json::Value;

use crate::{Choice, QuestionError, QuestionKind, QuestionOptions};

/// A full question definition, as written in code or loaded from JSON.
///
/// ```json
/// { "name": "license", "type": "list", "message": "License?",
///   "choices": ["MIT", "Apache-2.0"], "save": false }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionDef {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default, rename = "type")]
    pub kind: Option<QuestionKind>,

    #[serde(default)]
    pub choices: Vec<Choice>,

    /// Any recognized option (`force`, `save`, `default`, `next`, ...).
    #[serde(flatten)]
    pub options: QuestionOptions,
}

impl QuestionDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<QuestionKind>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_choices(mut self, choices: impl IntoIterator<Item = impl Into<Choice>>) -> Self {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_options(mut self, options: QuestionOptions) -> Self {
        self.options = options;
        self
    }
}

/// The ways a question can be registered.
///
/// Resolved once at the boundary into a [`Question`](crate::Question):
///
/// ```rust
/// use questioner::{QuestionDef, QuestionSpec};
///
/// let by_name: QuestionSpec = "name".into();
/// let with_message: QuestionSpec = ("name", "What is your name?").into();
/// let full: QuestionSpec = QuestionDef::new("name").with_kind("input").into();
/// # let _ = (by_name, with_message, full);
/// ```
#[derive(Debug, Clone)]
pub enum QuestionSpec {
    /// Just a name; the message defaults to the name.
    ByName(String),

    /// A name and a message.
    WithMessage { name: String, message: String },

    /// A full definition.
    Full(QuestionDef),
}

impl QuestionSpec {
    /// Build a spec from one entry of a JSON mapping of name to definition.
    ///
    /// The value may be a message string, a definition object (whose `name`
    /// defaults to `key`), or `null`.
    pub fn from_entry(key: &str, value: &Value) -> Result<Self, QuestionError> {
        match value {
            Value::Null => Ok(Self::ByName(key.to_string())),
            Value::String(message) => Ok(Self::WithMessage {
                name: key.to_string(),
                message: message.clone(),
            }),
            Value::Object(_) => {
                let mut def: QuestionDef = serde_json::from_value(value.clone()).map_err(|e| {
                    QuestionError::InvalidArgument(format!("question '{key}': {e}"))
                })?;
                if def.name.is_none() {
                    def.name = Some(key.to_string());
                }
                Ok(Self::Full(def))
            }
            other => Err(QuestionError::InvalidArgument(format!(
                "question '{key}': expected a message or an object, got {other}"
            ))),
        }
    }

    /// The name, if one was given.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::ByName(name) | Self::WithMessage { name, .. } => Some(name),
            Self::Full(def) => def.name.as_deref(),
        }
    }

    pub(crate) fn into_def(self) -> QuestionDef {
        match self {
            Self::ByName(name) => QuestionDef::new(name),
            Self::WithMessage { name, message } => QuestionDef::new(name).with_message(message),
            Self::Full(def) => def,
        }
    }
}

impl From<&str> for QuestionSpec {
    fn from(name: &str) -> Self {
        Self::ByName(name.to_string())
    }
}

impl From<String> for QuestionSpec {
    fn from(name: String) -> Self {
        Self::ByName(name)
    }
}

impl From<(&str, &str)> for QuestionSpec {
    fn from((name, message): (&str, &str)) -> Self {
        Self::WithMessage {
            name: name.to_string(),
            message: message.to_string(),
        }
    }
}

impl From<(String, String)> for QuestionSpec {
    fn from((name, message): (String, String)) -> Self {
        Self::WithMessage { name, message }
    }
}

impl From<QuestionDef> for QuestionSpec {
    fn from(def: QuestionDef) -> Self {
        Self::Full(def)
    }
}
