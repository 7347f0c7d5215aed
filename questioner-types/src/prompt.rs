use serde::Serialize;
use serde_json::Value;

use crate::{AnswerPath, Choice, QuestionKind};

/// Everything a prompter needs to render one question.
///
/// A prompt is presentation-agnostic: the same descriptor can be rendered by
/// any terminal backend, or answered from a script in tests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prompt {
    /// The question name; the answer is reported under this key.
    pub name: AnswerPath,

    /// The text shown to the user.
    pub message: String,

    /// The kind of prompt.
    #[serde(rename = "type")]
    pub kind: QuestionKind,

    /// Value pre-filled in the prompt, seeded from an existing answer or default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Choices for list-like kinds.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
}

impl Prompt {
    /// Create a new prompt. The message defaults to the name when empty.
    pub fn new(name: impl Into<AnswerPath>, message: impl Into<String>, kind: QuestionKind) -> Self {
        let name = name.into();
        let message = message.into();
        let message = if message.is_empty() {
            name.to_string()
        } else {
            message
        };
        Self {
            name,
            message,
            kind,
            default: None,
            choices: Vec::new(),
        }
    }

    /// Set the pre-filled value.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Set the choices.
    pub fn with_choices(mut self, choices: Vec<Choice>) -> Self {
        self.choices = choices;
        self
    }

    /// The default as a string, if it is one.
    pub fn default_str(&self) -> Option<&str> {
        self.default.as_ref().and_then(Value::as_str)
    }

    /// The default as a bool, if it is one.
    pub fn default_bool(&self) -> Option<bool> {
        self.default.as_ref().and_then(Value::as_bool)
    }

    /// Index of the choice named by the default, if any.
    pub fn default_index(&self) -> Option<usize> {
        let default = self.default_str()?;
        self.choices.iter().position(|c| c.name == default)
    }

    /// Whether the choice at `index` starts out selected in a checkbox prompt.
    ///
    /// A list default selects the choices it names; otherwise the choice's own
    /// `checked` flag applies.
    pub fn is_checked(&self, index: usize) -> bool {
        let Some(choice) = self.choices.get(index) else {
            return false;
        };
        match &self.default {
            Some(Value::Array(selected)) => selected
                .iter()
                .any(|v| v.as_str() == Some(choice.name.as_str())),
            _ => choice.checked,
        }
    }
}
