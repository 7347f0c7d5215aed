use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of prompt to render.
///
/// The core never interprets the kind beyond flattening checkbox answers; it is
/// passed through to the prompter. Unknown kinds are kept verbatim in `Other`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionKind {
    /// Single-line text input.
    #[default]
    Input,

    /// Yes/no confirmation.
    Confirm,

    /// Select any number of choices. Answers are a flat list.
    Checkbox,

    /// Pick one choice by its shortcut key.
    Expand,

    /// Pick one choice from a numbered list.
    RawList,

    /// Pick one choice from a list.
    List,

    /// Masked input.
    Password,

    /// Multi-line text in an external editor.
    Editor,

    /// Numeric input.
    Number,

    /// Any other prompt type understood by a specific prompter.
    Other(String),
}

impl QuestionKind {
    /// The canonical name of this kind.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Input => "input",
            Self::Confirm => "confirm",
            Self::Checkbox => "checkbox",
            Self::Expand => "expand",
            Self::RawList => "rawlist",
            Self::List => "list",
            Self::Password => "password",
            Self::Editor => "editor",
            Self::Number => "number",
            Self::Other(name) => name,
        }
    }

    /// Check if this kind selects from a list of choices.
    pub fn has_choices(&self) -> bool {
        matches!(
            self,
            Self::Checkbox | Self::Expand | Self::RawList | Self::List
        )
    }
}

impl From<&str> for QuestionKind {
    fn from(name: &str) -> Self {
        match name {
            "input" => Self::Input,
            "confirm" => Self::Confirm,
            "checkbox" => Self::Checkbox,
            "expand" => Self::Expand,
            "rawlist" => Self::RawList,
            "list" => Self::List,
            "password" => Self::Password,
            "editor" => Self::Editor,
            "number" => Self::Number,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for QuestionKind {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<QuestionKind> for String {
    fn from(kind: QuestionKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selectable choice for list-like questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ChoiceRepr")]
pub struct Choice {
    /// Display text, also used as the answer value.
    pub name: String,

    /// Shortcut key for `expand` prompts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<char>,

    /// Pre-selected in `checkbox` prompts.
    #[serde(default)]
    pub checked: bool,
}

impl Choice {
    /// Create a new choice with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: None,
            checked: false,
        }
    }

    /// Set the expand shortcut key.
    pub fn with_key(mut self, key: char) -> Self {
        self.key = Some(key);
        self
    }

    /// Mark the choice as pre-selected.
    pub fn checked(mut self) -> Self {
        self.checked = true;
        self
    }

    /// The expand key, falling back to the lowercased first letter of the name.
    pub fn shortcut(&self) -> char {
        self.key
            .or_else(|| self.name.chars().next().map(|c| c.to_ascii_lowercase()))
            .unwrap_or('?')
    }
}

impl From<&str> for Choice {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Choice {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Choices are written either as plain strings or as full objects.
#[derive(Deserialize)]
#[serde(untagged)]
enum ChoiceRepr {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        key: Option<char>,
        #[serde(default)]
        checked: bool,
    },
}

impl From<ChoiceRepr> for Choice {
    fn from(repr: ChoiceRepr) -> Self {
        match repr {
            ChoiceRepr::Name(name) => Self::new(name),
            ChoiceRepr::Full { name, key, checked } => Self { name, key, checked },
        }
    }
}
