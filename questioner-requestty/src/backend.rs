//! Requestty backend implementation for the Prompter trait.

use questioner::{Prompt, PromptError, Prompter, QuestionKind};
use requestty::Answer;
use serde_json::Value;
use thiserror::Error;
use tracing::trace;

/// Error type for the Requestty backend.
#[derive(Debug, Error)]
pub enum RequesttyError {
    /// User cancelled the prompt (e.g., pressed Ctrl+C).
    #[error("Prompt cancelled by user")]
    Cancelled,

    /// An error occurred during prompting.
    #[error("Prompt error: {0}")]
    PromptError(String),

    /// Unexpected answer type received.
    #[error("Unexpected answer type: expected {expected}, got {got}")]
    UnexpectedAnswerType { expected: String, got: String },
}

impl From<requestty::ErrorKind> for RequesttyError {
    fn from(err: requestty::ErrorKind) -> Self {
        match err {
            requestty::ErrorKind::Interrupted => Self::Cancelled,
            _ => Self::PromptError(err.to_string()),
        }
    }
}

impl From<RequesttyError> for PromptError {
    fn from(err: RequesttyError) -> Self {
        match err {
            RequesttyError::Cancelled => PromptError::Cancelled,
            other => PromptError::backend(other),
        }
    }
}

/// Requestty backend for interactive CLI prompts.
///
/// Kinds are mapped as follows:
/// - `input`, `editor`, `password`, `confirm`: the prompts of the same name
/// - `number`: a float prompt
/// - `list`: a select, `rawlist`: a numbered select
/// - `checkbox`: a multi select, answered with the list of chosen names
/// - `expand`: an expand prompt keyed by each choice's shortcut (`h` is reserved for help)
/// - anything else: a plain input
#[derive(Debug, Default, Clone)]
pub struct RequesttyPrompter;

impl RequesttyPrompter {
    /// Create a new Requestty prompter.
    pub const fn new() -> Self {
        Self
    }

    fn ask(&self, prompt: &Prompt) -> Result<Value, RequesttyError> {
        let name = prompt.name.as_str();
        let message = prompt.message.as_str();
        trace!(question = name, kind = %prompt.kind, "requestty prompt");

        match &prompt.kind {
            QuestionKind::Confirm => self.ask_confirm(prompt, name, message),
            QuestionKind::Password => {
                let q = requestty::Question::password(name)
                    .message(message)
                    .mask('*')
                    .build();
                expect_string(requestty::prompt_one(q)?)
            }
            QuestionKind::Editor => {
                let mut q = requestty::Question::editor(name).message(message);
                if let Some(default) = prompt.default_str() {
                    q = q.default(default.to_string());
                }
                expect_string(requestty::prompt_one(q.build())?)
            }
            QuestionKind::Number => self.ask_number(prompt, name, message),
            QuestionKind::List => {
                let mut q = requestty::Question::select(name)
                    .message(message)
                    .choices(choice_names(prompt));
                if let Some(index) = prompt.default_index() {
                    q = q.default(index);
                }
                expect_list_item(requestty::prompt_one(q.build())?)
            }
            QuestionKind::RawList => {
                let mut q = requestty::Question::raw_select(name)
                    .message(message)
                    .choices(choice_names(prompt));
                if let Some(index) = prompt.default_index() {
                    q = q.default(index);
                }
                expect_list_item(requestty::prompt_one(q.build())?)
            }
            QuestionKind::Checkbox => self.ask_checkbox(prompt, name, message),
            QuestionKind::Expand => self.ask_expand(prompt, name, message),
            QuestionKind::Input | QuestionKind::Other(_) => {
                let mut q = requestty::Question::input(name).message(message);
                if let Some(default) = default_text(prompt) {
                    q = q.default(default);
                }
                expect_string(requestty::prompt_one(q.build())?)
            }
        }
    }

    fn ask_confirm(
        &self,
        prompt: &Prompt,
        name: &str,
        message: &str,
    ) -> Result<Value, RequesttyError> {
        let q = requestty::Question::confirm(name)
            .message(message)
            .default(prompt.default_bool().unwrap_or(false))
            .build();

        match requestty::prompt_one(q)? {
            Answer::Bool(b) => Ok(Value::Bool(b)),
            other => Err(unexpected("Bool", &other)),
        }
    }

    fn ask_number(
        &self,
        prompt: &Prompt,
        name: &str,
        message: &str,
    ) -> Result<Value, RequesttyError> {
        let mut q = requestty::Question::float(name).message(message);
        if let Some(default) = prompt.default.as_ref().and_then(Value::as_f64) {
            q = q.default(default);
        }

        match requestty::prompt_one(q.build())? {
            Answer::Float(f) => Ok(Value::from(f)),
            Answer::Int(i) => Ok(Value::from(i)),
            other => Err(unexpected("Float", &other)),
        }
    }

    fn ask_checkbox(
        &self,
        prompt: &Prompt,
        name: &str,
        message: &str,
    ) -> Result<Value, RequesttyError> {
        let choices: Vec<(String, bool)> = prompt
            .choices
            .iter()
            .enumerate()
            .map(|(index, choice)| (choice.name.clone(), prompt.is_checked(index)))
            .collect();

        let q = requestty::Question::multi_select(name)
            .message(message)
            .choices_with_default(choices)
            .build();

        match requestty::prompt_one(q)? {
            Answer::ListItems(items) => Ok(Value::Array(
                items.into_iter().map(|item| Value::String(item.text)).collect(),
            )),
            other => Err(unexpected("ListItems", &other)),
        }
    }

    fn ask_expand(
        &self,
        prompt: &Prompt,
        name: &str,
        message: &str,
    ) -> Result<Value, RequesttyError> {
        let mut q = requestty::Question::expand(name).message(message);
        for choice in &prompt.choices {
            q = q.choice(choice.shortcut(), choice.name.clone());
        }
        if let Some(index) = prompt.default_index() {
            q = q.default(prompt.choices[index].shortcut());
        }

        match requestty::prompt_one(q.build())? {
            Answer::ExpandItem(item) => Ok(Value::String(item.text)),
            other => Err(unexpected("ExpandItem", &other)),
        }
    }
}

impl Prompter for RequesttyPrompter {
    fn prompt(&self, prompt: &Prompt) -> Result<Value, PromptError> {
        Ok(self.ask(prompt)?)
    }
}

fn choice_names(prompt: &Prompt) -> Vec<String> {
    prompt.choices.iter().map(|c| c.name.clone()).collect()
}

/// The default rendered as editable text. Non-string scalars are shown as JSON.
fn default_text(prompt: &Prompt) -> Option<String> {
    match prompt.default.as_ref()? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn expect_string(answer: Answer) -> Result<Value, RequesttyError> {
    match answer {
        Answer::String(s) => Ok(Value::String(s)),
        other => Err(unexpected("String", &other)),
    }
}

fn expect_list_item(answer: Answer) -> Result<Value, RequesttyError> {
    match answer {
        Answer::ListItem(item) => Ok(Value::String(item.text)),
        other => Err(unexpected("ListItem", &other)),
    }
}

fn unexpected(expected: &str, got: &Answer) -> RequesttyError {
    RequesttyError::UnexpectedAnswerType {
        expected: expected.to_string(),
        got: format!("{got:?}"),
    }
}
