//! Dialoguer backend implementation for the Prompter trait.

use dialoguer::{
    Confirm, Editor, FuzzySelect, Input, MultiSelect, Password, Select, theme::ColorfulTheme,
};
use questioner::{Prompt, PromptError, Prompter, QuestionKind};
use serde_json::Value;
use thiserror::Error;
use tracing::trace;

/// Error type for the Dialoguer backend.
#[derive(Debug, Error)]
pub enum DialoguerError {
    /// User cancelled the prompt (e.g., pressed Ctrl+C or Escape).
    #[error("Prompt cancelled by user")]
    Cancelled,

    /// An I/O error occurred during prompting.
    #[error("Dialoguer error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    /// A list-like prompt without choices.
    #[error("Question '{0}' has no choices")]
    NoChoices(String),
}

impl From<DialoguerError> for PromptError {
    fn from(err: DialoguerError) -> Self {
        match err {
            DialoguerError::Cancelled => PromptError::Cancelled,
            other => PromptError::backend(other),
        }
    }
}

/// Helper to check if a dialoguer error is a cancellation (Ctrl+C / Escape)
fn is_cancelled(err: &dialoguer::Error) -> bool {
    matches!(err, dialoguer::Error::IO(io_err) if io_err.kind() == std::io::ErrorKind::Interrupted)
}

fn check(err: dialoguer::Error) -> DialoguerError {
    if is_cancelled(&err) {
        DialoguerError::Cancelled
    } else {
        DialoguerError::Dialoguer(err)
    }
}

/// Dialoguer backend for interactive CLI prompts.
///
/// `list` and `rawlist` become a select, `expand` a fuzzy select and
/// `checkbox` a multi select. Unknown kinds are asked as plain input.
#[derive(Debug, Default, Clone)]
pub struct DialoguerPrompter {
    /// Use colorful theme for prompts.
    colorful: bool,
}

impl DialoguerPrompter {
    /// Create a new Dialoguer prompter with the colorful theme.
    pub fn new() -> Self {
        Self { colorful: true }
    }

    /// Create a prompter with the plain (no color) theme.
    pub fn plain() -> Self {
        Self { colorful: false }
    }

    fn ask(&self, prompt: &Prompt) -> Result<Value, DialoguerError> {
        trace!(question = %prompt.name, kind = %prompt.kind, "dialoguer prompt");

        match &prompt.kind {
            QuestionKind::Confirm => self.ask_confirm(prompt),
            QuestionKind::Password => self.ask_password(prompt),
            QuestionKind::Editor => self.ask_editor(prompt),
            QuestionKind::Number => self.ask_number(prompt),
            QuestionKind::List | QuestionKind::RawList | QuestionKind::Expand => {
                self.ask_select(prompt)
            }
            QuestionKind::Checkbox => self.ask_checkbox(prompt),
            QuestionKind::Input | QuestionKind::Other(_) => self.ask_input(prompt),
        }
    }

    fn ask_input(&self, prompt: &Prompt) -> Result<Value, DialoguerError> {
        let _theme;
        let mut builder: Input<String>;
        if self.colorful {
            _theme = ColorfulTheme::default();
            builder = Input::with_theme(&_theme);
        } else {
            builder = Input::new();
        }

        builder = builder.with_prompt(&prompt.message).allow_empty(true);

        match prompt.default.as_ref() {
            Some(Value::String(s)) => builder = builder.default(s.clone()),
            Some(Value::Null) | None => {}
            Some(other) => builder = builder.default(other.to_string()),
        }

        let value = builder.interact_text().map_err(check)?;
        Ok(Value::String(value))
    }

    fn ask_password(&self, prompt: &Prompt) -> Result<Value, DialoguerError> {
        let _theme;
        let mut builder: Password;
        if self.colorful {
            _theme = ColorfulTheme::default();
            builder = Password::with_theme(&_theme);
        } else {
            builder = Password::new();
        }

        builder = builder.with_prompt(&prompt.message).allow_empty_password(true);

        let value = builder.interact().map_err(check)?;
        Ok(Value::String(value))
    }

    fn ask_editor(&self, prompt: &Prompt) -> Result<Value, DialoguerError> {
        println!("{}", prompt.message);

        let text = Editor::new()
            .edit(prompt.default_str().unwrap_or(""))
            .map_err(check)?;

        // An aborted edit is no answer.
        Ok(Value::String(text.unwrap_or_default()))
    }

    fn ask_number(&self, prompt: &Prompt) -> Result<Value, DialoguerError> {
        let _theme;
        let mut builder: Input<f64>;
        if self.colorful {
            _theme = ColorfulTheme::default();
            builder = Input::with_theme(&_theme);
        } else {
            builder = Input::new();
        }

        builder = builder.with_prompt(&prompt.message);
        if let Some(default) = prompt.default.as_ref().and_then(Value::as_f64) {
            builder = builder.default(default);
        }

        let value = builder.interact_text().map_err(check)?;
        Ok(Value::from(value))
    }

    fn ask_confirm(&self, prompt: &Prompt) -> Result<Value, DialoguerError> {
        let _theme;
        let mut builder: Confirm;
        if self.colorful {
            _theme = ColorfulTheme::default();
            builder = Confirm::with_theme(&_theme);
        } else {
            builder = Confirm::new();
        }

        builder = builder
            .with_prompt(&prompt.message)
            .default(prompt.default_bool().unwrap_or(false));

        let value = builder.interact().map_err(check)?;
        Ok(Value::Bool(value))
    }

    fn ask_select(&self, prompt: &Prompt) -> Result<Value, DialoguerError> {
        let items = choice_names(prompt)?;
        let default = prompt.default_index().unwrap_or(0);

        let _theme;
        let index = if prompt.kind == QuestionKind::Expand {
            let mut builder: FuzzySelect;
            if self.colorful {
                _theme = ColorfulTheme::default();
                builder = FuzzySelect::with_theme(&_theme);
            } else {
                builder = FuzzySelect::new();
            }
            builder
                .with_prompt(&prompt.message)
                .items(&items)
                .default(default)
                .interact()
                .map_err(check)?
        } else {
            let mut builder: Select;
            if self.colorful {
                _theme = ColorfulTheme::default();
                builder = Select::with_theme(&_theme);
            } else {
                builder = Select::new();
            }
            builder
                .with_prompt(&prompt.message)
                .items(&items)
                .default(default)
                .interact()
                .map_err(check)?
        };

        Ok(Value::String(items[index].clone()))
    }

    fn ask_checkbox(&self, prompt: &Prompt) -> Result<Value, DialoguerError> {
        let items = choice_names(prompt)?;
        let defaults: Vec<bool> = (0..items.len()).map(|i| prompt.is_checked(i)).collect();

        let _theme;
        let mut builder: MultiSelect;
        if self.colorful {
            _theme = ColorfulTheme::default();
            builder = MultiSelect::with_theme(&_theme);
        } else {
            builder = MultiSelect::new();
        }

        builder = builder
            .with_prompt(&prompt.message)
            .items(&items)
            .defaults(&defaults);

        let selections = builder.interact().map_err(check)?;
        Ok(Value::Array(
            selections
                .into_iter()
                .map(|i| Value::String(items[i].clone()))
                .collect(),
        ))
    }
}

impl Prompter for DialoguerPrompter {
    fn prompt(&self, prompt: &Prompt) -> Result<Value, PromptError> {
        Ok(self.ask(prompt)?)
    }
}

fn choice_names(prompt: &Prompt) -> Result<Vec<String>, DialoguerError> {
    if prompt.choices.is_empty() {
        return Err(DialoguerError::NoChoices(prompt.name.to_string()));
    }
    Ok(prompt.choices.iter().map(|c| c.name.clone()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use questioner::Choice;

    #[test]
    fn interrupted_io_is_cancellation() {
        let err = dialoguer::Error::IO(std::io::Error::from(std::io::ErrorKind::Interrupted));
        assert!(matches!(check(err), DialoguerError::Cancelled));

        let err = dialoguer::Error::IO(std::io::Error::from(std::io::ErrorKind::BrokenPipe));
        assert!(matches!(check(err), DialoguerError::Dialoguer(_)));
    }

    #[test]
    fn cancellation_maps_to_prompt_error() {
        assert!(PromptError::from(DialoguerError::Cancelled).is_cancelled());
        assert!(!PromptError::from(DialoguerError::NoChoices("x".into())).is_cancelled());
    }

    #[test]
    fn select_needs_choices() {
        let prompt = Prompt::new("color", "Color?", QuestionKind::List);
        assert!(matches!(
            choice_names(&prompt),
            Err(DialoguerError::NoChoices(ref name)) if name == "color"
        ));

        let prompt = prompt.with_choices(vec![Choice::new("red")]);
        assert_eq!(choice_names(&prompt).unwrap(), ["red"]);
    }

    #[test]
    fn constructors() {
        assert!(DialoguerPrompter::new().colorful);
        assert!(!DialoguerPrompter::plain().colorful);
    }
}
