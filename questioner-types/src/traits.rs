use serde_json::Value;

use crate::{Prompt, PromptError, StoreError};

/// Trait for backend implementations that render prompts.
///
/// Backends receive one `Prompt` at a time and block until the user answers.
/// They decide how to present it (terminal widgets, scripted answers, etc.).
pub trait Prompter {
    /// Ask a single question.
    ///
    /// # Returns
    /// * `Ok(value)` with the raw answer. Checkbox answers are lists; an empty
    ///   string or `null` means the user gave no answer.
    /// * `Err` on cancellation or backend failure. Errors are reported to the
    ///   caller unchanged; no retry happens above this layer.
    fn prompt(&self, prompt: &Prompt) -> Result<Value, PromptError>;
}

impl<P: Prompter + ?Sized> Prompter for &P {
    fn prompt(&self, prompt: &Prompt) -> Result<Value, PromptError> {
        (**self).prompt(prompt)
    }
}

impl<P: Prompter + ?Sized> Prompter for Box<P> {
    fn prompt(&self, prompt: &Prompt) -> Result<Value, PromptError> {
        (**self).prompt(prompt)
    }
}

/// Trait for persistent key-value stores holding answers across runs.
///
/// Keys are question names. Stores are flat: a dotted key is a single key,
/// not a path into nested objects.
pub trait AnswerStore {
    /// Get the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn del(&mut self, key: &str) -> Result<(), StoreError>;

    /// Check if `key` is present.
    fn has(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get(key)?.is_some())
    }
}
