use serde_json::Value;
use tracing::debug;

use crate::config::default_scope;
use crate::{
    AnswerPath, AnswerRecord, Answers, Choice, Prompt, Prompter, QuestionError, QuestionKind,
    QuestionOptions, QuestionSpec, flatten, is_answer,
};

/// The locale used when neither the question nor the call names one.
pub(crate) const DEFAULT_LOCALE: &str = "en";

/// How a question was resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// `skip` was set: no prompt, the current answer (if any) is used as is.
    Skipped(Option<Value>),

    /// An existing answer was reused without prompting.
    Existing(Value),

    /// The user answered. `saved` tells whether the stored record changed.
    Answered { value: Value, saved: bool },

    /// The user was prompted but gave no usable answer.
    Unanswered,
}

impl Outcome {
    /// Consume the outcome, returning the resolved value.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Skipped(value) => value,
            Self::Existing(value) | Self::Answered { value, .. } => Some(value),
            Self::Unanswered => None,
        }
    }
}

/// A single named question.
///
/// Besides what is shown to the user, a question carries its stored answers
/// (per locale and scope, plus defaults) and decides whether it actually has
/// to be asked.
#[derive(Debug, Clone)]
pub struct Question {
    /// The name, also the key of the answer.
    name: AnswerPath,

    /// The prompt text shown to the user.
    message: String,

    /// The kind of prompt.
    kind: QuestionKind,

    /// Choices for list-like kinds.
    choices: Vec<Choice>,

    /// Options defined on the question itself.
    options: QuestionOptions,

    /// Stored answers and defaults.
    record: AnswerRecord,

    /// Locale used when a call does not name one.
    locale: String,

    /// Scope key used when a call does not name one.
    scope: String,
}

impl Question {
    /// Create a question from any [`QuestionSpec`].
    ///
    /// Fails with `InvalidArgument` if the name is missing, empty, or has
    /// empty dot segments.
    pub fn from_spec(spec: impl Into<QuestionSpec>) -> Result<Self, QuestionError> {
        let spec: QuestionSpec = spec.into();
        let def = spec.into_def();
        let name = def
            .name
            .ok_or_else(|| QuestionError::InvalidArgument("question name is required".into()))?;
        validate_name(&name)?;

        let message = def
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| name.clone());
        let locale = def
            .options
            .locale
            .clone()
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string());
        let scope = def.options.scope.clone().unwrap_or_else(default_scope);

        Ok(Self {
            name: AnswerPath::new(name),
            message,
            kind: def.kind.unwrap_or_default(),
            choices: def.choices,
            options: def.options,
            record: AnswerRecord::new(),
            locale,
            scope,
        })
    }

    /// Create an input question with a message.
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Result<Self, QuestionError> {
        Self::from_spec(QuestionSpec::WithMessage {
            name: name.into(),
            message: message.into(),
        })
    }

    /// Get the name.
    pub fn name(&self) -> &AnswerPath {
        &self.name
    }

    /// Get the prompt text.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    /// Get the question kind.
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    pub fn set_kind(&mut self, kind: impl Into<QuestionKind>) {
        self.kind = kind.into();
    }

    /// Get the choices.
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    pub fn set_choices(&mut self, choices: Vec<Choice>) {
        self.choices = choices;
    }

    /// Get the question's own options.
    pub fn options(&self) -> &QuestionOptions {
        &self.options
    }

    /// Get a mutable reference to the question's own options.
    pub fn options_mut(&mut self) -> &mut QuestionOptions {
        &mut self.options
    }

    /// Get the stored answers.
    pub fn record(&self) -> &AnswerRecord {
        &self.record
    }

    /// Replace the stored answers, e.g. with a record loaded from a store.
    pub fn set_record(&mut self, record: AnswerRecord) {
        self.record = record;
    }

    /// The locale used when a call does not name one.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }

    /// The scope key (usually the working directory) answers are stored under.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn set_scope(&mut self, scope: impl Into<String>) {
        self.scope = scope.into();
    }

    /// Set the answer for `locale` in the current scope.
    pub fn set(&mut self, locale: &str, value: impl Into<Value>) -> &mut Self {
        self.record.set(locale, &self.scope, value.into());
        self
    }

    /// Get the answer for `locale` in the current scope. Defaults are not consulted.
    pub fn get(&self, locale: &str) -> Option<&Value> {
        self.record.get(locale, &self.scope)
    }

    /// Delete the answer for `locale` in the current scope.
    pub fn del(&mut self, locale: &str) -> Option<Value> {
        self.record.del(locale, &self.scope)
    }

    /// Set the default for `locale`.
    pub fn set_default(&mut self, locale: &str, value: impl Into<Value>) -> &mut Self {
        self.record.set_default(locale, value.into());
        self
    }

    /// Get the default for `locale`.
    pub fn get_default(&self, locale: &str) -> Option<&Value> {
        self.record.get_default(locale)
    }

    /// Delete the default for `locale`.
    pub fn del_default(&mut self, locale: &str) -> Option<Value> {
        self.record.del_default(locale)
    }

    /// Check if a default exists for `locale`.
    pub fn has_default(&self, locale: &str) -> bool {
        self.record.has_default(locale)
    }

    /// Check if an answer or a default exists for `locale` in the current scope.
    pub fn is_answered(&self, locale: &str) -> bool {
        self.resolve_answer(locale, &self.scope).is_some()
    }

    /// The usable answer for a locale and scope: the real answer, else the default.
    pub fn resolve_answer(&self, locale: &str, scope: &str) -> Option<&Value> {
        self.record.resolve(locale, scope)
    }

    /// The usable answer for the question's own locale and scope.
    pub fn answer(&self) -> Option<&Value> {
        self.resolve_answer(&self.locale, &self.scope)
    }

    /// Forget every stored answer and default.
    pub fn erase(&mut self) {
        self.record.erase();
    }

    /// Build the prompt descriptor, pre-filled with `default`.
    pub fn prompt(&self, default: Option<Value>) -> Prompt {
        let mut prompt = Prompt::new(self.name.clone(), self.message.clone(), self.kind.clone())
            .with_choices(self.choices.clone());
        prompt.default = default;
        prompt
    }

    /// Ask this question on its own.
    ///
    /// - If an answer (or default) is stored for the active locale and scope,
    ///   it is returned without prompting.
    /// - With `force`, the question is asked even if answered.
    /// - With `save: false`, nothing is stored and the question is asked every time.
    /// - With `skip`, nothing is ever asked.
    ///
    /// Per-call `options` win over the question's own. Returns `{name: value}`,
    /// nested by dot path, or empty answers if nothing was resolved.
    pub fn ask<P: Prompter + ?Sized>(
        &mut self,
        prompter: &P,
        options: &QuestionOptions,
    ) -> Result<Answers, QuestionError> {
        let opts = self.options.merge(options);
        let locale = opts.locale.as_deref().unwrap_or(&self.locale);
        let scope = opts.scope.as_deref().unwrap_or(&self.scope);
        let existing = self.resolve_answer(locale, scope).cloned();

        let outcome = self.resolve(prompter, &opts, existing, None)?;

        let mut answers = Answers::new();
        if let Some(value) = outcome.into_value() {
            answers.insert(self.name.clone(), value);
        }
        Ok(answers)
    }

    /// Decide between skipping, reusing `existing`, and prompting.
    ///
    /// `opts` must already be merged. `existing` is the best known answer from
    /// any source; `hint` only seeds the prompt. On a fresh answer, the record is
    /// updated according to `is_default` and `save`; the caller is responsible
    /// for persisting it.
    pub fn resolve<P: Prompter + ?Sized>(
        &mut self,
        prompter: &P,
        opts: &QuestionOptions,
        existing: Option<Value>,
        hint: Option<Value>,
    ) -> Result<Outcome, QuestionError> {
        if opts.skips() {
            debug!(question = %self.name, "skipping question");
            return Ok(Outcome::Skipped(existing));
        }

        // save: false means nothing sticks, so there is nothing to reuse either
        let forced = opts.is_forced() || !opts.saves();
        if let Some(value) = &existing
            && !forced
        {
            debug!(question = %self.name, answer = %value, "using existing answer");
            return Ok(Outcome::Existing(value.clone()));
        }

        let seed = existing.or(hint).or_else(|| opts.default.clone());
        let prompt = self.prompt(seed.clone());
        debug!(question = %self.name, forced, "prompting");

        let raw = prompter.prompt(&prompt)?;
        let value = if self.kind == QuestionKind::Checkbox {
            flatten(raw)
        } else {
            raw
        };

        if !is_answer(&value) {
            debug!(question = %self.name, "no answer given");
            return Ok(Outcome::Unanswered);
        }

        let locale = opts.locale.as_deref().unwrap_or(&self.locale).to_string();
        let scope = opts.scope.as_deref().unwrap_or(&self.scope).to_string();

        let saved = if opts.sets_default() {
            self.record.set_default(&locale, value.clone());
            true
        } else if opts.saves() && seed.as_ref() != Some(&value) {
            self.record.set(&locale, &scope, value.clone());
            true
        } else {
            false
        };

        debug!(question = %self.name, answer = %value, saved, "answered");
        Ok(Outcome::Answered { value, saved })
    }
}

fn validate_name(name: &str) -> Result<(), QuestionError> {
    if name.trim().is_empty() {
        return Err(QuestionError::InvalidArgument(
            "question name must not be empty".into(),
        ));
    }
    if name.split('.').any(str::is_empty) {
        return Err(QuestionError::InvalidArgument(format!(
            "question name '{name}' has an empty segment"
        )));
    }
    Ok(())
}
