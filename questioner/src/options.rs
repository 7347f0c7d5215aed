use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::{Answers, QuestionError, QuestionSet, is_truthy};

/// Options recognized by questions and question sets.
///
/// Every field is optional so that options can be layered: instance defaults,
/// then the question's own options, then per-call overrides. A field set on a
/// later layer wins; an unset field falls through.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QuestionOptions {
    /// Ask even if an answer already exists.
    pub force: Option<bool>,

    /// Force every question of an `ask` pass.
    #[serde(alias = "forceAll")]
    pub force_all: Option<bool>,

    /// `false` disables persistence, which also means the question is always asked.
    pub save: Option<bool>,

    /// Never prompt; use the current answer, if any.
    pub skip: Option<bool>,

    /// Also read from and persist to the cross-project store.
    pub global: Option<bool>,

    /// `false` disables recording the last-seen answer in the hint store.
    pub hint: Option<bool>,

    /// Store answers as the question's default rather than as a real answer.
    #[serde(alias = "isDefault")]
    pub is_default: Option<bool>,

    /// Seed value for the prompt when nothing better is known.
    pub default: Option<Value>,

    /// Locale used to look up and store answers.
    pub locale: Option<String>,

    /// Scope key (usually the project directory) used to look up and store answers.
    pub scope: Option<String>,

    /// Question to chain after this one.
    pub next: Option<Next>,
}

impl QuestionOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Layer `over` on top of these options. Fields set in `over` win.
    pub fn merge(&self, over: &QuestionOptions) -> QuestionOptions {
        QuestionOptions {
            force: over.force.or(self.force),
            force_all: over.force_all.or(self.force_all),
            save: over.save.or(self.save),
            skip: over.skip.or(self.skip),
            global: over.global.or(self.global),
            hint: over.hint.or(self.hint),
            is_default: over.is_default.or(self.is_default),
            default: over.default.clone().or_else(|| self.default.clone()),
            locale: over.locale.clone().or_else(|| self.locale.clone()),
            scope: over.scope.clone().or_else(|| self.scope.clone()),
            next: over.next.clone().or_else(|| self.next.clone()),
        }
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = Some(force);
        self
    }

    pub fn with_force_all(mut self, force_all: bool) -> Self {
        self.force_all = Some(force_all);
        self
    }

    pub fn with_save(mut self, save: bool) -> Self {
        self.save = Some(save);
        self
    }

    pub fn with_skip(mut self, skip: bool) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn with_global(mut self, global: bool) -> Self {
        self.global = Some(global);
        self
    }

    pub fn with_hint(mut self, hint: bool) -> Self {
        self.hint = Some(hint);
        self
    }

    pub fn with_is_default(mut self, is_default: bool) -> Self {
        self.is_default = Some(is_default);
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn with_next(mut self, next: Next) -> Self {
        self.next = Some(next);
        self
    }

    /// Whether the question must be asked even if answered.
    pub fn is_forced(&self) -> bool {
        self.force == Some(true) || self.force_all == Some(true)
    }

    /// Whether answers are persisted. Only an explicit `false` disables it.
    pub fn saves(&self) -> bool {
        self.save != Some(false)
    }

    /// Whether prompting is skipped.
    pub fn skips(&self) -> bool {
        self.skip == Some(true)
    }

    /// Whether the global store is involved.
    pub fn is_global(&self) -> bool {
        self.global == Some(true)
    }

    /// Whether the hint store records answers. Only an explicit `false` disables it.
    pub fn hints(&self) -> bool {
        self.hint != Some(false)
    }

    /// Whether answers become the question's default.
    pub fn sets_default(&self) -> bool {
        self.is_default == Some(true)
    }
}

/// A hook run after a question is answered.
///
/// The hook receives the answer and a [`Chain`] through which it can look at
/// the question set and the answers so far, and splice further questions in
/// right after the current one. Returning an error aborts the `ask` pass.
pub type NextHook = Arc<dyn Fn(&Value, &mut Chain<'_>) -> Result<(), QuestionError>>;

/// What to do after a question is answered.
#[derive(Clone)]
pub enum Next {
    /// Ask the named question (or group) when the answer matches.
    Question { name: String, when: NextWhen },

    /// Run a hook.
    Hook(NextHook),
}

impl Next {
    /// Ask `name` next when the answer is truthy.
    pub fn question(name: impl Into<String>) -> Self {
        Self::Question {
            name: name.into(),
            when: NextWhen::Truthy,
        }
    }

    /// Ask `name` next when the answer matches `when`.
    pub fn question_when(name: impl Into<String>, when: NextWhen) -> Self {
        Self::Question {
            name: name.into(),
            when,
        }
    }

    /// Run `hook` after the answer is known.
    pub fn hook(
        hook: impl Fn(&Value, &mut Chain<'_>) -> Result<(), QuestionError> + 'static,
    ) -> Self {
        Self::Hook(Arc::new(hook))
    }
}

impl fmt::Debug for Next {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Question { name, when } => f
                .debug_struct("Question")
                .field("name", name)
                .field("when", when)
                .finish(),
            Self::Hook(_) => f.write_str("Hook(..)"),
        }
    }
}

impl<'de> Deserialize<'de> for Next {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum NextRepr {
            Name(String),
            Matching { question: String, equals: Value },
        }

        Ok(match NextRepr::deserialize(deserializer)? {
            NextRepr::Name(name) => Next::question(name),
            NextRepr::Matching { question, equals } => {
                Next::question_when(question, NextWhen::Equals(equals))
            }
        })
    }
}

/// When a chained question name is asked.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum NextWhen {
    /// The answer is truthy (`true`, a non-empty string, a non-zero number, ...).
    #[default]
    Truthy,

    /// The answer equals the given value.
    Equals(Value),
}

impl NextWhen {
    pub fn matches(&self, answer: &Value) -> bool {
        match self {
            Self::Truthy => is_truthy(answer),
            Self::Equals(expected) => answer == expected,
        }
    }
}

/// Handle given to [`NextHook`]s.
pub struct Chain<'a> {
    questions: &'a QuestionSet,
    answers: &'a Answers,
    spliced: Vec<String>,
}

impl<'a> Chain<'a> {
    pub(crate) fn new(questions: &'a QuestionSet, answers: &'a Answers) -> Self {
        Self {
            questions,
            answers,
            spliced: Vec::new(),
        }
    }

    /// The question set being asked.
    pub fn questions(&self) -> &QuestionSet {
        self.questions
    }

    /// The answers accumulated so far, including the current one.
    pub fn answers(&self) -> &Answers {
        self.answers
    }

    /// Ask `name` (a question or a group) right after the current question.
    ///
    /// Several calls are asked in call order. The set's queue is not modified.
    pub fn ask(&mut self, name: impl Into<String>) -> &mut Self {
        self.spliced.push(name.into());
        self
    }

    pub(crate) fn into_spliced(self) -> Vec<String> {
        self.spliced
    }
}
