//! Scripted prompter for testing question sets without user interaction.
//!
//! `TestPrompter` answers prompts from a script keyed by question name and
//! records every prompt it receives, so tests can assert both on the answers
//! and on what was (or was not) asked.
//!
//! # Example
//!
//! ```rust
//! use questioner::{QuestionSet, Session, TestPrompter};
//!
//! let prompter = TestPrompter::new().with_answer("name", "demo");
//! let mut questions = QuestionSet::new(Session::in_memory(), prompter.clone());
//! questions.set("name")?;
//!
//! questions.ask_all()?;
//! questions.ask_all()?;
//!
//! // Answered once; the second pass reuses the session answer.
//! assert_eq!(prompter.asked(), ["name"]);
//! # Ok::<(), questioner::QuestionError>(())
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use serde_json::Value;

use crate::{Prompt, PromptError, Prompter};

/// A prompter that replies from a script.
///
/// Answers scripted for a name are used in order; the last one is reused once
/// the others are consumed. A prompt with no scripted answer gets its default,
/// as if the user just pressed enter, or fails with
/// [`TestPrompterError::MissingAnswer`] if it has none.
///
/// Clones share the script and the record of prompts.
#[derive(Debug, Clone, Default)]
pub struct TestPrompter {
    state: Rc<RefCell<State>>,
}

#[derive(Debug, Default)]
struct State {
    script: HashMap<String, VecDeque<Reply>>,
    prompts: Vec<Prompt>,
}

#[derive(Debug, Clone)]
enum Reply {
    Answer(Value),
    Cancel,
    Fail,
}

/// Error type for TestPrompter.
#[derive(Debug, thiserror::Error)]
pub enum TestPrompterError {
    #[error("Missing answer for question: {0}")]
    MissingAnswer(String),

    #[error("Injected failure for question: {0}")]
    Injected(String),
}

impl From<TestPrompterError> for PromptError {
    fn from(err: TestPrompterError) -> Self {
        PromptError::backend(err)
    }
}

impl TestPrompter {
    /// Create a new prompter with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script an answer for the question `name`. Repeat to script several.
    pub fn with_answer(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(name.into(), Reply::Answer(value.into()));
        self
    }

    /// Cancel the prompt for `name`, like a user pressing Ctrl+C.
    pub fn with_cancel(self, name: impl Into<String>) -> Self {
        self.push(name.into(), Reply::Cancel);
        self
    }

    /// Fail the prompt for `name` with a backend error.
    pub fn fail_on(self, name: impl Into<String>) -> Self {
        self.push(name.into(), Reply::Fail);
        self
    }

    /// Number of prompts received.
    pub fn calls(&self) -> usize {
        self.state.borrow().prompts.len()
    }

    /// Names of the questions prompted, in order.
    pub fn asked(&self) -> Vec<String> {
        self.state
            .borrow()
            .prompts
            .iter()
            .map(|p| p.name.to_string())
            .collect()
    }

    /// Check if `name` was prompted at least once.
    pub fn was_asked(&self, name: &str) -> bool {
        self.state
            .borrow()
            .prompts
            .iter()
            .any(|p| p.name.as_str() == name)
    }

    /// Every prompt received, in order.
    pub fn prompts(&self) -> Vec<Prompt> {
        self.state.borrow().prompts.clone()
    }

    fn push(&self, name: String, reply: Reply) {
        self.state
            .borrow_mut()
            .script
            .entry(name)
            .or_default()
            .push_back(reply);
    }
}

impl Prompter for TestPrompter {
    fn prompt(&self, prompt: &Prompt) -> Result<Value, PromptError> {
        let mut state = self.state.borrow_mut();
        state.prompts.push(prompt.clone());

        let name = prompt.name.as_str();
        let reply = match state.script.get_mut(name) {
            Some(replies) if replies.len() > 1 => replies.pop_front(),
            Some(replies) => replies.front().cloned(),
            None => None,
        };

        match reply {
            Some(Reply::Answer(value)) => Ok(value),
            Some(Reply::Cancel) => Err(PromptError::Cancelled),
            Some(Reply::Fail) => Err(TestPrompterError::Injected(name.to_string()).into()),
            None => prompt
                .default
                .clone()
                .ok_or_else(|| TestPrompterError::MissingAnswer(name.to_string()).into()),
        }
    }
}
