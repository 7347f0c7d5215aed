use serde_json::Value;

use crate::{AnswerPath, Answers};

/// Notifications emitted by a [`QuestionSet`](crate::QuestionSet).
///
/// Register a listener with [`QuestionSet::on`](crate::QuestionSet::on).
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A question was registered or replaced.
    Set { name: AnswerPath },

    /// A question is about to be resolved. `answer` is the best known answer so far.
    Ask {
        name: AnswerPath,
        answer: Option<Value>,
    },

    /// A question was resolved to `value`.
    Answer { name: AnswerPath, value: Value },

    /// An `ask` pass finished with these answers.
    Answers(Answers),

    /// An `ask` pass failed.
    Error {
        name: Option<AnswerPath>,
        message: String,
    },
}

impl Event {
    /// The question the event is about, if any.
    pub fn name(&self) -> Option<&AnswerPath> {
        match self {
            Self::Set { name } | Self::Ask { name, .. } | Self::Answer { name, .. } => Some(name),
            Self::Error { name, .. } => name.as_ref(),
            Self::Answers(_) => None,
        }
    }
}

pub(crate) type Listener = Box<dyn FnMut(&Event)>;
