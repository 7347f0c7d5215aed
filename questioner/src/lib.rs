//! # questioner
//!
//! Queue named questions, reuse answers that already exist, prompt for the rest.
//!
//! A [`QuestionSet`] owns a queue of [`Question`]s. Asking walks the queue one
//! question at a time: a question whose answer is already known (from this
//! session, from caller-supplied data, or from a previous run) is not asked
//! again unless forced. Fresh answers are persisted so the next run can reuse
//! them.
//!
//! ## Usage
//!
//! ```rust
//! use questioner::{QuestionSet, Session, TestPrompter};
//! use serde_json::json;
//!
//! let prompter = TestPrompter::new()
//!     .with_answer("author.name", "Jon")
//!     .with_answer("author.url", "http://x");
//!
//! let mut questions = QuestionSet::new(Session::in_memory(), prompter);
//! questions
//!     .set(("author.name", "Author name?"))?
//!     .set(("author.url", "Author url?"))?;
//!
//! let answers = questions.ask(&["author"])?;
//! assert_eq!(
//!     answers.into_value(),
//!     json!({"author": {"name": "Jon", "url": "http://x"}})
//! );
//! # Ok::<(), questioner::QuestionError>(())
//! ```
//!
//! ## Options
//!
//! - `force` - Ask even if an answer exists
//! - `skip` - Never prompt; use whatever answer exists
//! - `save` - `false` disables persistence (and therefore always asks)
//! - `global` - Also read from and write to the cross-project store
//! - `hint` - `false` stops recording the last-seen answer
//! - `is_default` - Store the answer as the default instead of a real answer
//! - `default` - Seed value for the prompt
//! - `next` - Chain another question after this one
//!
//! ## Backends
//!
//! Prompters are separate crates that implement [`Prompter`]:
//! - `questioner-requestty` - CLI prompts via requestty
//! - `questioner-dialoguer` - CLI prompts via dialoguer

// Re-export all types from questioner-types
pub use questioner_types::*;

mod config;
pub use config::{AnswersMode, QuestionSetConfig};

mod data;
pub use data::DataBag;

mod events;
pub use events::Event;

mod groups;
pub use groups::GroupIndex;

mod options;
pub use options::{Chain, Next, NextHook, NextWhen, QuestionOptions};

mod pattern;
pub use pattern::Pattern;

mod question;
pub use question::{Outcome, Question};

mod question_set;
pub use question_set::QuestionSet;

mod session;
pub use session::Session;

mod spec;
pub use spec::{QuestionDef, QuestionSpec};

mod store;
pub use store::{JsonFileStore, MemoryStore};

// Scripted prompter for testing question sets without user interaction
mod test_prompter;
pub use test_prompter::{TestPrompter, TestPrompterError};
