//! Core types for the questioner crate.
//!
//! This crate provides the foundational, presentation-agnostic types:
//! - `AnswerPath` - Dot-separated question names (`"author.name"`)
//! - `Answers` - Accumulated answers, nested by dot path
//! - `AnswerRecord` - Persisted answers per locale and scope, plus defaults
//! - `Prompt`, `QuestionKind` and `Choice` - What a prompter is asked to render
//! - `Prompter` and `AnswerStore` traits - For implementing collaborators

mod answer_path;
pub use answer_path::AnswerPath;

mod value;
pub use value::{flatten, is_answer, is_truthy};

mod answers;
pub use answers::{AnswerError, Answers};

mod record;
pub use record::AnswerRecord;

mod kind;
pub use kind::{Choice, QuestionKind};

mod prompt;
pub use prompt::Prompt;

mod error;
pub use error::{PromptError, QuestionError, StoreError};

mod traits;
pub use traits::{AnswerStore, Prompter};
