//! # questioner-dialoguer
//!
//! Dialoguer prompter for questioner.
//!
//! This crate renders questioner prompts on the command line using the
//! `dialoguer` library, with a colorful or plain theme.
//!
//! ## Example
//!
//! ```rust,no_run
//! use questioner::{QuestionSet, Session};
//! use questioner_dialoguer::DialoguerPrompter;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut questions = QuestionSet::new(Session::in_memory(), DialoguerPrompter::new());
//!     questions
//!         .set(("name", "What is your name?"))?
//!         .choices("color", "Favorite color?", ["red", "green", "blue"])?;
//!
//!     let answers = questions.ask_all()?;
//!     println!("Hello, {}!", answers.get_str(&"name".into())?);
//!     Ok(())
//! }
//! ```

mod backend;

pub use backend::{DialoguerError, DialoguerPrompter};
