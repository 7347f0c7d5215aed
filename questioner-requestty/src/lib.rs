//! Requestty prompter for questioner.
//!
//! This crate renders questioner prompts on the command line using the
//! `requestty` library.
//!
//! # Example
//!
//! ```no_run
//! use questioner::{QuestionSet, Session};
//! use questioner_requestty::RequesttyPrompter;
//!
//! fn main() -> anyhow::Result<()> {
//!     let session = Session::open_default("my-tool")?;
//!     let mut questions = QuestionSet::new(session, RequesttyPrompter::new());
//!     questions
//!         .set(("name", "Project name?"))?
//!         .confirm("private", "Private project?")?;
//!
//!     let answers = questions.ask_all()?;
//!     println!("{:#}", answers.into_value());
//!     Ok(())
//! }
//! ```

mod backend;

pub use backend::RequesttyError;
pub use backend::RequesttyPrompter;
