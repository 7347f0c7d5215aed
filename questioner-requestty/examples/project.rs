//! Ask the questions needed to scaffold a project.
//!
//! Answers are stored under `~/.questioner`, so a second run only asks what is
//! still unknown. Author details are shared by every project.
//!
//! Run with: cargo run -p questioner-requestty --example project
//! Set RUST_LOG=questioner=debug to watch the pipeline decide.

use questioner::{Choice, Next, QuestionDef, QuestionOptions, QuestionSet, Session};
use questioner_requestty::RequesttyPrompter;
use serde_json::json;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let session = Session::open_default("project-example")?;
    let mut questions = QuestionSet::new(session, RequesttyPrompter::new());

    let global = QuestionOptions::new().with_global(true);
    questions
        .set(("project.name", "Project name?"))?
        .set(("project.description", "Description?"))?
        .set_with(("author.name", "Author name?"), global.clone())?
        .set_with(("author.url", "Author url?"), global)?
        .set(
            QuestionDef::new("license")
                .with_message("License?")
                .with_kind("list")
                .with_choices(["MIT", "Apache-2.0", "MPL-2.0"])
                .with_options(QuestionOptions::new().with_default("MIT")),
        )?
        .set(
            QuestionDef::new("ci.enabled")
                .with_message("Set up CI?")
                .with_kind("confirm")
                .with_options(QuestionOptions::new().with_next(Next::question("ci.provider"))),
        )?
        .set(
            QuestionDef::new("ci.provider")
                .with_message("CI provider?")
                .with_kind("expand")
                .with_choices([
                    Choice::new("github").with_key('g'),
                    Choice::new("gitlab").with_key('l'),
                    Choice::new("woodpecker").with_key('w'),
                ]),
        )?
        .unqueue(&["ci.provider"]);

    if std::env::var_os("FORCE_PROJECT").is_some() {
        questions.force(&["project"])?;
    }

    let answers = questions.ask_all()?;
    println!("{:#}", json!(answers));
    if answers.get_bool(&"ci.enabled".into()).unwrap_or(false) {
        let project = answers.get_str(&"project.name".into())?;
        println!("Remember to push a workflow file for {project}.");
    }
    Ok(())
}
