//! Questions loaded from JSON, with a follow-up chosen by a hook.
//!
//! Run with: cargo run -p questioner-dialoguer --example survey
//! Pass `NO_COLOR=1` for the plain theme.

use questioner::{Event, Next, QuestionSet, Session};
use questioner_dialoguer::DialoguerPrompter;
use serde_json::json;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let prompter = if std::env::var_os("NO_COLOR").is_some() {
        DialoguerPrompter::plain()
    } else {
        DialoguerPrompter::new()
    };

    let mut questions = QuestionSet::new(Session::in_memory(), prompter);
    questions.on(|event| {
        if let Event::Answer { name, value } = event {
            println!("  {name} = {value}");
        }
    });

    questions.set_many(&json!({
        "name": "What is your name?",
        "drink": {
            "type": "list",
            "message": "Favorite beverage?",
            "choices": ["coffee", "tea", "water"]
        },
        "toppings": {
            "type": "checkbox",
            "message": "Pizza toppings?",
            "choices": ["cheese", "olives", {"name": "basil", "checked": true}]
        },
        "coffee.roast": {"type": "list", "choices": ["light", "dark"]},
        "tea.kind": {"type": "list", "choices": ["green", "black"]}
    }))?;
    questions.unqueue(&["coffee", "tea"]);

    let follow_up = Next::hook(|answer, chain| {
        if let Some(drink) = answer.as_str()
            && chain.questions().has(drink)
        {
            chain.ask(drink);
        }
        Ok(())
    });
    if let Some(drink) = questions.get_mut("drink") {
        drink.options_mut().next = Some(follow_up);
    }

    let answers = questions.ask_all()?;
    println!("{:#}", json!(answers));
    Ok(())
}
