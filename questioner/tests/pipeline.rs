//! Integration tests for the asking pipeline

use std::cell::RefCell;
use std::rc::Rc;

use questioner::{
    AnswerPath, AnswersMode, Event, MemoryStore, Next, NextWhen, QuestionDef, QuestionError,
    QuestionOptions, QuestionSet, QuestionSetConfig, Session, TestPrompter,
};
use serde_json::json;

const SCOPE: &str = "/work/demo";

fn question_set(session: &Session, prompter: &TestPrompter) -> QuestionSet {
    QuestionSet::with_config(
        QuestionSetConfig::new().with_scope(SCOPE),
        session.clone(),
        prompter.clone(),
    )
}

/// A set that does not reuse session answers, so only stores seed prompts.
fn fresh_question_set(session: &Session, prompter: &TestPrompter) -> QuestionSet {
    QuestionSet::with_config(
        QuestionSetConfig::new()
            .with_scope(SCOPE)
            .with_answers(AnswersMode::Fresh),
        session.clone(),
        prompter.clone(),
    )
}

fn scoped_question_set(session: &Session, prompter: &TestPrompter, scope: &str) -> QuestionSet {
    QuestionSet::with_config(
        QuestionSetConfig::new()
            .with_scope(scope)
            .with_answers(AnswersMode::Fresh),
        session.clone(),
        prompter.clone(),
    )
}

#[test]
fn test_answered_once_per_session() {
    let session = Session::in_memory();
    let prompter = TestPrompter::new().with_answer("name", "demo");
    let mut questions = question_set(&session, &prompter);
    questions.set("name").unwrap();

    let first = questions.ask_all().unwrap();
    let second = questions.ask_all().unwrap();

    assert_eq!(first.into_value(), json!({"name": "demo"}));
    assert_eq!(second.into_value(), json!({"name": "demo"}));
    assert_eq!(prompter.calls(), 1);
}

#[test]
fn test_ask_group() {
    let session = Session::in_memory();
    let prompter = TestPrompter::new()
        .with_answer("author.name", "Jon")
        .with_answer("author.url", "http://x");
    let mut questions = question_set(&session, &prompter);
    questions
        .set(("author.name", "Author name?"))
        .unwrap()
        .set(("author.url", "Author url?"))
        .unwrap()
        .set("license")
        .unwrap();

    let answers = questions.ask(&["author"]).unwrap();

    assert_eq!(
        answers.into_value(),
        json!({"author": {"name": "Jon", "url": "http://x"}})
    );
    assert_eq!(prompter.asked(), ["author.name", "author.url"]);
}

#[test]
fn test_save_false_asks_every_time() {
    let session = Session::in_memory();
    let prompter = TestPrompter::new().with_answer("q", "a").with_answer("q", "b");
    let mut questions = question_set(&session, &prompter);
    questions
        .set_with("q", QuestionOptions::new().with_save(false))
        .unwrap();

    let first = questions.ask_all().unwrap();
    let second = questions.ask_all().unwrap();

    assert_eq!(first.into_value(), json!({"q": "a"}));
    assert_eq!(second.into_value(), json!({"q": "b"}));
    assert_eq!(prompter.calls(), 2);
    assert!(!questions.has_answer("q"));
}

#[test]
fn test_force_asks_despite_stored_answer() {
    let session = Session::in_memory();
    let prompter = TestPrompter::new().with_answer("q", "new");
    let mut questions = question_set(&session, &prompter);
    questions
        .set_with("q", QuestionOptions::new().with_force(true))
        .unwrap()
        .set_answer("q", "old")
        .unwrap();

    let answers = questions.ask_all().unwrap();

    assert_eq!(answers.into_value(), json!({"q": "new"}));
    assert_eq!(prompter.prompts()[0].default, Some(json!("old")));
    assert_eq!(questions.get_answer("q"), Some(&json!("new")));
}

#[test]
fn test_skip_never_prompts() {
    let session = Session::in_memory();
    let prompter = TestPrompter::new().with_answer("a", "x").with_answer("b", "y");
    let mut questions = question_set(&session, &prompter);
    questions
        .set("a")
        .unwrap()
        .set_answer("a", "stored")
        .unwrap()
        .set("b")
        .unwrap();

    let options = QuestionOptions::new().with_skip(true).with_force(true);
    let answers = questions.ask_with(&[], &options).unwrap();

    assert_eq!(answers.into_value(), json!({"a": "stored"}));
    assert_eq!(prompter.calls(), 0);
}

#[test]
fn test_stored_answers_survive_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let prompter = TestPrompter::new().with_answer("name", "demo");

    {
        let session = Session::open(dir.path(), "demo").unwrap();
        let mut questions = question_set(&session, &prompter);
        questions.set("name").unwrap();
        questions.ask_all().unwrap();
    }

    let session = Session::open(dir.path(), "demo").unwrap();
    let mut questions = question_set(&session, &prompter);
    questions.set("name").unwrap();
    let answers = questions.ask_all().unwrap();

    assert_eq!(answers.into_value(), json!({"name": "demo"}));
    assert_eq!(prompter.calls(), 1);
}

#[test]
fn test_stored_answers_are_per_scope() {
    let session = Session::in_memory();
    let prompter = TestPrompter::new()
        .with_answer("name", "one")
        .with_answer("name", "two");

    let mut here = question_set(&session, &prompter);
    here.set("name").unwrap();
    here.ask_all().unwrap();

    let mut there = QuestionSet::with_config(
        QuestionSetConfig::new()
            .with_scope("/work/other")
            .with_answers(AnswersMode::Fresh),
        session.clone(),
        prompter.clone(),
    );
    there.set("name").unwrap();
    let answers = there.ask_all().unwrap();

    assert_eq!(answers.into_value(), json!({"name": "two"}));
    assert_eq!(prompter.calls(), 2);
}

#[test]
fn test_answer_wins_over_default() {
    let session = Session::in_memory();
    let prompter = TestPrompter::new();
    let mut questions = question_set(&session, &prompter);

    let question = questions.add_question("license").unwrap();
    question.set_default("en", "MIT");
    assert_eq!(questions.get_answer("license"), Some(&json!("MIT")));

    questions.set_answer("license", "Apache-2.0").unwrap();
    let answers = questions.ask_all().unwrap();

    assert_eq!(answers.into_value(), json!({"license": "Apache-2.0"}));
    assert_eq!(prompter.calls(), 0);
}

#[test]
fn test_default_question_stores_default() {
    let session = Session::in_memory();
    let prompter = TestPrompter::new().with_answer("license", "MIT");
    let mut questions = question_set(&session, &prompter);
    questions
        .set_with("license", QuestionOptions::new().with_is_default(true))
        .unwrap();

    questions.ask_all().unwrap();

    let question = questions.question("license").unwrap();
    assert_eq!(question.get_default("en"), Some(&json!("MIT")));
    assert_eq!(question.get("en"), None);
}

#[test]
fn test_data_bag_answers_without_prompting() {
    let session = Session::in_memory();
    let prompter = TestPrompter::new().with_answer("author.url", "http://x");
    let mut questions = question_set(&session, &prompter);
    questions
        .set("author.name")
        .unwrap()
        .set("author.url")
        .unwrap();
    questions.merge_data(json!({"author": {"name": "Jon"}}));
    assert!(questions.has_data("author.name"));

    let answers = questions.ask_all().unwrap();

    assert_eq!(
        answers.into_value(),
        json!({"author": {"name": "Jon", "url": "http://x"}})
    );
    assert_eq!(prompter.asked(), ["author.url"]);
}

#[test]
fn test_fresh_answers_per_call() {
    let session = Session::in_memory();
    let prompter = TestPrompter::new().with_answer("a", 1).with_answer("b", 2);
    let mut questions = fresh_question_set(&session, &prompter);
    questions.set("a").unwrap().set("b").unwrap();

    questions.ask(&["a"]).unwrap();
    let answers = questions.ask(&["b"]).unwrap();

    assert_eq!(answers.into_value(), json!({"b": 2}));
    assert!(session.answers().is_empty());
}

#[test]
fn test_session_answers_accumulate() {
    let session = Session::in_memory();
    let prompter = TestPrompter::new().with_answer("a", 1).with_answer("b", 2);
    let mut questions = question_set(&session, &prompter);
    questions.set("a").unwrap().set("b").unwrap();

    questions.ask(&["a"]).unwrap();
    let answers = questions.ask(&["b"]).unwrap();

    assert_eq!(answers.into_value(), json!({"a": 1, "b": 2}));
}

#[test]
fn test_sets_share_session_answers() {
    let session = Session::in_memory();
    let prompter = TestPrompter::new().with_answer("name", "demo");

    let mut first = question_set(&session, &prompter);
    first.set("name").unwrap();
    first.ask_all().unwrap();

    let mut second = QuestionSet::new(session.clone(), TestPrompter::new());
    second
        .set_with("name", QuestionOptions::new().with_scope("/elsewhere"))
        .unwrap();
    let answers = second.ask_all().unwrap();

    assert_eq!(answers.into_value(), json!({"name": "demo"}));
}

#[test]
fn test_next_question_when_truthy() {
    let session = Session::in_memory();
    let prompter = TestPrompter::new()
        .with_answer("db.use", true)
        .with_answer("db.url", "postgres://");
    let mut questions = question_set(&session, &prompter);
    questions
        .set(
            QuestionDef::new("db.use")
                .with_kind("confirm")
                .with_options(QuestionOptions::new().with_next(Next::question("db.url"))),
        )
        .unwrap()
        .set("db.url")
        .unwrap()
        .unqueue(&["db.url"]);

    let answers = questions.ask_all().unwrap();

    assert_eq!(
        answers.into_value(),
        json!({"db": {"use": true, "url": "postgres://"}})
    );
    assert_eq!(prompter.asked(), ["db.use", "db.url"]);
}

#[test]
fn test_next_question_skipped_when_falsy() {
    let session = Session::in_memory();
    let prompter = TestPrompter::new().with_answer("db.use", false);
    let mut questions = question_set(&session, &prompter);
    questions
        .set(
            QuestionDef::new("db.use")
                .with_kind("confirm")
                .with_options(QuestionOptions::new().with_next(Next::question("db.url"))),
        )
        .unwrap()
        .set("db.url")
        .unwrap()
        .unqueue(&["db.url"]);

    let answers = questions.ask_all().unwrap();

    assert_eq!(answers.into_value(), json!({"db": {"use": false}}));
    assert!(!prompter.was_asked("db.url"));
}

#[test]
fn test_next_question_on_literal_match() {
    let session = Session::in_memory();
    let prompter = TestPrompter::new()
        .with_answer("db.kind", "sqlite")
        .with_answer("db.url", "postgres://");
    let mut questions = question_set(&session, &prompter);
    let next = Next::question_when("db.url", NextWhen::Equals(json!("postgres")));
    questions
        .set_with("db.kind", QuestionOptions::new().with_next(next))
        .unwrap()
        .set("db.url")
        .unwrap()
        .unqueue(&["db.url"]);

    questions.ask_all().unwrap();

    assert_eq!(prompter.asked(), ["db.kind"]);
}

#[test]
fn test_next_hook_splices_after_current() {
    let session = Session::in_memory();
    let prompter = TestPrompter::new()
        .with_answer("a", "x")
        .with_answer("b", "y")
        .with_answer("c", "z")
        .with_answer("d", "w");
    let mut questions = question_set(&session, &prompter);
    let hook = Next::hook(|answer, chain| {
        assert_eq!(answer, &json!("x"));
        assert_eq!(chain.answers().get(&"a".into()), Some(&json!("x")));
        chain.ask("b").ask("c");
        Ok(())
    });
    questions
        .set_with("a", QuestionOptions::new().with_next(hook))
        .unwrap()
        .set("b")
        .unwrap()
        .set("c")
        .unwrap()
        .set("d")
        .unwrap()
        .unqueue(&["b", "c"]);

    questions.ask_all().unwrap();

    assert_eq!(prompter.asked(), ["a", "b", "c", "d"]);
    assert_eq!(questions.queue(), ["a", "d"]);
}

#[test]
fn test_next_hook_error_aborts() {
    let session = Session::in_memory();
    let prompter = TestPrompter::new().with_answer("a", "x").with_answer("b", "y");
    let mut questions = question_set(&session, &prompter);
    let hook = Next::hook(|_, _| Err(QuestionError::InvalidArgument("boom".into())));
    questions
        .set_with("a", QuestionOptions::new().with_next(hook))
        .unwrap()
        .set("b")
        .unwrap();

    let err = questions.ask_all().unwrap_err();

    assert!(matches!(err, QuestionError::InvalidArgument(ref m) if m == "boom"));
    assert!(!prompter.was_asked("b"));
}

#[test]
fn test_prompt_failure_stops_pipeline() {
    let session = Session::in_memory();
    let prompter = TestPrompter::new()
        .with_answer("a", "x")
        .fail_on("b")
        .with_answer("c", "z");
    let mut questions = question_set(&session, &prompter);
    questions.set("a").unwrap().set("b").unwrap().set("c").unwrap();

    let err = questions.ask_all().unwrap_err();

    assert!(matches!(err, QuestionError::Prompt(_)));
    assert_eq!(prompter.asked(), ["a", "b"]);
    // Answers resolved before the failure are kept.
    assert_eq!(session.get_answer(&"a".into()), Some(json!("x")));
}

#[test]
fn test_cancellation_is_reported() {
    let session = Session::in_memory();
    let prompter = TestPrompter::new().with_cancel("a");
    let mut questions = question_set(&session, &prompter);
    questions.set("a").unwrap();

    let err = questions.ask_all().unwrap_err();
    assert!(err.is_cancelled());
}

#[test]
fn test_empty_answer_is_not_folded() {
    let session = Session::in_memory();
    let prompter = TestPrompter::new().with_answer("a", "").with_answer("b", "y");
    let mut questions = question_set(&session, &prompter);
    questions.set("a").unwrap().set("b").unwrap();

    let answers = questions.ask_all().unwrap();

    assert_eq!(answers.into_value(), json!({"b": "y"}));
    assert!(!questions.has_answer("a"));
}

#[test]
fn test_events() {
    let session = Session::in_memory();
    let prompter = TestPrompter::new().with_answer("name", "demo");
    let mut questions = question_set(&session, &prompter);

    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    questions.on(move |event| sink.borrow_mut().push(event.clone()));

    questions.set("name").unwrap();
    let answers = questions.ask_all().unwrap();

    assert_eq!(
        *events.borrow(),
        [
            Event::Set {
                name: "name".into()
            },
            Event::Ask {
                name: "name".into(),
                answer: None
            },
            Event::Answer {
                name: "name".into(),
                value: json!("demo")
            },
            Event::Answers(answers),
        ]
    );
}

#[test]
fn test_error_event() {
    let session = Session::in_memory();
    let prompter = TestPrompter::new().fail_on("a");
    let mut questions = question_set(&session, &prompter);

    let errors = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&errors);
    questions.on(move |event| {
        if let Event::Error { name, .. } = event {
            sink.borrow_mut().push(name.clone());
        }
    });

    questions.set("a").unwrap();
    assert!(questions.ask_all().is_err());
    assert_eq!(*errors.borrow(), [Some(AnswerPath::new("a"))]);
}

#[test]
fn test_global_answers_shared_across_projects() {
    let dir = tempfile::tempdir().unwrap();
    let global = QuestionOptions::new().with_global(true);

    {
        let session = Session::open(dir.path(), "one").unwrap();
        let prompter = TestPrompter::new().with_answer("author.name", "Jon");
        let mut questions = question_set(&session, &prompter);
        questions.set_with("author.name", global.clone()).unwrap();
        questions.ask_all().unwrap();
    }

    let session = Session::open(dir.path(), "two").unwrap();
    let prompter = TestPrompter::new();
    let mut questions = QuestionSet::with_config(
        QuestionSetConfig::new().with_scope("/work/two"),
        session,
        prompter.clone(),
    );
    questions.set_with("author.name", global).unwrap();
    let answers = questions.ask_all().unwrap();

    assert_eq!(answers.into_value(), json!({"author": {"name": "Jon"}}));
    assert_eq!(prompter.calls(), 0);
}

#[test]
fn test_hints_seed_the_prompt() {
    let session = Session::in_memory();
    let prompter = TestPrompter::new().with_answer("q", "a").with_answer("q", "b");
    let mut questions = fresh_question_set(&session, &prompter);
    questions
        .set_with("q", QuestionOptions::new().with_save(false))
        .unwrap();

    questions.ask_all().unwrap();
    questions.ask_all().unwrap();

    let prompts = prompter.prompts();
    assert_eq!(prompts[0].default, None);
    assert_eq!(prompts[1].default, Some(json!("a")));
}

#[test]
fn test_hints_disabled() {
    let session = Session::in_memory();
    let prompter = TestPrompter::new().with_answer("q", "a").with_answer("q", "b");
    let mut questions = fresh_question_set(&session, &prompter);
    questions
        .set_with(
            "q",
            QuestionOptions::new().with_save(false).with_hint(false),
        )
        .unwrap();

    questions.ask_all().unwrap();
    questions.ask_all().unwrap();

    assert_eq!(prompter.prompts()[1].default, None);
}

#[test]
fn test_force_by_pattern() {
    let session = Session::in_memory();
    let prompter = TestPrompter::new()
        .with_answer("project.name", "new")
        .with_answer("author.name", "new");
    let mut questions = question_set(&session, &prompter);
    questions
        .set("project.name")
        .unwrap()
        .set_answer("project.name", "old")
        .unwrap()
        .set("author.name")
        .unwrap()
        .set_answer("author.name", "old")
        .unwrap()
        .force(&["project.*"])
        .unwrap();

    let answers = questions.ask_all().unwrap();

    assert_eq!(
        answers.into_value(),
        json!({"project": {"name": "new"}, "author": {"name": "old"}})
    );
    assert_eq!(prompter.asked(), ["project.name"]);
}

#[test]
fn test_force_all() {
    let session = Session::in_memory();
    let prompter = TestPrompter::new().with_answer("a", "new").with_answer("b", "new");
    let mut questions = question_set(&session, &prompter);
    questions
        .set("a")
        .unwrap()
        .set_answer("a", "old")
        .unwrap()
        .set("b")
        .unwrap()
        .set_answer("b", "old")
        .unwrap();

    let options = QuestionOptions::new().with_force_all(true);
    let answers = questions.ask_with(&[], &options).unwrap();

    assert_eq!(answers.into_value(), json!({"a": "new", "b": "new"}));
}

#[test]
fn test_match_queue_limits_ask_all() {
    let session = Session::in_memory();
    let prompter = TestPrompter::new()
        .with_answer("project.name", "demo")
        .with_answer("author.name", "Jon");
    let mut questions = question_set(&session, &prompter);
    questions
        .set("project.name")
        .unwrap()
        .set("author.name")
        .unwrap()
        .match_queue(&["project.*"])
        .unwrap();

    let answers = questions.ask_all().unwrap();

    assert_eq!(answers.into_value(), json!({"project": {"name": "demo"}}));
}

#[test]
fn test_erase_drops_stored_answers() {
    let session = Session::in_memory();
    let prompter = TestPrompter::new().with_answer("name", "demo");
    let mut questions = question_set(&session, &prompter);
    questions.set("name").unwrap();
    questions.ask_all().unwrap();

    questions.erase("name").unwrap();
    assert!(!questions.has("name"));

    questions.set("name").unwrap();
    assert!(!questions.has_answer("name"));
    assert!(!session.has_answer(&"name".into()));
}

#[test]
fn test_custom_stores() {
    let project = MemoryStore::new().with_value(
        "name",
        json!({"answers": {"en": {SCOPE: "from-store"}}}),
    );
    let session = Session::new(project, MemoryStore::new(), MemoryStore::new());
    let prompter = TestPrompter::new();
    let mut questions = question_set(&session, &prompter);
    questions.set("name").unwrap();

    let answers = questions.ask_all().unwrap();

    assert_eq!(answers.into_value(), json!({"name": "from-store"}));
    assert_eq!(prompter.calls(), 0);
}

#[test]
fn test_unknown_names_ask_nothing() {
    let session = Session::in_memory();
    let prompter = TestPrompter::new();
    let mut questions = question_set(&session, &prompter);
    questions.set("a").unwrap();

    let answers = questions.ask(&["nope"]).unwrap();

    assert!(answers.is_empty());
    assert_eq!(prompter.calls(), 0);
}

#[test]
fn test_empty_existing_answer_is_asked() {
    let session = Session::in_memory();
    let prompter = TestPrompter::new().with_answer("name", "demo");
    let mut questions = question_set(&session, &prompter);
    questions.set("name").unwrap();
    questions.set_data("name", "");

    let answers = questions.ask_all().unwrap();

    assert_eq!(answers.into_value(), json!({"name": "demo"}));
    assert_eq!(prompter.calls(), 1);
}

#[test]
fn test_empty_global_answer_is_asked() {
    let global = MemoryStore::new().with_value("author.name", json!({"en": ""}));
    let session = Session::new(MemoryStore::new(), global, MemoryStore::new());
    let prompter = TestPrompter::new().with_answer("author.name", "Jon");
    let mut questions = question_set(&session, &prompter);
    questions
        .set_with("author.name", QuestionOptions::new().with_global(true))
        .unwrap();

    let answers = questions.ask_all().unwrap();

    assert_eq!(answers.into_value(), json!({"author": {"name": "Jon"}}));
    assert_eq!(prompter.calls(), 1);
}

#[test]
fn test_sets_in_other_scopes_keep_each_others_answers() {
    let session = Session::in_memory();
    let prompter = TestPrompter::new()
        .with_answer("name", "A")
        .with_answer("name", "B");

    let mut a = scoped_question_set(&session, &prompter, "/a");
    let mut b = scoped_question_set(&session, &prompter, "/b");
    a.set("name").unwrap();
    b.set("name").unwrap();
    a.ask_all().unwrap();
    b.ask_all().unwrap();

    let mut later_a = scoped_question_set(&session, &prompter, "/a");
    later_a.set("name").unwrap();
    let mut later_b = scoped_question_set(&session, &prompter, "/b");
    later_b.set("name").unwrap();

    assert_eq!(later_a.get_answer("name"), Some(&json!("A")));
    assert_eq!(later_b.get_answer("name"), Some(&json!("B")));
    assert_eq!(prompter.calls(), 2);
}

#[test]
fn test_set_answer_keeps_other_scopes() {
    let session = Session::in_memory();
    let prompter = TestPrompter::new();

    let mut a = scoped_question_set(&session, &prompter, "/a");
    let mut b = scoped_question_set(&session, &prompter, "/b");
    a.set("name").unwrap();
    b.set("name").unwrap();
    a.set_answer("name", "A").unwrap();
    b.set_answer("name", "B").unwrap();

    let mut later_a = scoped_question_set(&session, &prompter, "/a");
    later_a.set("name").unwrap();
    let answers = later_a.ask_all().unwrap();

    assert_eq!(answers.into_value(), json!({"name": "A"}));
    assert_eq!(prompter.calls(), 0);
}

#[test]
fn test_session_answers_ignore_locale() {
    let session = Session::in_memory();
    let prompter = TestPrompter::new().with_answer("name", "demo");
    let mut questions = question_set(&session, &prompter);
    questions.set("name").unwrap();

    questions.ask_all().unwrap();
    let answers = questions
        .ask_with(&["name"], &QuestionOptions::new().with_locale("fr"))
        .unwrap();

    assert_eq!(answers.into_value(), json!({"name": "demo"}));
    assert_eq!(prompter.calls(), 1);
}
