use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::events::Listener;
use crate::{
    AnswerPath, AnswerRecord, Answers, AnswersMode, Chain, Choice, DataBag, Event, GroupIndex,
    Next, Outcome, Pattern, Prompter, Question, QuestionDef, QuestionError, QuestionKind,
    QuestionOptions, QuestionSetConfig, QuestionSpec, Session, StoreError, is_answer,
};

/// A queue of questions and the pipeline that asks them.
///
/// Questions are registered with [`set`](Self::set) and asked with
/// [`ask`](Self::ask). For each question the pipeline looks for an existing
/// answer, in this order:
///
/// 1. answers accumulated in this session (or this call, see [`AnswersMode`])
/// 2. the [data bag](Self::set_data)
/// 3. the question's stored answer, then its stored default
/// 4. the global store, when `global` is enabled
///
/// Only when nothing is found (or the question is forced) is the prompter
/// invoked. Questions are asked strictly one after another.
pub struct QuestionSet {
    session: Session,
    config: QuestionSetConfig,

    /// Name → question.
    cache: HashMap<String, Question>,

    /// Every registered name, in registration order.
    registered: Vec<String>,

    /// Names asked by a bare `ask`.
    queue: Vec<String>,

    groups: GroupIndex,
    data: DataBag,

    /// Patterns from `force()`.
    forced: Vec<Pattern>,

    prompter: Box<dyn Prompter>,
    listeners: Vec<Listener>,
}

impl QuestionSet {
    /// Create a question set with the default configuration.
    pub fn new(session: Session, prompter: impl Prompter + 'static) -> Self {
        Self::with_config(QuestionSetConfig::default(), session, prompter)
    }

    /// Create a question set with the given configuration.
    pub fn with_config(
        config: QuestionSetConfig,
        session: Session,
        prompter: impl Prompter + 'static,
    ) -> Self {
        Self {
            session,
            config,
            cache: HashMap::new(),
            registered: Vec::new(),
            queue: Vec::new(),
            groups: GroupIndex::new(),
            data: DataBag::new(),
            forced: Vec::new(),
            prompter: Box::new(prompter),
            listeners: Vec::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &QuestionSetConfig {
        &self.config
    }

    /// Register a question, replacing any question of the same name.
    ///
    /// The name is appended to the queue once, however often it is set.
    pub fn set(&mut self, spec: impl Into<QuestionSpec>) -> Result<&mut Self, QuestionError> {
        self.add_question(spec)?;
        Ok(self)
    }

    /// Register a question with extra options. `options` win over options in `spec`.
    pub fn set_with(
        &mut self,
        spec: impl Into<QuestionSpec>,
        options: QuestionOptions,
    ) -> Result<&mut Self, QuestionError> {
        let spec: QuestionSpec = spec.into();
        let mut def = spec.into_def();
        def.options = def.options.merge(&options);
        self.set(def)
    }

    /// Register every entry of a JSON object mapping name to a message or a definition.
    pub fn set_many(&mut self, questions: &Value) -> Result<&mut Self, QuestionError> {
        let Value::Object(entries) = questions else {
            return Err(QuestionError::InvalidArgument(format!(
                "expected an object of questions, got {questions}"
            )));
        };
        for (key, value) in entries {
            self.set(QuestionSpec::from_entry(key, value)?)?;
        }
        Ok(self)
    }

    /// Register a question and return it.
    pub fn add_question(
        &mut self,
        spec: impl Into<QuestionSpec>,
    ) -> Result<&mut Question, QuestionError> {
        let mut question = Question::from_spec(spec)?;
        if question.options().locale.is_none() {
            question.set_locale(self.config.locale.clone());
        }
        if question.options().scope.is_none() {
            question.set_scope(self.config.scope.clone());
        }

        let name = question.name().to_string();
        if let Some(record) = self.stored_record(&name)? {
            question.set_record(record);
        }

        if !self.cache.contains_key(&name) {
            self.registered.push(name.clone());
        }
        if !self.queue.contains(&name) {
            self.queue.push(name.clone());
        }
        self.groups.add(question.name());

        trace!(question = %name, "registered question");
        self.emit(Event::Set {
            name: question.name().clone(),
        });

        Ok(match self.cache.entry(name) {
            Entry::Occupied(mut entry) => {
                entry.insert(question);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(question),
        })
    }

    /// Register a yes/no question.
    pub fn confirm(
        &mut self,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<&mut Self, QuestionError> {
        self.set(
            QuestionDef::new(name)
                .with_message(message)
                .with_kind(QuestionKind::Confirm),
        )
    }

    /// Register a single-choice list question.
    ///
    /// Choice questions are not saved unless `save` is set later, so they are
    /// asked every time.
    pub fn choices(
        &mut self,
        name: impl Into<String>,
        message: impl Into<String>,
        choices: impl IntoIterator<Item = impl Into<Choice>>,
    ) -> Result<&mut Self, QuestionError> {
        self.set(
            QuestionDef::new(name)
                .with_message(message)
                .with_kind(QuestionKind::List)
                .with_choices(choices)
                .with_options(QuestionOptions::new().with_save(false)),
        )
    }

    /// Get a registered question.
    pub fn get(&self, name: &str) -> Option<&Question> {
        self.cache.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Question> {
        self.cache.get_mut(name)
    }

    /// Get a registered question, failing with `NotFound`.
    pub fn question(&self, name: &str) -> Result<&Question, QuestionError> {
        self.cache
            .get(name)
            .ok_or_else(|| QuestionError::NotFound(name.to_string()))
    }

    /// Check if `name` is registered, either as a question or as a dot prefix of one.
    pub fn has(&self, name: &str) -> bool {
        self.cache.contains_key(name) || self.matching(name).next().is_some()
    }

    /// Unregister `name` and every question below it.
    pub fn del(&mut self, name: &str) -> &mut Self {
        let names: Vec<String> = self.matching(name).cloned().collect();
        for name in &names {
            if let Some(question) = self.cache.remove(name) {
                self.groups.remove(question.name());
            }
        }
        self.registered.retain(|n| !names.contains(n));
        self.queue.retain(|n| !names.contains(n));
        debug!(removed = names.len(), "deleted questions");
        self
    }

    /// Unregister `name` and every question below it, dropping their stored answers.
    pub fn erase(&mut self, name: &str) -> Result<&mut Self, QuestionError> {
        let names: Vec<String> = self.matching(name).cloned().collect();
        for name in &names {
            self.session.delete_record(name)?;
            self.session.remove_answer(&AnswerPath::new(name.as_str()));
        }
        Ok(self.del(name))
    }

    /// Unregister every question. Stored answers are kept.
    pub fn clear_questions(&mut self) -> &mut Self {
        self.cache.clear();
        self.registered.clear();
        self.queue.clear();
        self.groups.clear();
        self
    }

    /// Forget session answers and caller-supplied data.
    pub fn clear_answers(&mut self) -> &mut Self {
        self.session.clear_answers();
        self.data.clear();
        self
    }

    /// Unregister every question and forget session answers and data.
    pub fn clear(&mut self) -> &mut Self {
        self.clear_questions().clear_answers()
    }

    /// The questions in `group`, in registration order.
    pub fn get_group(&self, group: &str) -> Vec<&Question> {
        self.groups
            .get(group)
            .iter()
            .filter_map(|name| self.cache.get(name))
            .collect()
    }

    /// Supply the value for `name`; the question will not be asked.
    pub fn set_data(&mut self, name: impl Into<AnswerPath>, value: impl Into<Value>) -> &mut Self {
        self.data.set(name, value);
        self
    }

    /// Deep-merge a JSON object of values into the data bag.
    pub fn merge_data(&mut self, values: Value) -> &mut Self {
        self.data.merge(values);
        self
    }

    pub fn get_data(&self, name: &str) -> Option<&Value> {
        self.data.get(&AnswerPath::new(name))
    }

    pub fn has_data(&self, name: &str) -> bool {
        self.data.has(&AnswerPath::new(name))
    }

    /// The names asked by [`ask_all`](Self::ask_all), in order.
    pub fn queue(&self) -> &[String] {
        &self.queue
    }

    /// Append questions (or groups) to the queue.
    pub fn enqueue(&mut self, names: &[&str]) -> &mut Self {
        for name in self.build_queue(names) {
            if !self.queue.contains(&name) {
                self.queue.push(name);
            }
        }
        self
    }

    /// Remove questions (or groups) from the queue. They stay registered.
    pub fn unqueue(&mut self, names: &[&str]) -> &mut Self {
        let names = self.build_queue(names);
        self.queue.retain(|n| !names.contains(n));
        self
    }

    /// Keep only the queued names matching any of the glob `patterns`.
    pub fn match_queue(&mut self, patterns: &[&str]) -> Result<&mut Self, QuestionError> {
        let pattern = Pattern::new(patterns)?;
        self.queue.retain(|name| pattern.is_match(name));
        debug!(queued = self.queue.len(), "filtered queue");
        Ok(self)
    }

    /// Force every question whose name matches any of the glob `patterns`.
    pub fn force(&mut self, patterns: &[&str]) -> Result<&mut Self, QuestionError> {
        self.forced.push(Pattern::new(patterns)?);
        Ok(self)
    }

    /// Store `value` as the answer of `name` for its locale and scope.
    pub fn set_answer(
        &mut self,
        name: &str,
        value: impl Into<Value>,
    ) -> Result<&mut Self, QuestionError> {
        if !self.cache.contains_key(name) {
            return Err(QuestionError::NotFound(name.to_string()));
        }
        self.reload_record(name)?;
        let Some(question) = self.cache.get_mut(name) else {
            return Err(QuestionError::NotFound(name.to_string()));
        };
        let locale = question.locale().to_string();
        question.set(&locale, value);

        let record = serde_json::to_value(question.record()).map_err(StoreError::from)?;
        self.session.save_record(name, record)?;
        Ok(self)
    }

    /// The stored answer (or default) of `name` for its locale and scope.
    pub fn get_answer(&self, name: &str) -> Option<&Value> {
        self.cache.get(name).and_then(Question::answer)
    }

    pub fn has_answer(&self, name: &str) -> bool {
        self.get_answer(name).is_some()
    }

    /// Register a listener for [`Event`]s.
    pub fn on(&mut self, listener: impl FnMut(&Event) + 'static) -> &mut Self {
        self.listeners.push(Box::new(listener));
        self
    }

    /// Expand names into the questions to ask.
    ///
    /// - no names: the whole queue
    /// - a registered name: that question
    /// - a group or dot prefix: every question below it, in registration order
    /// - anything else: nothing
    ///
    /// The result has no duplicates.
    pub fn build_queue(&self, names: &[&str]) -> Vec<String> {
        if names.is_empty() {
            return self.queue.clone();
        }

        let mut queue: Vec<String> = Vec::new();
        for name in names {
            if self.cache.contains_key(*name) {
                if !queue.iter().any(|n| n == name) {
                    queue.push(name.to_string());
                }
                continue;
            }
            for matched in self.matching(name) {
                if !queue.contains(matched) {
                    queue.push(matched.clone());
                }
            }
        }
        queue
    }

    /// Ask every queued question.
    pub fn ask_all(&mut self) -> Result<Answers, QuestionError> {
        self.ask_with(&[], &QuestionOptions::new())
    }

    /// Ask the given questions or groups. An empty slice asks the whole queue.
    pub fn ask(&mut self, names: &[&str]) -> Result<Answers, QuestionError> {
        self.ask_with(names, &QuestionOptions::new())
    }

    /// Ask the given questions or groups with per-call options.
    ///
    /// Call options win over question and instance options. A `locale` given
    /// here selects stored answers, defaults and globals; session answers are
    /// shared by all locales (use [`AnswersMode::Fresh`] to avoid that).
    /// Returns the accumulated answers, or the first error.
    pub fn ask_with(
        &mut self,
        names: &[&str],
        options: &QuestionOptions,
    ) -> Result<Answers, QuestionError> {
        let mut work: VecDeque<String> = self.build_queue(names).into();
        let mut answers = match self.config.answers {
            AnswersMode::Session => self.session.answers(),
            AnswersMode::Fresh => Answers::new(),
        };
        let mut seen: HashSet<String> = HashSet::new();
        debug!(questions = work.len(), "asking");

        while let Some(name) = work.pop_front() {
            if !seen.insert(name.clone()) {
                trace!(question = %name, "already resolved in this pass");
                continue;
            }

            let spliced = match self.resolve_one(&name, options, &mut answers) {
                Ok(spliced) => spliced,
                Err(e) => {
                    warn!(question = %name, "asking failed: {e}");
                    self.emit(Event::Error {
                        name: Some(AnswerPath::new(name)),
                        message: e.to_string(),
                    });
                    return Err(e);
                }
            };

            for next in spliced.iter().rev() {
                for expanded in self.build_queue(&[next.as_str()]).into_iter().rev() {
                    work.push_front(expanded);
                }
            }
        }

        self.emit(Event::Answers(answers.clone()));
        Ok(answers)
    }

    /// Resolve a single question and fold its answer. Returns names to ask next.
    fn resolve_one(
        &mut self,
        name: &str,
        call: &QuestionOptions,
        answers: &mut Answers,
    ) -> Result<Vec<String>, QuestionError> {
        if !self.cache.contains_key(name) {
            return Ok(Vec::new());
        }
        self.reload_record(name)?;
        let Some(question) = self.cache.get(name) else {
            return Ok(Vec::new());
        };

        let mut layered = self.config.options.merge(question.options());
        if self.forced.iter().any(|p| p.is_match(name)) {
            layered.force = Some(true);
        }
        let merged = layered.merge(call);

        let path = question.name().clone();
        let locale = merged
            .locale
            .clone()
            .unwrap_or_else(|| question.locale().to_string());
        let scope = merged
            .scope
            .clone()
            .unwrap_or_else(|| question.scope().to_string());

        let mut existing = answers
            .get(&path)
            .filter(|v| is_answer(v))
            .or_else(|| self.data.get(&path).filter(|v| is_answer(v)))
            .or_else(|| question.resolve_answer(&locale, &scope).filter(|v| is_answer(v)))
            .cloned();
        if existing.is_none() && merged.is_global() {
            existing = self.session.global(name, &locale)?.filter(is_answer);
        }
        let hint = if merged.hints() {
            self.session.hint(name, &locale)?
        } else {
            None
        };

        self.emit(Event::Ask {
            name: path.clone(),
            answer: existing.clone(),
        });

        let opts = merged.with_locale(locale.clone()).with_scope(scope);
        let Some(question) = self.cache.get_mut(name) else {
            return Ok(Vec::new());
        };
        let outcome = question.resolve(&*self.prompter, &opts, existing, hint)?;

        if let Outcome::Answered { value, saved } = &outcome {
            if *saved {
                let record = serde_json::to_value(question.record()).map_err(StoreError::from)?;
                self.session.save_record(name, record)?;
                trace!(question = name, "saved answer record");
            }
            if opts.is_global() {
                self.session.set_global(name, &locale, value.clone())?;
            }
            if opts.hints() {
                self.session.set_hint(name, &locale, value.clone())?;
            }
        }

        let Some(value) = outcome.into_value() else {
            return Ok(Vec::new());
        };

        answers.insert(path.clone(), value.clone());
        if self.config.answers == AnswersMode::Session {
            self.session.set_answer(path.clone(), value.clone());
        }
        self.emit(Event::Answer {
            name: path,
            value: value.clone(),
        });

        match &opts.next {
            None => Ok(Vec::new()),
            Some(Next::Question { name: next, when }) => {
                if when.matches(&value) {
                    debug!(question = name, next = %next, "chaining");
                    Ok(vec![next.clone()])
                } else {
                    Ok(Vec::new())
                }
            }
            Some(Next::Hook(hook)) => {
                let mut chain = Chain::new(self, answers);
                hook(&value, &mut chain)?;
                Ok(chain.into_spliced())
            }
        }
    }

    /// The record saved in the project store for `name`, if any.
    fn stored_record(&self, name: &str) -> Result<Option<AnswerRecord>, QuestionError> {
        let Some(stored) = self.session.load_record(name)? else {
            return Ok(None);
        };
        match serde_json::from_value::<AnswerRecord>(stored) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                warn!(question = %name, "Ignoring unreadable stored answers: {e}");
                Ok(None)
            }
        }
    }

    /// Replace the cached record of `name` with the stored one, which other
    /// sets on the same session may have written since registration.
    fn reload_record(&mut self, name: &str) -> Result<(), QuestionError> {
        if let Some(record) = self.stored_record(name)?
            && let Some(question) = self.cache.get_mut(name)
        {
            question.set_record(record);
        }
        Ok(())
    }

    /// Registered names equal to `prefix` or below it, in registration order.
    fn matching<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a String> + 'a {
        self.registered
            .iter()
            .filter(move |name| AnswerPath::new(name.as_str()).starts_with(prefix))
    }

    fn emit(&mut self, event: Event) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}

impl fmt::Debug for QuestionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuestionSet")
            .field("config", &self.config)
            .field("queue", &self.queue)
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}
