//! Quiz session lifecycle: presents a plan one question at a time, evaluates
//! submissions and keeps the answer log that results are derived from.

use anyhow::Result;
use rand::Rng;

use crate::catalog::{Element, ElementLookup};
use crate::storage::QuizSettings;

use super::clock::{ActiveTimer, Clock, SystemClock};
use super::daily_sets::generate_daily_set;
use super::evaluator::evaluate;
use super::generator::{
    generate_daily_quiz, generate_final_quiz, generate_quick_quiz, generate_quiz, QuizMode,
    QuizPlan,
};
use super::observer::{NoopObserver, QuizObserver};
use super::question::{Difficulty, Question, SubmittedAnswer};
use super::results::{AnswerRecord, QuizResults, ScoringMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingAnswer,
    Answered,
    Completed,
}

/// What happened to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Recorded { correct: bool },
    /// The current question already has an answer; the first one stands.
    AlreadyAnswered,
    /// No question is waiting for an answer.
    NotAcceptingAnswers,
}

pub struct QuizSession {
    clock: Box<dyn Clock>,
    observer: Box<dyn QuizObserver>,
    hints_enabled: bool,
    scoring: ScoringMode,
    plan: QuizPlan,
    state: SessionState,
    index: usize,
    answers: Vec<AnswerRecord>,
    hints_used: u32,
    hints_this_question: u32,
    session_timer: ActiveTimer,
    question_timer: ActiveTimer,
    paused: bool,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new(Box::new(SystemClock), Box::new(NoopObserver))
    }
}

impl QuizSession {
    pub fn new(clock: Box<dyn Clock>, observer: Box<dyn QuizObserver>) -> Self {
        Self {
            clock,
            observer,
            hints_enabled: true,
            scoring: ScoringMode::Percentage,
            plan: QuizPlan::empty(Difficulty::default(), QuizMode::Standard),
            state: SessionState::Idle,
            index: 0,
            answers: Vec::new(),
            hints_used: 0,
            hints_this_question: 0,
            session_timer: ActiveTimer::default(),
            question_timer: ActiveTimer::default(),
            paused: false,
        }
    }

    /// Session configured from the `[quiz]` settings.
    pub fn from_settings(
        settings: &QuizSettings,
        clock: Box<dyn Clock>,
        observer: Box<dyn QuizObserver>,
    ) -> Self {
        Self::new(clock, observer)
            .with_hints_enabled(settings.hints_enabled)
            .with_scoring(settings.scoring_mode())
    }

    pub fn with_hints_enabled(mut self, enabled: bool) -> Self {
        self.hints_enabled = enabled;
        self
    }

    pub fn with_scoring(mut self, scoring: ScoringMode) -> Self {
        self.scoring = scoring;
        self
    }

    /// Starts `plan`, discarding whatever the previous session held.
    pub fn start(&mut self, plan: QuizPlan) {
        let now = self.clock.now();
        self.plan = plan;
        self.index = 0;
        self.answers.clear();
        self.hints_used = 0;
        self.hints_this_question = 0;
        self.paused = false;
        self.session_timer = ActiveTimer::started(now);
        self.question_timer = ActiveTimer::started(now);
        if self.plan.is_empty() {
            self.session_timer.stop(now);
            self.state = SessionState::Completed;
            log::info!("{:?} quiz has no questions; completed immediately", self.plan.mode);
        } else {
            self.state = SessionState::AwaitingAnswer;
            log::info!(
                "started {:?} quiz with {} questions at {:?} difficulty",
                self.plan.mode,
                self.plan.len(),
                self.plan.difficulty
            );
        }
    }

    pub fn start_quiz<R: Rng + ?Sized>(
        &mut self,
        elements: &[Element],
        difficulty: Difficulty,
        rng: &mut R,
    ) {
        self.start(generate_quiz(elements, difficulty, rng));
    }

    pub fn start_final_challenge<R: Rng + ?Sized>(&mut self, elements: &[Element], rng: &mut R) {
        self.start(generate_final_quiz(elements, rng));
    }

    pub fn start_quick_quiz<L: ElementLookup + ?Sized, R: Rng + ?Sized>(
        &mut self,
        lookup: &L,
        difficulty: Difficulty,
        rng: &mut R,
    ) {
        self.start(generate_quick_quiz(lookup, difficulty, rng));
    }

    /// Randomized quiz over one day's elements, with the whole catalog as the
    /// distractor reference.
    pub fn start_daily_quiz<L: ElementLookup + ?Sized, R: Rng + ?Sized>(
        &mut self,
        lookup: &L,
        day: u8,
        difficulty: Difficulty,
        rng: &mut R,
    ) {
        self.start(generate_daily_quiz(lookup, day, difficulty, rng));
    }

    /// Hand-authored question set for `day`.
    pub fn start_daily_set<L: ElementLookup + ?Sized, R: Rng + ?Sized>(
        &mut self,
        lookup: &L,
        day: u8,
        rng: &mut R,
    ) {
        self.start(generate_daily_set(lookup, day, rng));
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn plan(&self) -> &QuizPlan {
        &self.plan
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            SessionState::AwaitingAnswer | SessionState::Answered => {
                self.plan.questions.get(self.index)
            }
            SessionState::Idle | SessionState::Completed => None,
        }
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_completed(&self) -> bool {
        self.state == SessionState::Completed
    }

    pub fn submit_answer(&mut self, answer: SubmittedAnswer) -> SubmitOutcome {
        match self.state {
            SessionState::AwaitingAnswer => {}
            SessionState::Answered => {
                log::debug!("ignoring second answer for question {}", self.index + 1);
                return SubmitOutcome::AlreadyAnswered;
            }
            SessionState::Idle | SessionState::Completed => {
                return SubmitOutcome::NotAcceptingAnswers;
            }
        }
        let Some(question) = self.plan.questions.get(self.index) else {
            return SubmitOutcome::NotAcceptingAnswers;
        };
        let correct = evaluate(question, &answer);
        let elapsed_ms = self.question_timer.active_ms(self.clock.now());
        self.answers.push(AnswerRecord {
            question: question.clone(),
            submitted: answer,
            correct,
            elapsed_ms,
        });
        self.state = SessionState::Answered;

        let notified = if correct {
            self.observer.on_correct()
        } else {
            self.observer.on_incorrect()
        };
        report_observer_failure("answer", notified);
        SubmitOutcome::Recorded { correct }
    }

    /// Moves past an answered question. Returns `false` when nothing moved.
    pub fn next_question(&mut self) -> bool {
        if self.state != SessionState::Answered {
            return false;
        }
        let now = self.clock.now();
        self.index += 1;
        if self.index >= self.plan.len() {
            self.complete(now);
        } else {
            self.question_timer = ActiveTimer::started(now);
            self.hints_this_question = 0;
            if self.paused {
                self.question_timer.pause(now);
            }
            self.state = SessionState::AwaitingAnswer;
        }
        true
    }

    /// Ends the session early; unanswered questions do not count.
    pub fn finish(&mut self) {
        if matches!(
            self.state,
            SessionState::AwaitingAnswer | SessionState::Answered
        ) {
            let now = self.clock.now();
            self.complete(now);
        }
    }

    /// Reveals the current question's hint, at most `hints_allowed` times per
    /// question.
    pub fn show_hint(&mut self) -> Option<String> {
        if !self.hints_enabled || self.state != SessionState::AwaitingAnswer {
            return None;
        }
        let question = self.plan.questions.get(self.index)?;
        if self.hints_this_question >= question.difficulty.hints_allowed() {
            log::debug!("hint limit reached for question {}", self.index + 1);
            return None;
        }
        let hint = question.hint.clone();
        if hint.trim().is_empty() {
            return None;
        }
        self.hints_used += 1;
        self.hints_this_question += 1;
        report_observer_failure("hint", self.observer.on_hint_shown(&hint));
        Some(hint)
    }

    pub fn pause(&mut self) {
        if self.paused || self.state == SessionState::Completed {
            return;
        }
        let now = self.clock.now();
        self.session_timer.pause(now);
        self.question_timer.pause(now);
        self.paused = true;
    }

    pub fn resume(&mut self) {
        if !self.paused {
            return;
        }
        let now = self.clock.now();
        self.session_timer.resume(now);
        self.question_timer.resume(now);
        self.paused = false;
    }

    /// Seconds left on the current question's time limit; zero once it has
    /// run out. The session does not act on expiry.
    pub fn question_time_remaining_secs(&self) -> Option<u64> {
        let question = self.current_question()?;
        let limit = u64::from(question.difficulty.time_limit_secs());
        let spent = self.question_timer.active_ms(self.clock.now()) / 1000;
        Some(limit.saturating_sub(spent))
    }

    /// Active seconds so far, excluding paused time.
    pub fn elapsed_seconds(&self) -> u64 {
        self.session_timer.active_ms(self.clock.now()) / 1000
    }

    /// Results derived from the answer log; callable mid-session.
    pub fn results(&self) -> QuizResults {
        QuizResults::from_answers(
            &self.answers,
            self.session_timer.active_ms(self.clock.now()),
            self.hints_used,
            self.scoring,
        )
    }

    fn complete(&mut self, now: chrono::DateTime<chrono::Utc>) {
        self.session_timer.stop(now);
        self.question_timer.stop(now);
        self.paused = false;
        self.state = SessionState::Completed;
        let results = self.results();
        log::info!(
            "{:?} quiz completed: {}/{} correct, score {}",
            self.plan.mode,
            results.correct,
            results.total,
            results.score
        );
    }
}

fn report_observer_failure(event: &str, outcome: Result<()>) {
    if let Err(err) = outcome {
        log::warn!("quiz observer failed on {event} event: {err:#}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::quiz::clock::ManualClock;
    use crate::quiz::question::QuestionKind;
    use anyhow::anyhow;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct FailingObserver {
        events: Rc<RefCell<Vec<String>>>,
    }

    impl QuizObserver for FailingObserver {
        fn on_correct(&mut self) -> Result<()> {
            self.events.borrow_mut().push("correct".into());
            Err(anyhow!("speaker unplugged"))
        }

        fn on_incorrect(&mut self) -> Result<()> {
            self.events.borrow_mut().push("incorrect".into());
            Err(anyhow!("speaker unplugged"))
        }

        fn on_hint_shown(&mut self, hint: &str) -> Result<()> {
            self.events.borrow_mut().push(format!("hint:{hint}"));
            Ok(())
        }
    }

    fn blank(correct: &str) -> Question {
        Question {
            prompt: format!("Name {correct}"),
            hint: format!("Starts with {}", &correct[..1]),
            explanation: String::new(),
            difficulty: Difficulty::Medium,
            kind: QuestionKind::FillBlank {
                correct_answer: correct.into(),
            },
        }
    }

    fn plan(answers: &[&str]) -> QuizPlan {
        QuizPlan {
            questions: answers.iter().map(|a| blank(a)).collect(),
            difficulty: Difficulty::Medium,
            mode: QuizMode::Standard,
        }
    }

    fn session_with(clock: &ManualClock) -> QuizSession {
        QuizSession::new(Box::new(clock.clone()), Box::new(NoopObserver))
    }

    #[test]
    fn observer_failures_do_not_abort_the_session() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let clock = ManualClock::default();
        let mut session = QuizSession::new(
            Box::new(clock.clone()),
            Box::new(FailingObserver {
                events: Rc::clone(&events),
            }),
        );
        session.start(plan(&["Neon", "Argon"]));
        assert_eq!(session.show_hint().as_deref(), Some("Starts with N"));
        assert_eq!(
            session.submit_answer(SubmittedAnswer::Text("neon".into())),
            SubmitOutcome::Recorded { correct: true }
        );
        assert!(session.next_question());
        assert_eq!(
            session.submit_answer(SubmittedAnswer::Text("xenon".into())),
            SubmitOutcome::Recorded { correct: false }
        );
        assert!(session.next_question());
        assert!(session.is_completed());
        assert_eq!(
            *events.borrow(),
            vec!["hint:Starts with N", "correct", "incorrect"]
        );
    }

    #[test]
    fn per_question_elapsed_excludes_pauses() {
        let clock = ManualClock::default();
        let mut session = session_with(&clock);
        session.start(plan(&["Neon", "Argon"]));
        clock.advance_secs(4);
        session.pause();
        clock.advance_secs(20);
        session.resume();
        clock.advance_secs(1);
        session.submit_answer(SubmittedAnswer::Text("Neon".into()));
        assert_eq!(session.answers()[0].elapsed_ms, 5_000);

        session.next_question();
        clock.advance_secs(3);
        session.submit_answer(SubmittedAnswer::Text("Argon".into()));
        assert_eq!(session.answers()[1].elapsed_ms, 3_000);
    }

    #[test]
    fn hints_respect_settings_and_state() {
        let clock = ManualClock::default();
        let mut session = session_with(&clock).with_hints_enabled(false);
        session.start(plan(&["Neon"]));
        assert_eq!(session.show_hint(), None);
        assert_eq!(session.results().hints_used, 0);

        let mut session = session_with(&clock);
        session.start(plan(&["Neon"]));
        session.show_hint();
        session.show_hint();
        session.submit_answer(SubmittedAnswer::Text("Neon".into()));
        assert_eq!(session.show_hint(), None);
        assert_eq!(session.results().hints_used, 2);
    }

    #[test]
    fn hint_cap_follows_question_difficulty() {
        let clock = ManualClock::default();
        let mut session = session_with(&clock);
        let mut hard = blank("Argon");
        hard.difficulty = Difficulty::Hard;
        let mut easy = blank("Neon");
        easy.difficulty = Difficulty::Easy;
        session.start(QuizPlan {
            questions: vec![hard, easy],
            difficulty: Difficulty::Hard,
            mode: QuizMode::Standard,
        });
        assert_eq!(session.show_hint().as_deref(), Some("Starts with A"));
        assert_eq!(session.show_hint(), None);
        assert_eq!(session.results().hints_used, 1);

        session.submit_answer(SubmittedAnswer::Text("Argon".into()));
        session.next_question();
        for _ in 0..3 {
            assert_eq!(session.show_hint().as_deref(), Some("Starts with N"));
        }
        assert_eq!(session.show_hint(), None);
        assert_eq!(session.results().hints_used, 4);
    }

    #[test]
    fn time_remaining_counts_down_per_question() {
        let clock = ManualClock::default();
        let mut session = session_with(&clock);
        assert_eq!(session.question_time_remaining_secs(), None);
        session.start(plan(&["Neon", "Argon"]));
        assert_eq!(session.question_time_remaining_secs(), Some(20));
        clock.advance_secs(5);
        assert_eq!(session.question_time_remaining_secs(), Some(15));
        session.pause();
        clock.advance_secs(60);
        assert_eq!(session.question_time_remaining_secs(), Some(15));
        session.resume();
        clock.advance_secs(30);
        assert_eq!(session.question_time_remaining_secs(), Some(0));

        session.submit_answer(SubmittedAnswer::Text("Neon".into()));
        session.next_question();
        assert_eq!(session.question_time_remaining_secs(), Some(20));
        session.finish();
        assert_eq!(session.question_time_remaining_secs(), None);
    }

    #[test]
    fn finishing_early_counts_only_answered_questions() {
        let clock = ManualClock::default();
        let mut session = session_with(&clock);
        session.start(plan(&["Neon", "Argon", "Helium"]));
        session.submit_answer(SubmittedAnswer::Text("Neon".into()));
        session.finish();
        assert!(session.is_completed());
        assert_eq!(session.current_question(), None);
        let results = session.results();
        assert_eq!((results.correct, results.total, results.score), (1, 1, 100));
    }

    #[test]
    fn point_weighted_scoring_uses_difficulty() {
        let clock = ManualClock::default();
        let mut session = session_with(&clock).with_scoring(ScoringMode::PointWeighted);
        let mut hard = blank("Argon");
        hard.difficulty = Difficulty::Hard;
        let mut easy = blank("Neon");
        easy.difficulty = Difficulty::Easy;
        session.start(QuizPlan {
            questions: vec![hard, easy],
            difficulty: Difficulty::Medium,
            mode: QuizMode::Standard,
        });
        session.submit_answer(SubmittedAnswer::Text("Argon".into()));
        session.next_question();
        session.submit_answer(SubmittedAnswer::Text("Krypton".into()));
        let results = session.results();
        assert_eq!(results.points_earned, 3);
        assert_eq!(results.points_possible, 4);
        assert_eq!(results.score, 75);
    }

    #[test]
    fn daily_quiz_uses_day_pool() {
        let catalog = Catalog::builtin().unwrap();
        let clock = ManualClock::default();
        let mut session = session_with(&clock);
        session.start_daily_quiz(&catalog, 1, Difficulty::Easy, &mut StdRng::seed_from_u64(3));
        assert_eq!(session.plan().mode, QuizMode::Daily { day: 1 });
        assert_eq!(session.plan().len(), 5);
        assert_eq!(session.state(), SessionState::AwaitingAnswer);
    }
}
