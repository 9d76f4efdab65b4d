use super::{correct_answer, wrong_answer, IntegrationHarness};
use anyhow::Result;
use periodic_challenge::catalog::ElementLookup;
use periodic_challenge::quiz::{
    Difficulty, QuizMode, QuizPlan, SessionState, SubmitOutcome, SubmittedAnswer,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn day_one_scenario_scores_sixty() -> Result<()> {
    let harness = IntegrationHarness::new();
    let pool = harness.catalog().elements_for_day(1);
    let mut session = harness.session();
    session.start_quiz(&pool, Difficulty::Medium, &mut StdRng::seed_from_u64(17));
    assert_eq!(session.plan().len(), 5);

    for idx in 0..5 {
        let question = session.current_question().cloned().expect("question pending");
        let answer = if idx < 3 {
            correct_answer(&question)
        } else {
            wrong_answer(&question)
        };
        harness.clock.advance_secs(4);
        let expected = SubmitOutcome::Recorded { correct: idx < 3 };
        assert_eq!(session.submit_answer(answer), expected);
        assert!(session.next_question());
    }

    assert_eq!(session.state(), SessionState::Completed);
    let results = session.results();
    assert_eq!(results.correct, 3);
    assert_eq!(results.incorrect, 2);
    assert_eq!(results.total, 5);
    assert_eq!(results.score, 60);
    assert_eq!(results.time_spent_seconds, 20);
    assert_eq!(session.answers().len(), 5);
    Ok(())
}

#[test]
fn results_before_any_answer_score_zero() -> Result<()> {
    let harness = IntegrationHarness::new();
    let mut session = harness.session();
    assert_eq!(session.results().score, 0);
    session.start_quiz(&harness.catalog().all_elements(), Difficulty::Easy, &mut StdRng::seed_from_u64(1));
    let results = session.results();
    assert_eq!(results.total, 0);
    assert_eq!(results.score, 0);
    Ok(())
}

#[test]
fn paused_time_is_excluded() -> Result<()> {
    let harness = IntegrationHarness::new();
    let mut session = harness.session();
    session.start_quiz(&harness.catalog().elements_for_day(1), Difficulty::Easy, &mut StdRng::seed_from_u64(8));

    harness.clock.advance_secs(10);
    session.pause();
    assert!(session.is_paused());
    harness.clock.advance_secs(10);
    session.resume();
    harness.clock.advance_secs(10);

    // 30 seconds of wall clock, 10 of them paused.
    assert_eq!(session.elapsed_seconds(), 20);
    while let Some(question) = session.current_question().cloned() {
        session.submit_answer(correct_answer(&question));
        session.next_question();
    }
    assert_eq!(session.results().time_spent_seconds, 20);
    assert_eq!(session.results().score, 100);
    Ok(())
}

#[test]
fn second_submission_is_ignored() -> Result<()> {
    let harness = IntegrationHarness::new();
    let mut session = harness.session();
    session.start_quiz(&harness.catalog().elements_for_day(1), Difficulty::Easy, &mut StdRng::seed_from_u64(3));
    let question = session.current_question().cloned().expect("question pending");

    assert_eq!(
        session.submit_answer(wrong_answer(&question)),
        SubmitOutcome::Recorded { correct: false }
    );
    assert_eq!(
        session.submit_answer(correct_answer(&question)),
        SubmitOutcome::AlreadyAnswered
    );
    assert_eq!(session.answers().len(), 1);
    assert_eq!(session.results().correct, 0);
    Ok(())
}

#[test]
fn empty_plan_completes_immediately() -> Result<()> {
    let harness = IntegrationHarness::new();
    let mut session = harness.session();
    session.start_quiz(&[], Difficulty::Medium, &mut StdRng::seed_from_u64(0));
    assert!(session.is_completed());
    assert_eq!(session.current_question(), None);
    assert_eq!(
        session.submit_answer(SubmittedAnswer::Text("H".into())),
        SubmitOutcome::NotAcceptingAnswers
    );
    assert!(!session.next_question());

    session.start(QuizPlan::empty(Difficulty::Easy, QuizMode::Daily { day: 5 }));
    assert!(session.is_completed());
    Ok(())
}

#[test]
fn next_requires_an_answer() -> Result<()> {
    let harness = IntegrationHarness::new();
    let mut session = harness.session();
    session.start_final_challenge(&harness.catalog().all_elements(), &mut StdRng::seed_from_u64(12));
    assert_eq!(session.plan().len(), 50);
    assert!(!session.next_question());
    assert_eq!(session.current_index(), 0);
    assert!(session.show_hint().is_some());
    assert_eq!(session.results().hints_used, 1);
    Ok(())
}

#[test]
fn starting_again_discards_previous_state() -> Result<()> {
    let harness = IntegrationHarness::new();
    let catalog = harness.catalog();
    let mut session = harness.session();
    session.start_quick_quiz(&catalog, Difficulty::Hard, &mut StdRng::seed_from_u64(4));
    let question = session.current_question().cloned().expect("question pending");
    session.submit_answer(correct_answer(&question));
    session.show_hint();
    harness.clock.advance_secs(30);

    session.start_daily_set(&catalog, 2, &mut StdRng::seed_from_u64(4));
    assert_eq!(session.plan().mode, QuizMode::Curated { day: 2 });
    assert_eq!(session.plan().len(), 5);
    assert!(session.answers().is_empty());
    let results = session.results();
    assert_eq!((results.total, results.hints_used, results.time_spent_seconds), (0, 0, 0));
    Ok(())
}
