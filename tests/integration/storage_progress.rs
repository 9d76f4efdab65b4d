use super::{correct_answer, IntegrationHarness};
use anyhow::Result;
use chrono::Utc;
use periodic_challenge::catalog::ElementLookup;
use periodic_challenge::progress::{Achievement, DayCompletion, QuizStats};
use periodic_challenge::quiz::{Difficulty, NoopObserver, QuizMode, QuizResults, QuizSession};
use periodic_challenge::storage::{
    export_snapshot, import_snapshot, AppConfig, MemoryHistory, Persistence, Snapshot, Workspace,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;

#[test]
fn finished_daily_quiz_flows_into_history_and_progress() -> Result<()> {
    let harness = IntegrationHarness::new();
    let workspace = harness.workspace();
    let config = workspace.load_config()?;
    let catalog = harness.catalog();

    let mut session = QuizSession::from_settings(
        &config.quiz,
        Box::new(harness.clock.clone()),
        Box::new(NoopObserver),
    );
    session.start_daily_quiz(&catalog, 1, config.quiz.difficulty, &mut StdRng::seed_from_u64(21));
    while let Some(question) = session.current_question().cloned() {
        harness.clock.advance_secs(5);
        session.submit_answer(correct_answer(&question));
        session.next_question();
    }
    let results = session.results();
    assert_eq!(results.score, 100);

    let mut history = workspace.history_store(&config);
    history.save_quiz_result(session.plan().mode, &results)?;

    let progress_store = workspace.progress_store();
    let mut progress = progress_store.load()?;
    let unlocked = progress.record_quiz(session.plan().mode, &results, Utc::now());
    assert_eq!(
        unlocked,
        vec![
            Achievement::PerfectDay,
            Achievement::SpeedLearner,
            Achievement::NoHints
        ]
    );
    assert_eq!(progress.complete_day(1, Utc::now()), DayCompletion::NextDayUnlocked(2));
    progress_store.save(&progress)?;

    let reloaded = progress_store.load()?;
    assert_eq!(reloaded.quiz_scores.get(&1), Some(&100));
    assert!(reloaded.can_open_day(2));
    assert!(!reloaded.can_open_day(3));

    let records = history.quiz_history()?;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].mode, QuizMode::Daily { day: 1 });
    let stats = QuizStats::from_history(&records);
    assert_eq!(stats.best_score, 100);
    assert_eq!(stats.accuracy, 100);
    Ok(())
}

#[test]
fn history_is_capped_by_config() -> Result<()> {
    let harness = IntegrationHarness::new();
    let workspace = harness.workspace();
    let mut config = AppConfig::default();
    config.history.max_records = 5;
    config.save(&workspace.config_path())?;

    let config = workspace.load_config()?;
    let mut history = workspace.history_store(&config);
    for score in 0..12 {
        let results = QuizResults {
            correct: 1,
            total: 1,
            score,
            ..QuizResults::default()
        };
        history.save_quiz_result(QuizMode::Quick, &results)?;
    }
    let scores: Vec<u32> = history
        .quiz_history()?
        .iter()
        .map(|record| record.results.score)
        .collect();
    assert_eq!(scores, vec![7, 8, 9, 10, 11]);
    Ok(())
}

#[test]
fn snapshot_round_trips_between_workspaces() -> Result<()> {
    let source = IntegrationHarness::new();
    let source_ws = source.workspace();
    let mut config = AppConfig::default();
    config.quiz.difficulty = Difficulty::Hard;
    config.quiz.hints_enabled = false;
    config.save(&source_ws.config_path())?;

    let mut progress = source_ws.progress_store().load()?;
    progress.mark_learned(1, source.catalog().all_elements().len(), Utc::now());
    source_ws.progress_store().save(&progress)?;
    let mut history = source_ws.history_store(&config);
    history.save_quiz_result(QuizMode::Final, &QuizResults::default())?;

    let exported = export_snapshot(&source_ws)?;
    let json = exported.to_json()?;

    let target = IntegrationHarness::new();
    let target_ws = Workspace::at(target.workspace_path());
    import_snapshot(&target_ws, &Snapshot::from_json(&json)?)?;

    assert_eq!(target_ws.load_config()?, config);
    assert_eq!(target_ws.progress_store().load()?, progress);
    let imported = target_ws.history_store(&config).quiz_history()?;
    assert_eq!(imported, history.quiz_history()?);
    Ok(())
}

#[test]
fn import_rejects_unversioned_snapshot() -> Result<()> {
    let harness = IntegrationHarness::new();
    let workspace = harness.workspace();
    let path = harness.workspace_path().join("backup.json");
    fs::write(&path, r#"{"progress": {"currentDay": 4}, "quizHistory": []}"#)?;

    let data = fs::read_to_string(&path)?;
    assert!(Snapshot::from_json(&data).is_err());

    let unversioned: Snapshot = serde_json::from_str(&data)?;
    assert!(import_snapshot(&workspace, &unversioned).is_err());
    assert!(!workspace.progress_path().exists());
    Ok(())
}

#[test]
fn memory_history_stands_in_for_disk() -> Result<()> {
    let mut history: Box<dyn Persistence> = Box::new(MemoryHistory::default());
    let saved = history.save_quiz_result(QuizMode::Standard, &QuizResults::default())?;
    assert_eq!(history.quiz_history()?, vec![saved]);
    Ok(())
}
