use periodic_challenge::catalog::Catalog;
use periodic_challenge::quiz::{ManualClock, NoopObserver, QuestionKind, QuizSession, SubmittedAnswer};
use periodic_challenge::storage::Workspace;
use periodic_challenge::Question;
use std::collections::BTreeMap;
use std::path::Path;
use tempfile::TempDir;

/// Temporary workspace plus the collaborators most tests need.
pub struct IntegrationHarness {
    workspace: TempDir,
    pub clock: ManualClock,
}

impl IntegrationHarness {
    pub fn new() -> Self {
        let workspace = TempDir::new().expect("failed to create temp workspace");
        Self {
            workspace,
            clock: ManualClock::default(),
        }
    }

    pub fn workspace_path(&self) -> &Path {
        self.workspace.path()
    }

    pub fn workspace(&self) -> Workspace {
        Workspace::at(self.workspace.path())
    }

    pub fn catalog(&self) -> Catalog {
        Catalog::builtin().expect("embedded catalog should parse")
    }

    pub fn session(&self) -> QuizSession {
        QuizSession::new(Box::new(self.clock.clone()), Box::new(NoopObserver))
    }
}

/// The answer a learner who knows everything would give.
pub fn correct_answer(question: &Question) -> SubmittedAnswer {
    match &question.kind {
        QuestionKind::MultipleChoice { correct_answer, .. } => {
            SubmittedAnswer::Choice(correct_answer.clone())
        }
        QuestionKind::FillBlank { correct_answer } => SubmittedAnswer::Text(correct_answer.clone()),
        QuestionKind::DragSort { categories, .. } => SubmittedAnswer::Sorted(
            categories
                .iter()
                .map(|c| (c.id.clone(), c.accepted_elements.clone()))
                .collect(),
        ),
        QuestionKind::Matching { left_items, .. } => SubmittedAnswer::Matched(
            left_items
                .iter()
                .map(|item| (item.id.clone(), item.id.clone()))
                .collect(),
        ),
    }
}

/// An answer of the right shape that is always wrong.
pub fn wrong_answer(question: &Question) -> SubmittedAnswer {
    match &question.kind {
        QuestionKind::MultipleChoice {
            correct_answer,
            options,
        } => SubmittedAnswer::Choice(
            options
                .iter()
                .find(|option| *option != correct_answer)
                .cloned()
                .unwrap_or_default(),
        ),
        QuestionKind::FillBlank { .. } => SubmittedAnswer::Text("unobtainium".into()),
        QuestionKind::DragSort { .. } => SubmittedAnswer::Sorted(BTreeMap::new()),
        QuestionKind::Matching { .. } => SubmittedAnswer::Matched(BTreeMap::new()),
    }
}

mod quiz_generation;
mod quiz_session;
mod storage_progress;
