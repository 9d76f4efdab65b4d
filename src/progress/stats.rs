use serde::{Deserialize, Serialize};

use crate::quiz::percentage;
use crate::storage::HistoryRecord;

/// Aggregates over the stored quiz history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizStats {
    pub total_quizzes: u32,
    pub average_score: u32,
    pub best_score: u32,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub accuracy: u32,
}

impl QuizStats {
    pub fn from_history(history: &[HistoryRecord]) -> Self {
        if history.is_empty() {
            return Self::default();
        }
        let total_quizzes = history.len() as u32;
        let score_sum: u32 = history.iter().map(|r| r.results.score).sum();
        let best_score = history.iter().map(|r| r.results.score).max().unwrap_or(0);
        let total_questions: u32 = history.iter().map(|r| r.results.total).sum();
        let correct_answers: u32 = history.iter().map(|r| r.results.correct).sum();
        Self {
            total_quizzes,
            average_score: (f64::from(score_sum) / f64::from(total_quizzes)).round() as u32,
            best_score,
            total_questions,
            correct_answers,
            accuracy: percentage(correct_answers, total_questions),
        }
    }
}
