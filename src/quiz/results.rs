use serde::{Deserialize, Serialize};

use super::question::{Question, SubmittedAnswer};

/// How the headline score is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringMode {
    /// Plain percentage of correct answers.
    #[default]
    Percentage,
    /// Percentage of difficulty-weighted points (easy 1, medium 2, hard 3).
    PointWeighted,
}

/// One submitted answer in a session's log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question: Question,
    pub submitted: SubmittedAnswer,
    pub correct: bool,
    /// Active (unpaused) time between question start and submission.
    pub elapsed_ms: u64,
}

/// Aggregate outcome of a session, derived from its answer log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResults {
    pub correct: u32,
    pub incorrect: u32,
    pub total: u32,
    pub score: u32,
    pub time_spent_seconds: u64,
    pub hints_used: u32,
    pub points_earned: u32,
    pub points_possible: u32,
}

impl QuizResults {
    pub fn from_answers(
        answers: &[AnswerRecord],
        active_ms: u64,
        hints_used: u32,
        scoring: ScoringMode,
    ) -> Self {
        let total = answers.len() as u32;
        let correct = answers.iter().filter(|a| a.correct).count() as u32;
        let points_possible: u32 = answers
            .iter()
            .map(|a| a.question.difficulty.point_value())
            .sum();
        let points_earned: u32 = answers
            .iter()
            .filter(|a| a.correct)
            .map(|a| a.question.difficulty.point_value())
            .sum();
        let score = match scoring {
            ScoringMode::Percentage => percentage(correct, total),
            ScoringMode::PointWeighted => percentage(points_earned, points_possible),
        };
        Self {
            correct,
            incorrect: total - correct,
            total,
            score,
            time_spent_seconds: active_ms / 1000,
            hints_used,
            points_earned,
            points_possible,
        }
    }

    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.correct == self.total
    }
}

/// Rounded percentage; zero when there is nothing to divide by.
pub fn percentage(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    (f64::from(part) / f64::from(whole) * 100.0).round() as u32
}
