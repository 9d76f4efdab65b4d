use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::quiz::{QuizMode, QuizResults};

/// Quizzes finished faster than this earn Speed Learner.
pub const SPEED_LEARNER_LIMIT_SECS: u64 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Achievement {
    FirstElement,
    PerfectDay,
    SpeedLearner,
    NoHints,
    WeekStreak,
    ElementMaster,
}

impl Achievement {
    pub const ALL: [Achievement; 6] = [
        Achievement::FirstElement,
        Achievement::PerfectDay,
        Achievement::SpeedLearner,
        Achievement::NoHints,
        Achievement::WeekStreak,
        Achievement::ElementMaster,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Achievement::FirstElement => "first-element",
            Achievement::PerfectDay => "perfect-day",
            Achievement::SpeedLearner => "speed-learner",
            Achievement::NoHints => "no-hints",
            Achievement::WeekStreak => "week-streak",
            Achievement::ElementMaster => "element-master",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Achievement::FirstElement => "First Discovery",
            Achievement::PerfectDay => "Perfect Day",
            Achievement::SpeedLearner => "Speed Learner",
            Achievement::NoHints => "Independent Learner",
            Achievement::WeekStreak => "Week Warrior",
            Achievement::ElementMaster => "Element Master",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Achievement::FirstElement => "Learn about your first element",
            Achievement::PerfectDay => "Score 100% on a daily quiz",
            Achievement::SpeedLearner => "Complete a quiz in under 2 minutes",
            Achievement::NoHints => "Complete a quiz without using hints",
            Achievement::WeekStreak => "Complete all 7 days of the challenge",
            Achievement::ElementMaster => "Learn about every element in the catalog",
        }
    }

    pub fn points(self) -> u32 {
        match self {
            Achievement::FirstElement => 10,
            Achievement::PerfectDay => 50,
            Achievement::SpeedLearner => 25,
            Achievement::NoHints => 30,
            Achievement::WeekStreak => 100,
            Achievement::ElementMaster => 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockedAchievement {
    pub achievement: Achievement,
    pub unlocked_at: DateTime<Utc>,
}

/// Achievements a finished quiz qualifies for. Empty quizzes earn nothing.
pub fn earned_by_quiz(mode: QuizMode, results: &QuizResults) -> Vec<Achievement> {
    let mut earned = Vec::new();
    if results.total == 0 {
        return earned;
    }
    let daily = matches!(mode, QuizMode::Daily { .. } | QuizMode::Curated { .. });
    if daily && results.is_perfect() {
        earned.push(Achievement::PerfectDay);
    }
    if results.time_spent_seconds < SPEED_LEARNER_LIMIT_SECS {
        earned.push(Achievement::SpeedLearner);
    }
    if results.hints_used == 0 {
        earned.push(Achievement::NoHints);
    }
    earned
}
