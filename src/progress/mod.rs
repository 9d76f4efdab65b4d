//! Learner progress through the seven-day challenge.

pub mod achievements;
pub mod stats;

pub use achievements::{earned_by_quiz, Achievement, UnlockedAchievement};
pub use stats::QuizStats;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::CHALLENGE_DAYS;
use crate::quiz::{QuizMode, QuizResults};

/// Result of marking a day as done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayCompletion {
    NextDayUnlocked(u8),
    ChallengeCompleted,
    /// The day has not been unlocked yet.
    Locked,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    #[serde(default = "default_current_day")]
    pub current_day: u8,
    #[serde(default)]
    pub completed_days: BTreeSet<u8>,
    #[serde(default)]
    pub learned_elements: BTreeSet<u8>,
    /// Latest quiz score per day.
    #[serde(default)]
    pub quiz_scores: BTreeMap<u8, u32>,
    #[serde(default)]
    pub total_score: u32,
    #[serde(default)]
    pub achievements: Vec<UnlockedAchievement>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_active_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed: bool,
}

const fn default_current_day() -> u8 {
    1
}

impl Default for UserProgress {
    fn default() -> Self {
        Self {
            current_day: default_current_day(),
            completed_days: BTreeSet::new(),
            learned_elements: BTreeSet::new(),
            quiz_scores: BTreeMap::new(),
            total_score: 0,
            achievements: Vec::new(),
            start_date: None,
            last_active_date: None,
            completed: false,
        }
    }
}

impl UserProgress {
    /// Fresh challenge started at `now`.
    pub fn started(now: DateTime<Utc>) -> Self {
        Self {
            start_date: Some(now),
            last_active_date: Some(now),
            ..Self::default()
        }
    }

    pub fn can_open_day(&self, day: u8) -> bool {
        (1..=CHALLENGE_DAYS).contains(&day) && day <= self.current_day
    }

    pub fn is_day_completed(&self, day: u8) -> bool {
        self.completed_days.contains(&day)
    }

    pub fn complete_day(&mut self, day: u8, now: DateTime<Utc>) -> DayCompletion {
        if !self.can_open_day(day) {
            return DayCompletion::Locked;
        }
        self.completed_days.insert(day);
        self.touch(now);
        if (1..=CHALLENGE_DAYS).all(|d| self.completed_days.contains(&d)) {
            self.unlock(Achievement::WeekStreak, now);
        }
        if day < CHALLENGE_DAYS {
            // Re-completing an earlier day never moves the learner backwards.
            self.current_day = self.current_day.max(day + 1);
            log::info!("day {day} completed; day {} unlocked", self.current_day);
            DayCompletion::NextDayUnlocked(self.current_day)
        } else {
            self.completed = true;
            log::info!("seven-day challenge completed");
            DayCompletion::ChallengeCompleted
        }
    }

    /// Records a finished quiz and returns the achievements it newly unlocked.
    pub fn record_quiz(
        &mut self,
        mode: QuizMode,
        results: &QuizResults,
        now: DateTime<Utc>,
    ) -> Vec<Achievement> {
        if let QuizMode::Daily { day } | QuizMode::Curated { day } = mode {
            self.quiz_scores.insert(day, results.score);
        }
        self.total_score += results.points_earned;
        self.touch(now);
        earned_by_quiz(mode, results)
            .into_iter()
            .filter(|achievement| self.unlock(*achievement, now))
            .collect()
    }

    /// Marks an element as learned; `catalog_size` decides Element Master.
    pub fn mark_learned(
        &mut self,
        atomic_number: u8,
        catalog_size: usize,
        now: DateTime<Utc>,
    ) -> Vec<Achievement> {
        self.learned_elements.insert(atomic_number);
        self.touch(now);
        let mut unlocked = Vec::new();
        if self.unlock(Achievement::FirstElement, now) {
            unlocked.push(Achievement::FirstElement);
        }
        if catalog_size > 0
            && self.learned_elements.len() >= catalog_size
            && self.unlock(Achievement::ElementMaster, now)
        {
            unlocked.push(Achievement::ElementMaster);
        }
        unlocked
    }

    pub fn has_achievement(&self, achievement: Achievement) -> bool {
        self.achievements
            .iter()
            .any(|unlocked| unlocked.achievement == achievement)
    }

    /// Unlocks `achievement` once and adds its points. Returns whether it was new.
    pub fn unlock(&mut self, achievement: Achievement, now: DateTime<Utc>) -> bool {
        if self.has_achievement(achievement) {
            return false;
        }
        self.achievements.push(UnlockedAchievement {
            achievement,
            unlocked_at: now,
        });
        self.total_score += achievement.points();
        log::info!("achievement unlocked: {}", achievement.name());
        true
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.start_date.get_or_insert(now);
        self.last_active_date = Some(now);
    }
}
