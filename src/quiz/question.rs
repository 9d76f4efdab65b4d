use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::templates::SortTheme;

/// Difficulty tier of a question or plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Points awarded for a correct answer in point-weighted scoring.
    pub fn point_value(self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    pub fn time_limit_secs(self) -> u32 {
        match self {
            Difficulty::Easy => 30,
            Difficulty::Medium => 20,
            Difficulty::Hard => 15,
        }
    }

    pub fn hints_allowed(self) -> u32 {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Medium => 2,
            Difficulty::Hard => 1,
        }
    }
}

/// Payload-free discriminant of [`QuestionKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    MultipleChoice,
    DragSort,
    Matching,
    FillBlank,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortItem {
    pub symbol: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortCategory {
    pub id: String,
    pub name: String,
    /// Symbols that belong in this bucket; may be empty.
    pub accepted_elements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchItem {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum QuestionKind {
    #[serde(rename_all = "camelCase")]
    MultipleChoice {
        correct_answer: String,
        options: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    FillBlank { correct_answer: String },
    #[serde(rename_all = "camelCase")]
    DragSort {
        theme: SortTheme,
        items: Vec<SortItem>,
        categories: Vec<SortCategory>,
    },
    /// Correct pairing is identity: a left item matches the right item with the same id.
    #[serde(rename_all = "camelCase")]
    Matching {
        left_items: Vec<MatchItem>,
        right_items: Vec<MatchItem>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub prompt: String,
    pub hint: String,
    pub explanation: String,
    pub difficulty: Difficulty,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl Question {
    pub fn question_type(&self) -> QuestionType {
        match self.kind {
            QuestionKind::MultipleChoice { .. } => QuestionType::MultipleChoice,
            QuestionKind::FillBlank { .. } => QuestionType::FillBlank,
            QuestionKind::DragSort { .. } => QuestionType::DragSort,
            QuestionKind::Matching { .. } => QuestionType::Matching,
        }
    }

    pub fn options(&self) -> Option<&[String]> {
        match &self.kind {
            QuestionKind::MultipleChoice { options, .. } => Some(options),
            _ => None,
        }
    }
}

/// Answer as captured from the caller, one shape per question kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum SubmittedAnswer {
    Choice(String),
    Text(String),
    /// Category id to the symbols placed in it.
    Sorted(BTreeMap<String, Vec<String>>),
    /// Left item id to the right item id it was paired with.
    Matched(BTreeMap<String, String>),
}

impl SubmittedAnswer {
    pub fn answer_type(&self) -> QuestionType {
        match self {
            SubmittedAnswer::Choice(_) => QuestionType::MultipleChoice,
            SubmittedAnswer::Text(_) => QuestionType::FillBlank,
            SubmittedAnswer::Sorted(_) => QuestionType::DragSort,
            SubmittedAnswer::Matched(_) => QuestionType::Matching,
        }
    }
}
