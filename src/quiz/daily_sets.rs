//! Hand-authored question sets for the first six challenge days.

use anyhow::{Context, Result};
use rand::Rng;
use serde::Deserialize;

use crate::catalog::{Element, ElementLookup};

use super::generator::{QuestionGenerator, QuizMode, QuizPlan};
use super::question::{Difficulty, Question};
use super::templates::{BlankTemplate, ChoiceTemplate, MatchTemplate, SortTheme};

const DAILY_SETS_YAML: &str = include_str!("data/daily_sets.yaml");

/// One authored question: a kind, its sub-template and the element(s) it is about.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DailyQuestionSpec {
    MultipleChoice {
        template: ChoiceTemplate,
        element: u8,
        difficulty: Difficulty,
    },
    FillBlank {
        template: BlankTemplate,
        element: u8,
        difficulty: Difficulty,
    },
    DragSort {
        theme: SortTheme,
        elements: Vec<u8>,
        difficulty: Difficulty,
    },
    Matching {
        template: MatchTemplate,
        elements: Vec<u8>,
        difficulty: Difficulty,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DailySet {
    pub day: u8,
    pub title: String,
    pub description: String,
    pub questions: Vec<DailyQuestionSpec>,
}

/// Parses the embedded daily sets.
pub fn builtin_daily_sets() -> Result<Vec<DailySet>> {
    parse_daily_sets(DAILY_SETS_YAML)
}

pub fn parse_daily_sets(yaml: &str) -> Result<Vec<DailySet>> {
    let mut sets: Vec<DailySet> =
        serde_yaml::from_str(yaml).context("failed to parse daily quiz sets")?;
    sets.sort_by_key(|set| set.day);
    Ok(sets)
}

/// Builds the curated plan for `day` from the embedded sets.
///
/// Entries whose elements are missing from `lookup`, or that cannot fill their
/// template, are skipped. Authored order is kept.
pub fn generate_daily_set<L: ElementLookup + ?Sized, R: Rng + ?Sized>(
    lookup: &L,
    day: u8,
    rng: &mut R,
) -> QuizPlan {
    match builtin_daily_sets() {
        Ok(sets) => build_daily_plan(lookup, &sets, day, rng),
        Err(err) => {
            log::error!("embedded daily sets are unreadable: {err:#}");
            QuizPlan::empty(Difficulty::default(), QuizMode::Curated { day })
        }
    }
}

pub fn build_daily_plan<L: ElementLookup + ?Sized, R: Rng + ?Sized>(
    lookup: &L,
    sets: &[DailySet],
    day: u8,
    rng: &mut R,
) -> QuizPlan {
    let mut plan = QuizPlan::empty(Difficulty::default(), QuizMode::Curated { day });
    let Some(set) = sets.iter().find(|set| set.day == day) else {
        log::debug!("no curated set for day {day}");
        return plan;
    };
    let all = lookup.all_elements();
    for spec in &set.questions {
        match build_question(lookup, &all, spec, rng) {
            Some(question) => plan.questions.push(question),
            None => log::debug!("skipping curated day {day} entry {spec:?}"),
        }
    }
    if let Some(hardest) = plan.questions.iter().map(|q| q.difficulty).max() {
        plan.difficulty = hardest;
    }
    plan
}

fn build_question<L: ElementLookup + ?Sized, R: Rng + ?Sized>(
    lookup: &L,
    all: &[Element],
    spec: &DailyQuestionSpec,
    rng: &mut R,
) -> Option<Question> {
    match spec {
        DailyQuestionSpec::MultipleChoice {
            template,
            element,
            difficulty,
        } => {
            let element = lookup.element(*element)?;
            QuestionGenerator::new(all, *difficulty).multiple_choice(*template, &element, rng)
        }
        DailyQuestionSpec::FillBlank {
            template,
            element,
            difficulty,
        } => {
            let element = lookup.element(*element)?;
            QuestionGenerator::new(all, *difficulty).fill_blank(*template, &element)
        }
        DailyQuestionSpec::DragSort {
            theme,
            elements,
            difficulty,
        } => {
            let resolved = resolve(lookup, elements);
            let selected: Vec<&Element> = resolved.iter().collect();
            QuestionGenerator::new(all, *difficulty).drag_sort(*theme, &selected, rng)
        }
        DailyQuestionSpec::Matching {
            template,
            elements,
            difficulty,
        } => {
            let resolved = resolve(lookup, elements);
            let selected: Vec<&Element> = resolved.iter().collect();
            QuestionGenerator::new(all, *difficulty).matching(*template, &selected, rng)
        }
    }
}

fn resolve<L: ElementLookup + ?Sized>(lookup: &L, ids: &[u8]) -> Vec<Element> {
    ids.iter().filter_map(|id| lookup.element(*id)).collect()
}
