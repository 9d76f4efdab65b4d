//! Randomized question plans built from an element pool.
//!
//! Every entry point takes the random source as a parameter; a seeded
//! `StdRng` reproduces the same plan.

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::{Element, ElementLookup};

use super::distractors::{build_options, OPTION_COUNT};
use super::question::{Difficulty, MatchItem, Question, QuestionKind, QuestionType, SortItem};
use super::templates::{
    render_blank, render_choice, BlankTemplate, ChoiceTemplate, MatchTemplate, SortTheme,
};

pub const STANDARD_MAX_QUESTIONS: usize = 15;
pub const STANDARD_MIN_QUESTIONS: usize = 5;
pub const QUICK_QUIZ_ELEMENTS: usize = 10;
pub const DRAG_SORT_ELEMENTS: usize = 6;
pub const MATCHING_PAIRS: usize = 5;

/// Per-kind counts of the final challenge, 50 questions in total.
pub const FINAL_DISTRIBUTION: [(QuestionType, usize); 4] = [
    (QuestionType::MultipleChoice, 20),
    (QuestionType::DragSort, 10),
    (QuestionType::Matching, 10),
    (QuestionType::FillBlank, 10),
];

const TYPE_WEIGHTS: [(QuestionType, u32); 4] = [
    (QuestionType::MultipleChoice, 40),
    (QuestionType::DragSort, 20),
    (QuestionType::Matching, 20),
    (QuestionType::FillBlank, 20),
];

const MAX_ELEMENT_ATTEMPTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum QuizMode {
    Standard,
    Quick,
    Final,
    Daily { day: u8 },
    Curated { day: u8 },
}

/// Ordered, already shuffled questions for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizPlan {
    pub questions: Vec<Question>,
    pub difficulty: Difficulty,
    pub mode: QuizMode,
}

impl QuizPlan {
    pub fn empty(difficulty: Difficulty, mode: QuizMode) -> Self {
        Self {
            questions: Vec::new(),
            difficulty,
            mode,
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn count_of(&self, question_type: QuestionType) -> usize {
        self.questions
            .iter()
            .filter(|q| q.question_type() == question_type)
            .count()
    }
}

/// Number of questions in a standard plan for a pool of `pool_size` elements.
pub fn standard_question_count(pool_size: usize) -> usize {
    pool_size.clamp(STANDARD_MIN_QUESTIONS, STANDARD_MAX_QUESTIONS)
}

/// Standard plan: weighted random kinds over `elements`.
pub fn generate_quiz<R: Rng + ?Sized>(
    elements: &[Element],
    difficulty: Difficulty,
    rng: &mut R,
) -> QuizPlan {
    QuestionGenerator::new(elements, difficulty).standard(rng)
}

/// Final challenge: fixed 20/10/10/10 distribution, always hard.
pub fn generate_final_quiz<R: Rng + ?Sized>(elements: &[Element], rng: &mut R) -> QuizPlan {
    QuestionGenerator::new(elements, Difficulty::Hard).final_challenge(rng)
}

/// Quick quiz over ten random elements of the whole catalog.
pub fn generate_quick_quiz<L: ElementLookup + ?Sized, R: Rng + ?Sized>(
    lookup: &L,
    difficulty: Difficulty,
    rng: &mut R,
) -> QuizPlan {
    let all = lookup.all_elements();
    let mut picked = all.clone();
    picked.shuffle(rng);
    picked.truncate(QUICK_QUIZ_ELEMENTS);
    let mut plan = QuestionGenerator::new(&picked, difficulty)
        .with_reference(&all)
        .standard(rng);
    plan.mode = QuizMode::Quick;
    plan
}

/// Standard plan over one day's elements, borrowing distractors from the
/// whole catalog.
pub fn generate_daily_quiz<L: ElementLookup + ?Sized, R: Rng + ?Sized>(
    lookup: &L,
    day: u8,
    difficulty: Difficulty,
    rng: &mut R,
) -> QuizPlan {
    let pool = lookup.elements_for_day(day);
    let all = lookup.all_elements();
    let mut plan = QuestionGenerator::new(&pool, difficulty)
        .with_reference(&all)
        .standard(rng);
    plan.mode = QuizMode::Daily { day };
    plan
}

/// Builds questions from a pool, borrowing distractors from `reference` when the
/// pool alone is too small.
#[derive(Debug, Clone, Copy)]
pub struct QuestionGenerator<'a> {
    pool: &'a [Element],
    reference: &'a [Element],
    difficulty: Difficulty,
}

impl<'a> QuestionGenerator<'a> {
    pub fn new(pool: &'a [Element], difficulty: Difficulty) -> Self {
        Self {
            pool,
            reference: pool,
            difficulty,
        }
    }

    pub fn with_reference(mut self, reference: &'a [Element]) -> Self {
        self.reference = reference;
        self
    }

    pub fn standard<R: Rng + ?Sized>(&self, rng: &mut R) -> QuizPlan {
        if self.pool.is_empty() {
            return QuizPlan::empty(self.difficulty, QuizMode::Standard);
        }
        let count = standard_question_count(self.pool.len());
        let mut questions = Vec::with_capacity(count);
        for _ in 0..count {
            let question_type = random_question_type(rng);
            if let Some(question) = self.question_of_type(question_type, rng) {
                questions.push(question);
            }
        }
        questions.shuffle(rng);
        log::debug!(
            "generated standard plan: {} of {} questions from {} elements",
            questions.len(),
            count,
            self.pool.len()
        );
        QuizPlan {
            questions,
            difficulty: self.difficulty,
            mode: QuizMode::Standard,
        }
    }

    pub fn final_challenge<R: Rng + ?Sized>(&self, rng: &mut R) -> QuizPlan {
        let mut questions = Vec::new();
        if !self.pool.is_empty() {
            for (question_type, count) in FINAL_DISTRIBUTION {
                for _ in 0..count {
                    if let Some(question) = self.question_of_type(question_type, rng) {
                        questions.push(question);
                    }
                }
            }
        }
        questions.shuffle(rng);
        QuizPlan {
            questions,
            difficulty: self.difficulty,
            mode: QuizMode::Final,
        }
    }

    /// One question of the requested kind, resampling elements and sub-templates
    /// until a well-formed question comes out.
    pub fn question_of_type<R: Rng + ?Sized>(
        &self,
        question_type: QuestionType,
        rng: &mut R,
    ) -> Option<Question> {
        for attempt in 0..MAX_ELEMENT_ATTEMPTS {
            let element = self.pool.choose(rng)?;
            let question = match question_type {
                QuestionType::MultipleChoice => self.random_multiple_choice(element, rng),
                QuestionType::FillBlank => self.random_fill_blank(element, rng),
                QuestionType::DragSort => {
                    let theme = *SortTheme::ALL.choose(rng)?;
                    let selected = sample(self.pool, DRAG_SORT_ELEMENTS, rng);
                    self.drag_sort(theme, &selected, rng)
                }
                QuestionType::Matching => self.random_matching(rng),
            };
            if question.is_some() {
                return question;
            }
            log::debug!(
                "resampling {question_type:?} question (attempt {}) after {} could not fill a template",
                attempt + 1,
                element.symbol
            );
        }
        log::debug!("dropping {question_type:?} slot; pool cannot produce a valid question");
        None
    }

    fn random_multiple_choice<R: Rng + ?Sized>(
        &self,
        element: &Element,
        rng: &mut R,
    ) -> Option<Question> {
        let mut templates = ChoiceTemplate::RANDOM_POOL;
        templates.shuffle(rng);
        // A short option list is kept only when no template can fill all four.
        let mut fallback: Option<Question> = None;
        for template in templates {
            let Some(question) = self.multiple_choice(template, element, rng) else {
                continue;
            };
            let count = option_count(&question);
            if count == OPTION_COUNT {
                return Some(question);
            }
            if fallback.as_ref().map_or(true, |best| option_count(best) < count) {
                fallback = Some(question);
            }
        }
        fallback
    }

    fn random_fill_blank<R: Rng + ?Sized>(
        &self,
        element: &Element,
        rng: &mut R,
    ) -> Option<Question> {
        let mut templates = BlankTemplate::RANDOM_POOL;
        templates.shuffle(rng);
        templates
            .into_iter()
            .find_map(|template| self.fill_blank(template, element))
    }

    fn random_matching<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Question> {
        let mut templates = MatchTemplate::RANDOM_POOL;
        templates.shuffle(rng);
        for template in templates {
            let eligible: Vec<&Element> = self
                .pool
                .iter()
                .filter(|el| template.pair_text(el).is_some())
                .collect();
            let mut selected: Vec<&Element> = eligible
                .choose_multiple(rng, MATCHING_PAIRS)
                .copied()
                .collect();
            selected.shuffle(rng);
            if let Some(question) = self.matching(template, &selected, rng) {
                return Some(question);
            }
        }
        None
    }

    pub fn multiple_choice<R: Rng + ?Sized>(
        &self,
        template: ChoiceTemplate,
        element: &Element,
        rng: &mut R,
    ) -> Option<Question> {
        let rendered = render_choice(template, element)?;
        let options = build_options(
            template,
            element,
            &rendered.correct_answer,
            self.pool,
            self.reference,
            rng,
        );
        // A lone correct answer is not a question.
        if options.len() < 2 {
            return None;
        }
        Some(Question {
            prompt: rendered.prompt,
            hint: rendered.hint,
            explanation: rendered.explanation,
            difficulty: self.difficulty,
            kind: QuestionKind::MultipleChoice {
                correct_answer: rendered.correct_answer,
                options,
            },
        })
    }

    pub fn fill_blank(&self, template: BlankTemplate, element: &Element) -> Option<Question> {
        let rendered = render_blank(template, element)?;
        Some(Question {
            prompt: rendered.prompt,
            hint: rendered.hint,
            explanation: rendered.explanation,
            difficulty: self.difficulty,
            kind: QuestionKind::FillBlank {
                correct_answer: rendered.correct_answer,
            },
        })
    }

    pub fn drag_sort<R: Rng + ?Sized>(
        &self,
        theme: SortTheme,
        selected: &[&Element],
        rng: &mut R,
    ) -> Option<Question> {
        if selected.is_empty() {
            return None;
        }
        let mut items: Vec<SortItem> = selected
            .iter()
            .map(|el| SortItem {
                symbol: el.symbol.clone(),
                name: el.name.clone(),
            })
            .collect();
        items.shuffle(rng);
        Some(Question {
            prompt: theme.prompt().to_string(),
            hint: theme.hint().to_string(),
            explanation: theme.explanation().to_string(),
            difficulty: self.difficulty,
            kind: QuestionKind::DragSort {
                theme,
                items,
                categories: theme.categories(selected),
            },
        })
    }

    pub fn matching<R: Rng + ?Sized>(
        &self,
        template: MatchTemplate,
        selected: &[&Element],
        rng: &mut R,
    ) -> Option<Question> {
        let mut left_items = Vec::with_capacity(selected.len());
        let mut right_items: Vec<MatchItem> = Vec::with_capacity(selected.len());
        for el in selected {
            let Some((left, right)) = template.pair_text(el) else {
                continue;
            };
            // Two identical right-hand texts would make the pairing ambiguous.
            if right_items.iter().any(|item| item.text == right) {
                continue;
            }
            left_items.push(MatchItem {
                id: el.symbol.clone(),
                text: left,
            });
            right_items.push(MatchItem {
                id: el.symbol.clone(),
                text: right,
            });
        }
        if left_items.len() < 2 {
            return None;
        }
        right_items.shuffle(rng);
        Some(Question {
            prompt: template.prompt().to_string(),
            hint: template.hint().to_string(),
            explanation: template.explanation().to_string(),
            difficulty: self.difficulty,
            kind: QuestionKind::Matching {
                left_items,
                right_items,
            },
        })
    }
}

fn option_count(question: &Question) -> usize {
    question.options().map_or(0, <[String]>::len)
}

fn random_question_type<R: Rng + ?Sized>(rng: &mut R) -> QuestionType {
    match WeightedIndex::new(TYPE_WEIGHTS.iter().map(|(_, weight)| *weight)) {
        Ok(dist) => TYPE_WEIGHTS[dist.sample(rng)].0,
        Err(_) => QuestionType::MultipleChoice,
    }
}

fn sample<'e, R: Rng + ?Sized>(pool: &'e [Element], amount: usize, rng: &mut R) -> Vec<&'e Element> {
    let mut selected: Vec<&Element> = pool.choose_multiple(rng, amount).collect();
    selected.shuffle(rng);
    selected
}
