use std::collections::BTreeMap;

use super::question::{MatchItem, Question, QuestionKind, SortCategory, SubmittedAnswer};

/// Largest length difference still considered for a close match.
const CLOSE_MATCH_MAX_LENGTH_DIFF: usize = 2;
/// Positional mismatches tolerated by a close match.
const CLOSE_MATCH_MAX_MISMATCHES: usize = 1;

/// Decides whether `answer` is correct for `question`.
///
/// Never panics. An answer whose shape does not fit the question kind is an
/// internal fault: it is logged and counts as incorrect.
pub fn evaluate(question: &Question, answer: &SubmittedAnswer) -> bool {
    match &question.kind {
        QuestionKind::MultipleChoice { correct_answer, .. } => match answer {
            SubmittedAnswer::Choice(choice) => choice == correct_answer,
            other => shape_mismatch(question, other),
        },
        QuestionKind::FillBlank { correct_answer } => match answer {
            SubmittedAnswer::Text(text) => fill_blank_matches(correct_answer, text),
            other => shape_mismatch(question, other),
        },
        QuestionKind::DragSort { categories, .. } => match answer {
            SubmittedAnswer::Sorted(placements) => sort_matches(categories, placements),
            other => shape_mismatch(question, other),
        },
        QuestionKind::Matching { left_items, .. } => match answer {
            SubmittedAnswer::Matched(pairs) => pairs_match(left_items, pairs),
            other => shape_mismatch(question, other),
        },
    }
}

/// Case-insensitive comparison with the close-match tolerance.
pub fn fill_blank_matches(correct: &str, submitted: &str) -> bool {
    let correct = correct.trim().to_lowercase();
    let submitted = submitted.trim().to_lowercase();
    correct == submitted || is_close_match(&correct, &submitted)
}

/// Positional comparison: characters are compared index by index up to the
/// longer length, a missing character counts as a mismatch. No alignment is
/// attempted, so an insertion early in the word shifts every later position.
pub fn is_close_match(correct: &str, submitted: &str) -> bool {
    let expected: Vec<char> = correct.chars().collect();
    let actual: Vec<char> = submitted.chars().collect();
    if expected.len().abs_diff(actual.len()) > CLOSE_MATCH_MAX_LENGTH_DIFF {
        return false;
    }
    let longest = expected.len().max(actual.len());
    let mismatches = (0..longest)
        .filter(|&idx| expected.get(idx) != actual.get(idx))
        .count();
    mismatches <= CLOSE_MATCH_MAX_MISMATCHES
}

fn sort_matches(categories: &[SortCategory], placements: &BTreeMap<String, Vec<String>>) -> bool {
    let known_buckets = placements
        .keys()
        .all(|id| categories.iter().any(|category| &category.id == id));
    known_buckets
        && categories.iter().all(|category| {
            let mut placed = placements.get(&category.id).cloned().unwrap_or_default();
            let mut accepted = category.accepted_elements.clone();
            placed.sort();
            accepted.sort();
            placed == accepted
        })
}

fn pairs_match(left_items: &[MatchItem], pairs: &BTreeMap<String, String>) -> bool {
    left_items
        .iter()
        .all(|left| pairs.get(&left.id) == Some(&left.id))
}

fn shape_mismatch(question: &Question, answer: &SubmittedAnswer) -> bool {
    log::error!(
        "answer of type {:?} submitted for {:?} question \"{}\"; counting as incorrect",
        answer.answer_type(),
        question.question_type(),
        question.prompt
    );
    false
}
