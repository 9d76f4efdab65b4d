//! Wrong-answer options for multiple-choice questions.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::{Element, ElementCategory, PhysicalState};

use super::templates::ChoiceTemplate;

/// Options shown per multiple-choice question, correct answer included.
pub const OPTION_COUNT: usize = 4;

const MAIN_GROUPS: [u8; 8] = [1, 2, 13, 14, 15, 16, 17, 18];
const ATOMIC_NUMBER_OFFSETS: [i16; 10] = [-10, -5, -3, -2, -1, 1, 2, 3, 5, 10];
const MAX_ATOMIC_NUMBER: i16 = 118;
const MAX_PERIOD: u8 = 7;

/// Builds the shuffled option list for `template`.
///
/// Distractors come from the quiz pool first and from `reference` (usually the
/// whole catalog) once the pool runs dry. The list is shorter than
/// [`OPTION_COUNT`] only when both are exhausted.
pub fn build_options<R: Rng + ?Sized>(
    template: ChoiceTemplate,
    element: &Element,
    correct: &str,
    pool: &[Element],
    reference: &[Element],
    rng: &mut R,
) -> Vec<String> {
    let tiers = match template {
        ChoiceTemplate::SymbolToName => {
            element_tiers(element, pool, reference, |el| Some(el.name.clone()))
        }
        ChoiceTemplate::NameToSymbol => {
            element_tiers(element, pool, reference, |el| Some(el.symbol.clone()))
        }
        ChoiceTemplate::Discoverer => element_tiers(element, pool, reference, |el| {
            el.named_discoverer().map(str::to_string)
        }),
        ChoiceTemplate::Uses => element_tiers(element, pool, reference, |el| {
            el.primary_use().map(str::to_string)
        }),
        ChoiceTemplate::AtomicNumber => vec![atomic_number_neighbours(element.atomic_number)],
        ChoiceTemplate::Group => vec![MAIN_GROUPS.iter().map(u8::to_string).collect()],
        ChoiceTemplate::Period => vec![(1..=MAX_PERIOD).map(|p| p.to_string()).collect()],
        ChoiceTemplate::Category => vec![ElementCategory::ALL
            .iter()
            .map(|c| c.display_name().to_string())
            .collect()],
        ChoiceTemplate::State => vec![PhysicalState::ALL
            .iter()
            .map(|s| s.display_name().to_string())
            .collect()],
    };
    let distractors = pick_distractors(correct, tiers, rng);
    assemble(correct, distractors, rng)
}

/// Draws up to `OPTION_COUNT - 1` unique values, exhausting each tier before the next.
pub fn pick_distractors<R: Rng + ?Sized>(
    correct: &str,
    tiers: Vec<Vec<String>>,
    rng: &mut R,
) -> Vec<String> {
    let wanted = OPTION_COUNT - 1;
    let mut picked: Vec<String> = Vec::with_capacity(wanted);
    for mut tier in tiers {
        tier.shuffle(rng);
        for candidate in tier {
            if picked.len() == wanted {
                return picked;
            }
            if candidate != correct && !picked.contains(&candidate) {
                picked.push(candidate);
            }
        }
    }
    picked
}

fn assemble<R: Rng + ?Sized>(correct: &str, distractors: Vec<String>, rng: &mut R) -> Vec<String> {
    let mut options = Vec::with_capacity(distractors.len() + 1);
    options.push(correct.to_string());
    options.extend(distractors);
    options.shuffle(rng);
    options
}

fn element_tiers(
    element: &Element,
    pool: &[Element],
    reference: &[Element],
    value: impl Fn(&Element) -> Option<String>,
) -> Vec<Vec<String>> {
    let others = |source: &[Element]| -> Vec<String> {
        source
            .iter()
            .filter(|el| el.atomic_number != element.atomic_number)
            .filter_map(&value)
            .collect()
    };
    vec![others(pool), others(reference)]
}

fn atomic_number_neighbours(atomic_number: u8) -> Vec<String> {
    let base = i16::from(atomic_number);
    ATOMIC_NUMBER_OFFSETS
        .iter()
        .map(|offset| base + offset)
        .filter(|candidate| (1..=MAX_ATOMIC_NUMBER).contains(candidate))
        .map(|candidate| candidate.to_string())
        .collect()
}
