use super::IntegrationHarness;
use anyhow::Result;
use periodic_challenge::catalog::ElementLookup;
use periodic_challenge::quiz::{
    generate_final_quiz, generate_quick_quiz, generate_quiz, Difficulty, QuestionKind,
    QuestionType, QuizMode, QuizPlan,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn assert_multiple_choice_invariants(plan: &QuizPlan) {
    for question in &plan.questions {
        if let QuestionKind::MultipleChoice {
            correct_answer,
            options,
        } = &question.kind
        {
            assert_eq!(options.len(), 4, "{}", question.prompt);
            let unique: HashSet<&String> = options.iter().collect();
            assert_eq!(unique.len(), 4, "{}", question.prompt);
            assert_eq!(
                options.iter().filter(|o| *o == correct_answer).count(),
                1,
                "{}",
                question.prompt
            );
        }
    }
}

#[test]
fn multiple_choice_options_hold_across_seeds() -> Result<()> {
    let harness = IntegrationHarness::new();
    let catalog = harness.catalog();
    for seed in 0..25 {
        let mut rng = StdRng::seed_from_u64(seed);
        assert_multiple_choice_invariants(&generate_quick_quiz(&catalog, Difficulty::Easy, &mut rng));
        assert_multiple_choice_invariants(&generate_quiz(
            &catalog.elements_for_day(1),
            Difficulty::Medium,
            &mut rng,
        ));
        assert_multiple_choice_invariants(&generate_quiz(
            &catalog.elements_for_day(3),
            Difficulty::Hard,
            &mut rng,
        ));
    }
    Ok(())
}

#[test]
fn tiny_pools_still_get_four_options() -> Result<()> {
    let harness = IntegrationHarness::new();
    let all = harness.catalog().all_elements();
    let mut checked = 0;
    for size in [2, 3] {
        let pool = &all[..size];
        for seed in 0..50 {
            let plan = generate_quiz(pool, Difficulty::Easy, &mut StdRng::seed_from_u64(seed));
            assert_multiple_choice_invariants(&plan);
            checked += plan
                .questions
                .iter()
                .filter(|q| q.question_type() == QuestionType::MultipleChoice)
                .count();
        }
    }
    assert!(checked > 0);
    Ok(())
}

#[test]
fn final_challenge_has_fixed_distribution() -> Result<()> {
    let harness = IntegrationHarness::new();
    let all = harness.catalog().all_elements();
    let plan = generate_final_quiz(&all, &mut StdRng::seed_from_u64(7));
    assert_eq!(plan.mode, QuizMode::Final);
    assert_eq!(plan.difficulty, Difficulty::Hard);
    assert_eq!(plan.len(), 50);
    assert_eq!(plan.count_of(QuestionType::MultipleChoice), 20);
    assert_eq!(plan.count_of(QuestionType::DragSort), 10);
    assert_eq!(plan.count_of(QuestionType::Matching), 10);
    assert_eq!(plan.count_of(QuestionType::FillBlank), 10);
    assert!(plan.questions.iter().all(|q| q.difficulty == Difficulty::Hard));
    assert_multiple_choice_invariants(&plan);
    Ok(())
}

#[test]
fn same_seed_same_plan() -> Result<()> {
    let harness = IntegrationHarness::new();
    let catalog = harness.catalog();
    let pool = catalog.elements_for_day(2);
    let first = generate_quiz(&pool, Difficulty::Medium, &mut StdRng::seed_from_u64(2024));
    let second = generate_quiz(&pool, Difficulty::Medium, &mut StdRng::seed_from_u64(2024));
    assert_eq!(first, second);
    assert_eq!(first.len(), 6);

    let quick_a = generate_quick_quiz(&catalog, Difficulty::Easy, &mut StdRng::seed_from_u64(5));
    let quick_b = generate_quick_quiz(&catalog, Difficulty::Easy, &mut StdRng::seed_from_u64(5));
    assert_eq!(quick_a, quick_b);
    assert_eq!(quick_a.mode, QuizMode::Quick);
    assert_eq!(quick_a.len(), 10);
    Ok(())
}

#[test]
fn drag_sort_buckets_cover_every_item() -> Result<()> {
    let harness = IntegrationHarness::new();
    let all = harness.catalog().all_elements();
    let plan = generate_final_quiz(&all, &mut StdRng::seed_from_u64(99));
    for question in &plan.questions {
        if let QuestionKind::DragSort {
            items, categories, ..
        } = &question.kind
        {
            let mut placed: Vec<&String> = categories
                .iter()
                .flat_map(|c| c.accepted_elements.iter())
                .collect();
            placed.sort();
            let mut symbols: Vec<&String> = items.iter().map(|i| &i.symbol).collect();
            symbols.sort();
            assert_eq!(placed, symbols);
        }
    }
    Ok(())
}

#[test]
fn plans_serialize_with_kind_tags() -> Result<()> {
    let harness = IntegrationHarness::new();
    let pool = harness.catalog().elements_for_day(1);
    let plan = generate_quiz(&pool, Difficulty::Easy, &mut StdRng::seed_from_u64(1));
    let value = serde_json::to_value(&plan)?;
    assert_eq!(value["mode"]["mode"], "standard");
    let types: HashSet<String> = value["questions"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|q| q["type"].as_str().map(str::to_string))
        .collect();
    assert!(types
        .iter()
        .all(|t| ["multiple-choice", "drag-sort", "matching", "fill-blank"].contains(&t.as_str())));
    let back: QuizPlan = serde_json::from_value(value)?;
    assert_eq!(back, plan);
    Ok(())
}
