//! Generator and validator properties over many seeds.

use proptest::prelude::*;
use times_table_drill::judge::valid_forms;
use times_table_drill::question::{format_pair, MAX_FACTOR, MAX_PRODUCT};
use times_table_drill::{canonical_factor_pairs, judge, Answer, Prompt, Question, QuestionGenerator, Variant};

fn numeric_options(q: &Question) -> Vec<u32> {
    q.options.iter().map(|o| o.parse().unwrap()).collect()
}

fn assert_distinct(options: &[u32]) {
    let mut sorted = options.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), options.len(), "duplicate options in {options:?}");
}

proptest! {
    #[test]
    fn recognition_is_well_formed(seed in any::<u64>()) {
        let mut generator = QuestionGenerator::with_seed(seed);
        let q = generator.generate(Variant::Recognition);

        let Prompt::Recognition { a, b } = q.prompt else {
            panic!("wrong prompt {:?}", q.prompt);
        };
        prop_assert!((1..=MAX_FACTOR).contains(&a));
        prop_assert!((1..=MAX_FACTOR).contains(&b));
        prop_assert_eq!(q.correct_answer.clone(), (a * b).to_string());

        let options = numeric_options(&q);
        prop_assert_eq!(options.len(), 4);
        assert_distinct(&options);
        prop_assert!(options.contains(&(a * b)));
        prop_assert!(options.iter().all(|o| (1..=MAX_PRODUCT).contains(o)));
        prop_assert!(judge(&q, &Answer::Selection(q.correct_answer.clone())).is_correct);
    }

    #[test]
    fn construction_is_well_formed(seed in any::<u64>()) {
        let mut generator = QuestionGenerator::with_seed(seed);
        let q = generator.generate(Variant::Construction);

        let Prompt::Construction { product } = q.prompt else {
            panic!("wrong prompt {:?}", q.prompt);
        };
        prop_assert!(q.options.is_empty());
        prop_assert_eq!(q.aux_target, Some(product));
        prop_assert_eq!(q.slot_count(), 2);

        let pairs = canonical_factor_pairs(product);
        prop_assert!(!pairs.is_empty());
        prop_assert_eq!(valid_forms(&q).len(), pairs.len());
        for (x, y) in pairs {
            prop_assert!(x <= y);
            prop_assert!(judge(&q, &Answer::Pair(x, y)).is_correct);
            prop_assert!(judge(&q, &Answer::Pair(y, x)).is_correct);
            prop_assert!(judge(&q, &Answer::Selection(format_pair(x, y))).is_correct);
            prop_assert!(judge(&q, &Answer::Selection(format_pair(y, x))).is_correct);
        }
        prop_assert!(judge(&q, &Answer::Selection(q.correct_answer.clone())).is_correct);
    }

    #[test]
    fn bounded_quotient_is_well_formed(seed in any::<u64>()) {
        let mut generator = QuestionGenerator::with_seed(seed);
        let q = generator.generate(Variant::BoundedQuotient);

        let Prompt::BoundedQuotient { factor, target } = q.prompt else {
            panic!("wrong prompt {:?}", q.prompt);
        };
        prop_assert!((1..=MAX_FACTOR).contains(&factor));
        prop_assert!(target >= 1 && target <= factor * MAX_FACTOR);

        let answer: u32 = q.correct_answer.parse().unwrap();
        prop_assert!(answer * factor <= target);
        prop_assert!((answer + 1) * factor > target);

        let options = numeric_options(&q);
        prop_assert_eq!(options.len(), 4);
        assert_distinct(&options);
        prop_assert!(options.contains(&answer));
        prop_assert!(options.iter().all(|&o| o <= MAX_FACTOR));
        prop_assert!(judge(&q, &Answer::Single(answer)).is_correct);
    }

    #[test]
    fn pair_judging_is_commutative(a in 1u32..=9, b in 1u32..=9, x in 0u32..=12, y in 0u32..=12) {
        let q = Question::construction(a, b);
        prop_assert_eq!(
            judge(&q, &Answer::Pair(x, y)).is_correct,
            judge(&q, &Answer::Pair(y, x)).is_correct
        );
        prop_assert_eq!(judge(&q, &Answer::Pair(x, y)).is_correct, x * y == a * b && x <= 9 && y <= 9 && x >= 1 && y >= 1);
    }
}

#[test]
fn test_same_seed_same_questions() {
    let mut first = QuestionGenerator::with_seed(99);
    let mut second = QuestionGenerator::with_seed(99);
    for _ in 0..20 {
        assert_eq!(first.generate_any(), second.generate_any());
    }
}

#[test]
fn test_generate_any_covers_every_variant() {
    let mut generator = QuestionGenerator::with_seed(5);
    let seen: Vec<Variant> = (0..200).filter_map(|_| generator.generate_any().variant()).collect();
    for variant in Variant::ALL {
        assert!(seen.contains(&variant), "{variant} never generated");
    }
}

#[test]
fn test_no_variant_is_an_error() {
    let mut generator = QuestionGenerator::with_seed(5);
    assert!(generator.generate_for(None).is_err());
    assert_eq!(
        generator.generate_for(Some(Variant::Construction)).unwrap().variant(),
        Some(Variant::Construction)
    );
}
