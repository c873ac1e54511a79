//! Answer judging.
//!
//! Recognition and BoundedQuotient compare against the canonical answer.
//! Construction accepts any in-range factor pair of the target, in either
//! order, and reports pairs smaller-factor-first.

use serde::{Deserialize, Serialize};

use super::answer::Answer;
use crate::question::{format_pair, Prompt, Question, MAX_FACTOR, MIN_FACTOR};

/// Outcome of judging one submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub is_correct: bool,

    /// Canonical form of the submission when it was accepted.
    pub accepted_form: Option<String>,

    /// Every answer that would have been accepted, for feedback.
    pub valid_forms: Vec<String>,
}

impl Verdict {
    /// A round that ran out of time. Never correct.
    #[must_use]
    pub fn timed_out(question: &Question) -> Self {
        Self {
            is_correct: false,
            accepted_form: None,
            valid_forms: valid_forms(question),
        }
    }
}

/// All canonical pairs `(i, j)` with `i <= j`, `i * j == target` and both
/// factors in `[1, 9]`, ordered by `i`.
///
/// ```
/// use times_table_drill::judge::canonical_factor_pairs;
///
/// assert_eq!(canonical_factor_pairs(12), vec![(2, 6), (3, 4)]);
/// ```
#[must_use]
pub fn canonical_factor_pairs(target: u32) -> Vec<(u32, u32)> {
    (MIN_FACTOR..=MAX_FACTOR)
        .filter(|&i| target % i == 0)
        .map(|i| (i, target / i))
        .filter(|&(i, j)| i <= j && j <= MAX_FACTOR)
        .collect()
}

/// Is `(x, y)` a valid in-table factorisation of `target`?
#[must_use]
pub fn is_factor_pair(target: u32, x: u32, y: u32) -> bool {
    let in_table = |n: u32| (MIN_FACTOR..=MAX_FACTOR).contains(&n);
    in_table(x) && in_table(y) && x * y == target
}

/// Every answer `question` accepts, in display form.
#[must_use]
pub fn valid_forms(question: &Question) -> Vec<String> {
    match (&question.prompt, question.aux_target) {
        (Prompt::Construction { .. }, Some(target)) => canonical_factor_pairs(target)
            .into_iter()
            .map(|(i, j)| format_pair(i, j))
            .collect(),
        (Prompt::ChooseDifficulty, _) => Vec::new(),
        _ => vec![question.correct_answer.clone()],
    }
}

/// Judge a submission against a question.
#[must_use]
pub fn judge(question: &Question, answer: &Answer) -> Verdict {
    let accepted_form = match &question.prompt {
        Prompt::Recognition { .. } | Prompt::BoundedQuotient { .. } => {
            let text = match answer {
                Answer::Selection(text) => Some(text.clone()),
                Answer::Single(v) => Some(v.to_string()),
                Answer::Pair(..) => None,
            };
            text.filter(|t| *t == question.correct_answer)
        }
        Prompt::Construction { .. } => {
            let target = question.aux_target;
            answer
                .as_pair()
                .zip(target)
                .filter(|&((x, y), target)| is_factor_pair(target, x, y))
                .map(|((x, y), _)| format_pair(x.min(y), x.max(y)))
        }
        Prompt::ChooseDifficulty => None,
    };

    Verdict {
        is_correct: accepted_form.is_some(),
        accepted_form,
        valid_forms: valid_forms(question),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_pairs() {
        assert_eq!(canonical_factor_pairs(12), vec![(2, 6), (3, 4)]);
        assert_eq!(canonical_factor_pairs(36), vec![(4, 9), (6, 6)]);
        assert_eq!(canonical_factor_pairs(1), vec![(1, 1)]);
        assert_eq!(canonical_factor_pairs(81), vec![(9, 9)]);
        assert!(canonical_factor_pairs(11).is_empty());
    }

    #[test]
    fn test_canonical_pairs_idempotent() {
        for target in 1..=81 {
            assert_eq!(canonical_factor_pairs(target), canonical_factor_pairs(target));
        }
    }

    #[test]
    fn test_recognition_scenario() {
        let q = Question::recognition(3, 4, [12, 11, 15, 9]);

        let right = judge(&q, &Answer::Selection("12".into()));
        assert!(right.is_correct);
        assert_eq!(right.accepted_form.as_deref(), Some("12"));

        let wrong = judge(&q, &Answer::Selection("11".into()));
        assert!(!wrong.is_correct);
        assert_eq!(wrong.valid_forms, vec!["12".to_string()]);

        // Option text must match exactly.
        assert!(!judge(&q, &Answer::Selection(" 12 ".into())).is_correct);
        assert!(!judge(&q, &Answer::Selection("012".into())).is_correct);
    }

    #[test]
    fn test_construction_scenario() {
        let q = Question::construction(3, 4);

        let swapped = judge(&q, &Answer::Pair(4, 3));
        assert!(swapped.is_correct);
        assert_eq!(swapped.accepted_form.as_deref(), Some("3 × 4"));

        let other_pair = judge(&q, &Answer::Selection("6 × 2".into()));
        assert!(other_pair.is_correct);
        assert_eq!(other_pair.accepted_form.as_deref(), Some("2 × 6"));

        let wrong = judge(&q, &Answer::Pair(2, 5));
        assert!(!wrong.is_correct);
        assert_eq!(wrong.valid_forms, vec!["2 × 6".to_string(), "3 × 4".to_string()]);

        // 1 × 12 multiplies out but 12 is off the table
        assert!(!judge(&q, &Answer::Pair(1, 12)).is_correct);
        assert!(!judge(&q, &Answer::Selection("garbage".into())).is_correct);
    }

    #[test]
    fn test_bounded_quotient_scenario() {
        let q = Question::bounded_quotient(4, 10, [2, 3, 5, 0]);

        assert!(!judge(&q, &Answer::Single(3)).is_correct);
        assert!(judge(&q, &Answer::Single(2)).is_correct);
        assert!(judge(&q, &Answer::Selection("2".into())).is_correct);
        assert!(!judge(&q, &Answer::Pair(1, 2)).is_correct);
    }

    #[test]
    fn test_timed_out_never_correct() {
        let q = Question::construction(2, 3);
        let verdict = Verdict::timed_out(&q);

        assert!(!verdict.is_correct);
        assert_eq!(verdict.valid_forms, vec!["1 × 6".to_string(), "2 × 3".to_string()]);
    }

    #[test]
    fn test_placeholder_accepts_nothing() {
        let q = Question::choose_difficulty();
        assert!(!judge(&q, &Answer::Selection(String::new())).is_correct);
    }
}
