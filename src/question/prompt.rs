//! Question and prompt types.
//!
//! A `Question` is immutable once built. Its `Prompt` carries the numbers
//! the problem was built from, so the variant is never inferred from how
//! the UI lays the question out.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::variant::Variant;

/// Separator used in factor-pair answers, e.g. `"3 × 4"`.
pub const TIMES: &str = " × ";

/// Number of options offered by selection-style questions.
pub const OPTION_COUNT: usize = 4;

/// The problem statement, with the operands it was built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Prompt {
    Recognition { a: u32, b: u32 },
    Construction { product: u32 },
    BoundedQuotient { factor: u32, target: u32 },
    /// Neutral prompt shown when no difficulty has been selected.
    ChooseDifficulty,
}

impl Prompt {
    #[must_use]
    pub fn variant(&self) -> Option<Variant> {
        match self {
            Prompt::Recognition { .. } => Some(Variant::Recognition),
            Prompt::Construction { .. } => Some(Variant::Construction),
            Prompt::BoundedQuotient { .. } => Some(Variant::BoundedQuotient),
            Prompt::ChooseDifficulty => None,
        }
    }

    /// Number of keypad slots the answer is built from.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        match self {
            Prompt::Construction { .. } => 2,
            Prompt::BoundedQuotient { .. } => 1,
            Prompt::Recognition { .. } | Prompt::ChooseDifficulty => 0,
        }
    }
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Prompt::Recognition { a, b } => write!(f, "{a}{TIMES}{b} = ( )"),
            Prompt::Construction { product } => write!(f, "( ){TIMES}( ) = {product}"),
            Prompt::BoundedQuotient { factor, target } => {
                write!(f, "( ){TIMES}{factor} ≤ {target}, what is the largest value?")
            }
            Prompt::ChooseDifficulty => f.write_str("Choose a difficulty to start"),
        }
    }
}

/// A generated problem with its canonical answer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Question {
    pub prompt: Prompt,

    /// Selectable answers, empty for input-only questions.
    pub options: SmallVec<[String; OPTION_COUNT]>,

    /// Canonical form of the correct response.
    pub correct_answer: String,

    /// Product target for Construction; the judge re-derives every valid
    /// factor pair from it.
    pub aux_target: Option<u32>,
}

impl Question {
    /// `a × b = ( )` with the given options.
    ///
    /// `options` must contain `a * b` exactly once.
    #[must_use]
    pub fn recognition(a: u32, b: u32, options: impl IntoIterator<Item = u32>) -> Self {
        let correct = a * b;
        let options: SmallVec<[String; OPTION_COUNT]> =
            options.into_iter().map(|o| o.to_string()).collect();
        debug_assert_eq!(
            options.iter().filter(|o| **o == correct.to_string()).count(),
            1,
            "options must contain the product exactly once"
        );

        Self {
            prompt: Prompt::Recognition { a, b },
            options,
            correct_answer: correct.to_string(),
            aux_target: None,
        }
    }

    /// `( ) × ( ) = a*b`. The canonical answer lists the smaller factor first.
    #[must_use]
    pub fn construction(a: u32, b: u32) -> Self {
        let product = a * b;
        Self {
            prompt: Prompt::Construction { product },
            options: SmallVec::new(),
            correct_answer: format_pair(a.min(b), a.max(b)),
            aux_target: Some(product),
        }
    }

    /// `( ) × factor ≤ target`. The answer is `target / factor` rounded down.
    #[must_use]
    pub fn bounded_quotient(factor: u32, target: u32, options: impl IntoIterator<Item = u32>) -> Self {
        debug_assert!(factor > 0, "factor must be positive");
        let correct = target / factor;
        Self {
            prompt: Prompt::BoundedQuotient { factor, target },
            options: options.into_iter().map(|o| o.to_string()).collect(),
            correct_answer: correct.to_string(),
            aux_target: None,
        }
    }

    /// Placeholder shown before a difficulty is chosen.
    #[must_use]
    pub fn choose_difficulty() -> Self {
        Self {
            prompt: Prompt::ChooseDifficulty,
            options: SmallVec::new(),
            correct_answer: String::new(),
            aux_target: None,
        }
    }

    #[must_use]
    pub fn variant(&self) -> Option<Variant> {
        self.prompt.variant()
    }

    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.prompt.slot_count()
    }
}

/// Render a factor pair in canonical display form.
#[must_use]
pub fn format_pair(x: u32, y: u32) -> String {
    format!("{x}{TIMES}{y}")
}
