//! Question generation for all three variants.
//!
//! Operands are drawn uniformly from the times-table range `[1, 9]`.
//! Recognition distractors sit close to the product; BoundedQuotient
//! distractors are drawn from the other digits `0..=9`.

use log::debug;

use super::prompt::{Question, OPTION_COUNT};
use super::variant::Variant;
use crate::core::{DrillError, DrillRng};

/// Smallest operand.
pub const MIN_FACTOR: u32 = 1;
/// Largest operand.
pub const MAX_FACTOR: u32 = 9;
/// Largest product in the table.
pub const MAX_PRODUCT: u32 = MAX_FACTOR * MAX_FACTOR;

/// Recognition distractors are `product + d` for `d` in `[-SPREAD, SPREAD]`.
const DISTRACTOR_SPREAD: i32 = 7;
/// Near-miss draws before falling back to the full `[1, 81]` range.
const MAX_DISTRACTOR_ATTEMPTS: usize = 100;

/// Produces questions from a seeded RNG.
#[derive(Clone, Debug)]
pub struct QuestionGenerator {
    rng: DrillRng,
}

impl QuestionGenerator {
    #[must_use]
    pub fn new(rng: DrillRng) -> Self {
        Self { rng }
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::new(DrillRng::new(seed))
    }

    /// Access the RNG, e.g. to fork per-player shuffle streams.
    pub fn rng_mut(&mut self) -> &mut DrillRng {
        &mut self.rng
    }

    /// Generate a question for an optionally-selected variant.
    ///
    /// # Errors
    ///
    /// Returns `DrillError::InvalidVariantConfiguration` when `variant` is `None`.
    pub fn generate_for(&mut self, variant: Option<Variant>) -> Result<Question, DrillError> {
        variant
            .map(|v| self.generate(v))
            .ok_or(DrillError::InvalidVariantConfiguration)
    }

    /// Generate one question of the given variant.
    pub fn generate(&mut self, variant: Variant) -> Question {
        let question = match variant {
            Variant::Recognition => self.recognition(),
            Variant::Construction => self.construction(),
            Variant::BoundedQuotient => self.bounded_quotient(),
        };
        debug!(
            "generated {variant}: {} (answer {}, options {:?})",
            question.prompt, question.correct_answer, question.options
        );
        question
    }

    /// Generate with a variant drawn uniformly from all three.
    pub fn generate_any(&mut self) -> Question {
        let variant = Variant::ALL[self.rng.gen_index(Variant::ALL.len())];
        self.generate(variant)
    }

    fn factor(&mut self) -> u32 {
        self.rng.gen_inclusive(MIN_FACTOR as i32, MAX_FACTOR as i32) as u32
    }

    fn recognition(&mut self) -> Question {
        let a = self.factor();
        let b = self.factor();
        let correct = a * b;

        let mut options = vec![correct];
        let mut attempts = 0;
        while options.len() < OPTION_COUNT && attempts < MAX_DISTRACTOR_ATTEMPTS {
            attempts += 1;
            let candidate =
                correct as i32 + self.rng.gen_inclusive(-DISTRACTOR_SPREAD, DISTRACTOR_SPREAD);
            if (1..=MAX_PRODUCT as i32).contains(&candidate) && !options.contains(&(candidate as u32)) {
                options.push(candidate as u32);
            }
        }
        while options.len() < OPTION_COUNT {
            let candidate = self.rng.gen_inclusive(1, MAX_PRODUCT as i32) as u32;
            if !options.contains(&candidate) {
                options.push(candidate);
            }
        }

        self.rng.shuffle(&mut options);
        Question::recognition(a, b, options)
    }

    fn construction(&mut self) -> Question {
        let a = self.factor();
        let b = self.factor();
        Question::construction(a, b)
    }

    fn bounded_quotient(&mut self) -> Question {
        let factor = self.factor();
        let target = self.rng.gen_inclusive(1, (factor * MAX_FACTOR) as i32) as u32;
        let correct = target / factor;

        let pool: Vec<u32> = (0..=MAX_FACTOR).filter(|&n| n != correct).collect();
        let mut options = vec![correct];
        options.extend(self.rng.sample_distinct(&pool, OPTION_COUNT - 1));
        self.rng.shuffle(&mut options);

        Question::bounded_quotient(factor, target, options)
    }
}
