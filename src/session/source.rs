//! Where a session's questions come from.

use im::Vector;

use crate::core::DrillError;
use crate::question::{Question, QuestionGenerator, Variant};

/// Question supply for one session.
#[derive(Clone, Debug)]
pub enum QuestionSource {
    /// Fresh questions of one variant. `None` until a difficulty is picked.
    Generated {
        generator: QuestionGenerator,
        variant: Option<Variant>,
    },
    /// A pre-built bank, read front to back.
    Bank { questions: Vector<Question>, next: usize },
}

impl QuestionSource {
    #[must_use]
    pub fn generated(generator: QuestionGenerator, variant: Option<Variant>) -> Self {
        QuestionSource::Generated { generator, variant }
    }

    #[must_use]
    pub fn bank(questions: Vector<Question>) -> Self {
        QuestionSource::Bank { questions, next: 0 }
    }

    /// Next question, or `Ok(None)` when a bank is used up.
    ///
    /// # Errors
    ///
    /// `InvalidVariantConfiguration` when no variant has been selected.
    pub fn next_question(&mut self) -> Result<Option<Question>, DrillError> {
        match self {
            QuestionSource::Generated { generator, variant } => {
                generator.generate_for(*variant).map(Some)
            }
            QuestionSource::Bank { questions, next } => {
                let question = questions.get(*next).cloned();
                if question.is_some() {
                    *next += 1;
                }
                Ok(question)
            }
        }
    }

    /// Bank length, if this is a bank.
    #[must_use]
    pub fn bank_len(&self) -> Option<usize> {
        match self {
            QuestionSource::Bank { questions, .. } => Some(questions.len()),
            QuestionSource::Generated { .. } => None,
        }
    }

    /// Banks drive races, where progress counts correct answers.
    #[must_use]
    pub fn is_bank(&self) -> bool {
        matches!(self, QuestionSource::Bank { .. })
    }

    #[must_use]
    pub fn variant(&self) -> Option<Variant> {
        match self {
            QuestionSource::Generated { variant, .. } => *variant,
            QuestionSource::Bank { .. } => None,
        }
    }

    /// Choose the variant of a generated source. No effect on banks.
    pub fn set_variant(&mut self, selected: Option<Variant>) {
        if let QuestionSource::Generated { variant, .. } = self {
            *variant = selected;
        }
    }

    /// Rewind a bank. A generated source forgets its variant, sending the
    /// player back to the difficulty selector.
    pub fn reset(&mut self) {
        match self {
            QuestionSource::Generated { variant, .. } => *variant = None,
            QuestionSource::Bank { next, .. } => *next = 0,
        }
    }
}
