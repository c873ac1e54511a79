//! Question archetypes and their generator.
//!
//! - `Variant`: Recognition, Construction, BoundedQuotient
//! - `Prompt` / `Question`: an immutable generated problem
//! - `QuestionGenerator`: seeded generation with well-formed distractor sets

pub mod generator;
pub mod prompt;
pub mod variant;

pub use generator::{QuestionGenerator, MAX_FACTOR, MAX_PRODUCT, MIN_FACTOR};
pub use prompt::{format_pair, Prompt, Question, OPTION_COUNT, TIMES};
pub use variant::Variant;
