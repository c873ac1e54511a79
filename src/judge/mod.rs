//! Answer validation.
//!
//! Stateless: `judge` takes the question by reference and the submission,
//! and returns a `Verdict` with everything the feedback screen needs.

pub mod answer;
pub mod validator;

pub use answer::{parse_pair, Answer};
pub use validator::{canonical_factor_pairs, is_factor_pair, judge, valid_forms, Verdict};
