//! Race resolution rules.
//!
//! A race ends the moment one player's progress reaches the threshold. If
//! both players exhaust their banks first, the higher score wins and equal
//! scores draw.

pub mod outcome;

pub use outcome::{decide, MatchOutcome, MatchResult};
