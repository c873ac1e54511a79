//! Core engine types: players, RNG, configuration, errors.
//!
//! Everything here is variant-agnostic. Question generation, judging and
//! the session state machine build on top of these.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use config::{DrillConfig, TimerLevel};
pub use error::DrillError;
pub use player::{PlayerId, PlayerMap};
pub use rng::DrillRng;
