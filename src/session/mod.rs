//! Per-player timed sessions.
//!
//! A `Session` drives generate → present → answer-or-timeout → advance for
//! one player. Single-player games run one; races run two side by side.

pub mod input;
pub mod session;
pub mod source;

pub use input::PendingInput;
pub use session::{Session, SessionPhase, SessionStep, SessionSummary};
pub use source::QuestionSource;
