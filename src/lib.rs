//! # times-table-drill
//!
//! Engine for a multiplication-facts drill game with single-player and
//! two-player race modes.
//!
//! ## Design Principles
//!
//! 1. **Presentation-free**: The engine renders nothing. It reports through
//!    a `UiListener` and accepts selections, keypad input and restarts.
//!
//! 2. **Explicit variants**: Every question carries its archetype in its
//!    `Prompt`; logic never infers it from the layout.
//!
//! 3. **Deterministic**: All randomness flows from a seeded `DrillRng` and
//!    all timing from a virtual-clock `Scheduler`, so a seed plus an input
//!    script replays exactly.
//!
//! ## Modules
//!
//! - `core`: Players, RNG, configuration, errors
//! - `question`: Variants, prompts, question generation
//! - `judge`: Answer parsing and validation
//! - `timer`: Cancellable countdown and delay tasks
//! - `session`: Per-player timed session state machine
//! - `events`: UI notifications
//! - `rules`: Race results
//! - `game`: Race coordinator and top-level controller

pub mod core;
pub mod events;
pub mod game;
pub mod judge;
pub mod question;
pub mod rules;
pub mod session;
pub mod timer;

// Re-export commonly used types
pub use crate::core::{DrillConfig, DrillError, DrillRng, PlayerId, PlayerMap, TimerLevel};

pub use crate::question::{Prompt, Question, QuestionGenerator, Variant};

pub use crate::judge::{canonical_factor_pairs, judge, Answer, Verdict};

pub use crate::timer::{FiredTask, Scheduler, TaskId, TaskKind};

pub use crate::session::{PendingInput, QuestionSource, Session, SessionPhase, SessionStep, SessionSummary};

pub use crate::events::{EventLog, RoundFeedback, UiEvent, UiListener};

pub use crate::rules::{MatchOutcome, MatchResult};

pub use crate::game::{Controller, Match, StartRequest};
