//! Cancellable timers on a virtual clock.
//!
//! Countdowns and feedback delays are explicit tasks with handles. A
//! session keeps at most one handle and cancels it on every exit path.

pub mod scheduler;

pub use scheduler::{FiredTask, Scheduler, TaskId, TaskKind};
