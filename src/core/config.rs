//! Drill configuration.
//!
//! Controllers build a `DrillConfig` at startup (usually the default) and
//! every session and match reads its constants from it:
//! - round count and per-question time limit
//! - countdown tick and feedback display delay
//! - race threshold
//! - countdown warning levels

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::DrillError;

/// Visual urgency of the countdown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerLevel {
    #[default]
    Normal,
    Warning,
    Danger,
}

/// Complete drill configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillConfig {
    /// Rounds per single-player game, and bank size per race.
    pub questions_total: u32,

    /// Time allowed per question.
    pub time_limit: Duration,

    /// Countdown granularity.
    pub tick: Duration,

    /// How long feedback stays up before the next round.
    pub feedback_delay: Duration,

    /// Correct answers needed to win a race.
    pub winning_progress: u32,

    /// Countdown shows `Warning` at or below this many remaining ticks.
    pub warning_at: u32,

    /// Countdown shows `Danger` at or below this many remaining ticks.
    pub danger_at: u32,
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            questions_total: 10,
            time_limit: Duration::from_secs(10),
            tick: Duration::from_secs(1),
            feedback_delay: Duration::from_millis(1500),
            winning_progress: 10,
            warning_at: 5,
            danger_at: 3,
        }
    }
}

impl DrillConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_questions_total(mut self, total: u32) -> Self {
        self.questions_total = total;
        self
    }

    #[must_use]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    #[must_use]
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    #[must_use]
    pub fn with_feedback_delay(mut self, delay: Duration) -> Self {
        self.feedback_delay = delay;
        self
    }

    #[must_use]
    pub fn with_winning_progress(mut self, progress: u32) -> Self {
        self.winning_progress = progress;
        self
    }

    /// Set the countdown warning thresholds (in ticks).
    #[must_use]
    pub fn with_timer_levels(mut self, warning_at: u32, danger_at: u32) -> Self {
        self.warning_at = warning_at;
        self.danger_at = danger_at;
        self
    }

    /// Number of ticks in one question's countdown.
    #[must_use]
    pub fn ticks_per_question(&self) -> u32 {
        if self.tick.is_zero() {
            return 0;
        }
        (self.time_limit.as_nanos() / self.tick.as_nanos()) as u32
    }

    /// Urgency level for a countdown showing `remaining` ticks.
    #[must_use]
    pub fn timer_level(&self, remaining: u32) -> TimerLevel {
        if remaining <= self.danger_at {
            TimerLevel::Danger
        } else if remaining <= self.warning_at {
            TimerLevel::Warning
        } else {
            TimerLevel::Normal
        }
    }

    /// Check internal consistency.
    ///
    /// # Errors
    ///
    /// Returns `DrillError::InvalidConfig` describing the first problem found.
    pub fn validate(&self) -> Result<(), DrillError> {
        if self.questions_total == 0 {
            return Err(DrillError::InvalidConfig("questions_total must be at least 1".into()));
        }
        if self.tick.is_zero() {
            return Err(DrillError::InvalidConfig("tick must be non-zero".into()));
        }
        if self.time_limit.is_zero() || self.time_limit.as_nanos() % self.tick.as_nanos() != 0 {
            return Err(DrillError::InvalidConfig(
                "time_limit must be a non-zero multiple of tick".into(),
            ));
        }
        if self.winning_progress == 0 || self.winning_progress > self.questions_total {
            return Err(DrillError::InvalidConfig(format!(
                "winning_progress must be in 1..={}",
                self.questions_total
            )));
        }
        if self.danger_at > self.warning_at {
            return Err(DrillError::InvalidConfig(
                "danger_at must not exceed warning_at".into(),
            ));
        }
        Ok(())
    }
}
