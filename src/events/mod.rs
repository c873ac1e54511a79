//! Notifications from the engine to the UI.
//!
//! The engine never touches presentation. It reports what happened through
//! a `UiListener`, and the UI renders prompts, buttons, slots, counters and
//! feedback from these events.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, TimerLevel};
use crate::question::Question;
use crate::rules::MatchOutcome;
use crate::session::{PendingInput, SessionSummary};

/// Feedback for a resolved round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundFeedback {
    /// 1-based round number.
    pub round: u32,
    pub is_correct: bool,
    pub timed_out: bool,
    /// What the player submitted, for highlighting a wrong choice.
    pub submitted: Option<String>,
    /// Canonical form of the accepted submission.
    pub accepted_form: Option<String>,
    /// Every answer that would have been accepted.
    pub valid_forms: Vec<String>,
    pub message: String,
}

/// Something the UI should reflect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiEvent {
    QuestionReady {
        player: PlayerId,
        round: u32,
        total: u32,
        question: Question,
    },
    InputChanged {
        player: PlayerId,
        input: PendingInput,
    },
    TimeChanged {
        player: PlayerId,
        remaining: u32,
        level: TimerLevel,
    },
    IncompleteInput {
        player: PlayerId,
        message: String,
    },
    RoundResolved {
        player: PlayerId,
        feedback: RoundFeedback,
    },
    ScoreChanged {
        player: PlayerId,
        score: u32,
    },
    ProgressChanged {
        player: PlayerId,
        progress: u32,
    },
    SessionEnded {
        player: PlayerId,
        summary: SessionSummary,
    },
    MatchEnded {
        outcome: MatchOutcome,
    },
}

impl UiEvent {
    /// The player this event concerns, if it is player-specific.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            UiEvent::QuestionReady { player, .. }
            | UiEvent::InputChanged { player, .. }
            | UiEvent::TimeChanged { player, .. }
            | UiEvent::IncompleteInput { player, .. }
            | UiEvent::RoundResolved { player, .. }
            | UiEvent::ScoreChanged { player, .. }
            | UiEvent::ProgressChanged { player, .. }
            | UiEvent::SessionEnded { player, .. } => Some(*player),
            UiEvent::MatchEnded { .. } => None,
        }
    }
}

/// Receiver of engine notifications.
pub trait UiListener {
    fn notify(&mut self, event: UiEvent);
}

impl<F: FnMut(UiEvent)> UiListener for F {
    fn notify(&mut self, event: UiEvent) {
        self(event);
    }
}

/// Listener that records every event, for tests and headless runs.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    pub events: Vec<UiEvent>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all recorded events, leaving the log empty.
    pub fn drain(&mut self) -> Vec<UiEvent> {
        std::mem::take(&mut self.events)
    }

    /// Most recent round feedback for `player`.
    #[must_use]
    pub fn last_feedback(&self, player: PlayerId) -> Option<&RoundFeedback> {
        self.events.iter().rev().find_map(|e| match e {
            UiEvent::RoundResolved { player: p, feedback } if *p == player => Some(feedback),
            _ => None,
        })
    }

    /// Most recent question shown to `player`.
    #[must_use]
    pub fn last_question(&self, player: PlayerId) -> Option<&Question> {
        self.events.iter().rev().find_map(|e| match e {
            UiEvent::QuestionReady { player: p, question, .. } if *p == player => Some(question),
            _ => None,
        })
    }

    /// Count events matching a predicate.
    #[must_use]
    pub fn count(&self, predicate: impl Fn(&UiEvent) -> bool) -> usize {
        self.events.iter().filter(|e| predicate(e)).count()
    }
}

impl UiListener for EventLog {
    fn notify(&mut self, event: UiEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_log_queries() {
        let mut log = EventLog::new();
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        log.notify(UiEvent::QuestionReady {
            player: p0,
            round: 1,
            total: 10,
            question: Question::construction(2, 3),
        });
        log.notify(UiEvent::ScoreChanged { player: p1, score: 1 });

        assert_eq!(log.last_question(p0), Some(&Question::construction(2, 3)));
        assert!(log.last_question(p1).is_none());
        assert_eq!(log.count(|e| e.player() == Some(p1)), 1);
        assert_eq!(log.drain().len(), 2);
        assert!(log.events.is_empty());
    }

    #[test]
    fn test_closure_listener() {
        let mut seen = 0;
        {
            let mut listener = |_event: UiEvent| seen += 1;
            listener.notify(UiEvent::ScoreChanged { player: PlayerId::SOLO, score: 2 });
        }
        assert_eq!(seen, 1);
    }
}
