//! Per-player session state machine.
//!
//! ```text
//! AwaitingStart -> InProgress(1) -> Feedback(1) -> InProgress(2) -> ... -> Feedback(n) -> Ended
//! ```
//!
//! A round leaves `InProgress` on a submission or on the countdown hitting
//! zero, whichever comes first. Submissions stop the countdown before
//! judging; a timeout locks input before resolving. The session owns at
//! most one scheduled task (countdown or feedback delay) and cancels it on
//! every exit path, so a restart never lets a stale task fire.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::input::PendingInput;
use super::source::QuestionSource;
use crate::core::{DrillConfig, DrillError, PlayerId};
use crate::events::{RoundFeedback, UiEvent, UiListener};
use crate::judge::{judge, Answer, Verdict};
use crate::question::{Question, Variant};
use crate::timer::{FiredTask, Scheduler, TaskId, TaskKind};

const INCOMPLETE_MESSAGE: &str = "Fill in every blank before submitting";

/// Where a session is in its lifecycle. Rounds are 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionPhase {
    AwaitingStart,
    InProgress { round: u32 },
    Feedback { round: u32 },
    Ended,
}

/// What a call into the session did, for the coordinator above it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStep {
    /// No state transition (fallback prompt, stale task, rejected keypress).
    Waiting,
    /// Input slots changed.
    InputChanged,
    RoundStarted { round: u32 },
    Ticked { remaining: u32 },
    Resolved { round: u32, is_correct: bool },
    Ended,
}

/// Final tally shown on the result screen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub score: u32,
    pub total: u32,
    pub questions_answered: u32,
    pub message: String,
}

/// One player's drill.
#[derive(Clone, Debug)]
pub struct Session {
    player: PlayerId,
    config: DrillConfig,
    source: QuestionSource,
    phase: SessionPhase,
    score: u32,
    questions_answered: u32,
    progress: u32,
    questions_total: u32,
    current: Option<Question>,
    pending: PendingInput,
    time_remaining: u32,
    input_locked: bool,
    task: Option<TaskId>,
}

impl Session {
    /// Create a session in `AwaitingStart`.
    ///
    /// A bank-fed session plays exactly as many rounds as the bank holds.
    #[must_use]
    pub fn new(player: PlayerId, config: DrillConfig, source: QuestionSource) -> Self {
        let questions_total = source
            .bank_len()
            .map_or(config.questions_total, |len| len as u32);
        let time_remaining = config.ticks_per_question();

        Self {
            player,
            config,
            source,
            phase: SessionPhase::AwaitingStart,
            score: 0,
            questions_answered: 0,
            progress: 0,
            questions_total,
            current: None,
            pending: PendingInput::default(),
            time_remaining,
            input_locked: true,
            task: None,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Rounds resolved so far, correct or not.
    #[must_use]
    pub fn questions_answered(&self) -> u32 {
        self.questions_answered
    }

    /// Correct answers so far. Only reported to the UI in races.
    #[must_use]
    pub fn progress(&self) -> u32 {
        self.progress
    }

    #[must_use]
    pub fn questions_total(&self) -> u32 {
        self.questions_total
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn pending_input(&self) -> &PendingInput {
        &self.pending
    }

    #[must_use]
    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    #[must_use]
    pub fn is_input_locked(&self) -> bool {
        self.input_locked
    }

    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.phase == SessionPhase::Ended
    }

    /// Handle of the outstanding timer task, if any.
    #[must_use]
    pub fn active_task(&self) -> Option<TaskId> {
        self.task
    }

    #[must_use]
    pub fn source(&self) -> &QuestionSource {
        &self.source
    }

    #[must_use]
    pub fn variant(&self) -> Option<Variant> {
        self.source.variant()
    }

    pub fn set_variant(&mut self, variant: Option<Variant>) {
        self.source.set_variant(variant);
    }

    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            score: self.score,
            total: self.questions_total,
            questions_answered: self.questions_answered,
            message: format!("Game over! Your score is {}/{}", self.score, self.questions_total),
        }
    }

    // === Lifecycle ===

    /// Start round 1.
    ///
    /// With no variant selected, shows the neutral "choose a difficulty"
    /// prompt and stays in `AwaitingStart`.
    ///
    /// # Errors
    ///
    /// `AlreadyStarted` unless the session is in `AwaitingStart`.
    pub fn start(
        &mut self,
        sched: &mut Scheduler,
        ui: &mut dyn UiListener,
    ) -> Result<SessionStep, DrillError> {
        if self.phase != SessionPhase::AwaitingStart {
            return Err(DrillError::AlreadyStarted);
        }
        self.score = 0;
        self.questions_answered = 0;
        self.progress = 0;
        ui.notify(UiEvent::ScoreChanged { player: self.player, score: 0 });
        if self.source.is_bank() {
            ui.notify(UiEvent::ProgressChanged { player: self.player, progress: 0 });
        }

        info!("{} starting {} rounds", self.player, self.questions_total);
        Ok(self.enter_round(1, sched, ui))
    }

    /// Return to `AwaitingStart`, cancelling any countdown or pending advance.
    pub fn reset(&mut self, sched: &mut Scheduler, ui: &mut dyn UiListener) {
        self.cancel_task(sched);
        self.source.reset();
        self.phase = SessionPhase::AwaitingStart;
        self.score = 0;
        self.questions_answered = 0;
        self.progress = 0;
        self.current = None;
        self.pending = PendingInput::default();
        self.time_remaining = self.config.ticks_per_question();
        self.input_locked = true;

        ui.notify(UiEvent::ScoreChanged { player: self.player, score: 0 });
        if self.source.is_bank() {
            ui.notify(UiEvent::ProgressChanged { player: self.player, progress: 0 });
        }
        ui.notify(UiEvent::TimeChanged {
            player: self.player,
            remaining: self.time_remaining,
            level: self.config.timer_level(self.time_remaining),
        });
        debug!("{} reset", self.player);
    }

    /// Stop immediately: cancel timers, ignore further input. No summary
    /// is emitted; the caller reports the outcome.
    pub fn abort(&mut self, sched: &mut Scheduler) {
        self.cancel_task(sched);
        self.input_locked = true;
        self.current = None;
        self.phase = SessionPhase::Ended;
        debug!("{} aborted", self.player);
    }

    // === Input ===

    /// Submit the text of a chosen option (or a typed answer).
    ///
    /// # Errors
    ///
    /// `InputLocked` while feedback is showing, `NotInProgress` before
    /// the first round or after the last.
    pub fn submit_selection(
        &mut self,
        text: &str,
        sched: &mut Scheduler,
        ui: &mut dyn UiListener,
    ) -> Result<SessionStep, DrillError> {
        self.submit(Answer::Selection(text.to_string()), sched, ui)
    }

    /// Submit both factor slots.
    ///
    /// # Errors
    ///
    /// `IncompleteInput` if a slot is blank (the round keeps running), or
    /// `NotInProgress` / `InputLocked`.
    pub fn submit_constructed(
        &mut self,
        first: Option<u32>,
        second: Option<u32>,
        sched: &mut Scheduler,
        ui: &mut dyn UiListener,
    ) -> Result<SessionStep, DrillError> {
        self.ensure_accepting()?;
        match (first, second) {
            (Some(x), Some(y)) => self.submit(Answer::Pair(x, y), sched, ui),
            _ => {
                let missing = [first, second].iter().filter(|s| s.is_none()).count();
                Err(self.incomplete(missing, ui))
            }
        }
    }

    /// Submit a single keypad value.
    ///
    /// # Errors
    ///
    /// `IncompleteInput` if the value is blank, or `NotInProgress` / `InputLocked`.
    pub fn submit_single_value(
        &mut self,
        value: Option<u32>,
        sched: &mut Scheduler,
        ui: &mut dyn UiListener,
    ) -> Result<SessionStep, DrillError> {
        self.ensure_accepting()?;
        match value {
            Some(v) => self.submit(Answer::Single(v), sched, ui),
            None => Err(self.incomplete(1, ui)),
        }
    }

    /// Type a digit into the next blank slot.
    ///
    /// # Errors
    ///
    /// `NotInProgress` / `InputLocked`.
    pub fn press_digit(&mut self, digit: u32, ui: &mut dyn UiListener) -> Result<SessionStep, DrillError> {
        self.ensure_accepting()?;
        if !self.pending.press_digit(digit) {
            return Ok(SessionStep::Waiting);
        }
        self.notify_input(ui);
        Ok(SessionStep::InputChanged)
    }

    /// Clear the most recently filled slot.
    ///
    /// # Errors
    ///
    /// `NotInProgress` / `InputLocked`.
    pub fn delete_digit(&mut self, ui: &mut dyn UiListener) -> Result<SessionStep, DrillError> {
        self.ensure_accepting()?;
        if !self.pending.delete() {
            return Ok(SessionStep::Waiting);
        }
        self.notify_input(ui);
        Ok(SessionStep::InputChanged)
    }

    /// Submit whatever is in the keypad slots.
    ///
    /// # Errors
    ///
    /// `IncompleteInput` if a slot is blank, `MalformedAnswer` for a
    /// selection-only question, or `NotInProgress` / `InputLocked`.
    pub fn submit_pending(
        &mut self,
        sched: &mut Scheduler,
        ui: &mut dyn UiListener,
    ) -> Result<SessionStep, DrillError> {
        self.ensure_accepting()?;
        match self.pending.to_answer() {
            Ok(answer) => self.submit(answer, sched, ui),
            Err(DrillError::IncompleteInput { missing }) => Err(self.incomplete(missing, ui)),
            Err(other) => Err(other),
        }
    }

    /// Judge an answer and move to feedback.
    ///
    /// # Errors
    ///
    /// `InputLocked` while feedback is showing, `NotInProgress` before
    /// the first round or after the last.
    pub fn submit(
        &mut self,
        answer: Answer,
        sched: &mut Scheduler,
        ui: &mut dyn UiListener,
    ) -> Result<SessionStep, DrillError> {
        self.ensure_accepting()?;
        // Stop the countdown first so a tick can't resolve this round again.
        self.cancel_task(sched);
        self.input_locked = true;

        let question = self.current.as_ref().ok_or(DrillError::NotInProgress)?;
        let verdict = judge(question, &answer);
        debug!("{} answered {answer}: correct={}", self.player, verdict.is_correct);
        Ok(self.resolve(verdict, Some(answer.to_string()), false, sched, ui))
    }

    // === Timers ===

    /// React to a fired timer task. Tasks that are not this session's
    /// current handle are ignored.
    pub fn handle_task(
        &mut self,
        fired: &FiredTask,
        sched: &mut Scheduler,
        ui: &mut dyn UiListener,
    ) -> SessionStep {
        if self.task != Some(fired.id) {
            debug!("{} ignoring stale {}", self.player, fired.id);
            return SessionStep::Waiting;
        }

        match (fired.kind, self.phase) {
            (TaskKind::CountdownTick, SessionPhase::InProgress { .. }) if !self.input_locked => {
                self.time_remaining = self.time_remaining.saturating_sub(1);
                ui.notify(UiEvent::TimeChanged {
                    player: self.player,
                    remaining: self.time_remaining,
                    level: self.config.timer_level(self.time_remaining),
                });
                if self.time_remaining == 0 {
                    self.time_up(sched, ui)
                } else {
                    SessionStep::Ticked { remaining: self.time_remaining }
                }
            }
            (TaskKind::AdvanceRound, SessionPhase::Feedback { round }) => {
                self.task = None;
                if round < self.questions_total {
                    self.enter_round(round + 1, sched, ui)
                } else {
                    self.finish(sched, ui)
                }
            }
            (kind, phase) => {
                warn!("{} got {kind:?} in {phase:?}; cancelling", self.player);
                self.cancel_task(sched);
                SessionStep::Waiting
            }
        }
    }

    fn time_up(&mut self, sched: &mut Scheduler, ui: &mut dyn UiListener) -> SessionStep {
        // Lock before anything else so a late submission is refused.
        self.input_locked = true;
        self.cancel_task(sched);

        let Some(question) = self.current.as_ref() else {
            return SessionStep::Waiting;
        };
        let verdict = Verdict::timed_out(question);
        debug!("{} ran out of time", self.player);
        self.resolve(verdict, None, true, sched, ui)
    }

    // === Internals ===

    fn ensure_accepting(&self) -> Result<(), DrillError> {
        match self.phase {
            SessionPhase::InProgress { .. } if !self.input_locked => Ok(()),
            SessionPhase::InProgress { .. } | SessionPhase::Feedback { .. } => Err(DrillError::InputLocked),
            SessionPhase::AwaitingStart | SessionPhase::Ended => Err(DrillError::NotInProgress),
        }
    }

    fn incomplete(&self, missing: usize, ui: &mut dyn UiListener) -> DrillError {
        warn!("{} submitted with {missing} blank slot(s)", self.player);
        ui.notify(UiEvent::IncompleteInput {
            player: self.player,
            message: INCOMPLETE_MESSAGE.to_string(),
        });
        DrillError::IncompleteInput { missing }
    }

    fn notify_input(&self, ui: &mut dyn UiListener) {
        ui.notify(UiEvent::InputChanged {
            player: self.player,
            input: self.pending.clone(),
        });
    }

    fn enter_round(&mut self, round: u32, sched: &mut Scheduler, ui: &mut dyn UiListener) -> SessionStep {
        let question = match self.source.next_question() {
            Ok(Some(question)) => question,
            Ok(None) => return self.finish(sched, ui),
            Err(err) => {
                warn!("{}: {err}; showing difficulty prompt", self.player);
                self.phase = SessionPhase::AwaitingStart;
                self.input_locked = true;
                ui.notify(UiEvent::QuestionReady {
                    player: self.player,
                    round: 0,
                    total: self.questions_total,
                    question: Question::choose_difficulty(),
                });
                return SessionStep::Waiting;
            }
        };

        self.pending = PendingInput::new(question.slot_count());
        self.time_remaining = self.config.ticks_per_question();
        self.phase = SessionPhase::InProgress { round };
        ui.notify(UiEvent::QuestionReady {
            player: self.player,
            round,
            total: self.questions_total,
            question: question.clone(),
        });
        ui.notify(UiEvent::TimeChanged {
            player: self.player,
            remaining: self.time_remaining,
            level: self.config.timer_level(self.time_remaining),
        });
        self.current = Some(question);

        self.arm(TaskKind::CountdownTick, sched);
        self.input_locked = false;
        SessionStep::RoundStarted { round }
    }

    fn resolve(
        &mut self,
        verdict: Verdict,
        submitted: Option<String>,
        timed_out: bool,
        sched: &mut Scheduler,
        ui: &mut dyn UiListener,
    ) -> SessionStep {
        let round = match self.phase {
            SessionPhase::InProgress { round } => round,
            _ => return SessionStep::Waiting,
        };
        self.phase = SessionPhase::Feedback { round };
        self.questions_answered += 1;

        if verdict.is_correct {
            self.score += 1;
            self.progress += 1;
            ui.notify(UiEvent::ScoreChanged { player: self.player, score: self.score });
            if self.source.is_bank() {
                ui.notify(UiEvent::ProgressChanged { player: self.player, progress: self.progress });
            }
        }

        let answers = verdict.valid_forms.join(", ");
        let message = if verdict.is_correct {
            "Correct!".to_string()
        } else if timed_out {
            format!("Time's up! The correct answer is {answers}")
        } else {
            format!("Wrong! The correct answer is {answers}")
        };
        ui.notify(UiEvent::RoundResolved {
            player: self.player,
            feedback: RoundFeedback {
                round,
                is_correct: verdict.is_correct,
                timed_out,
                submitted,
                accepted_form: verdict.accepted_form,
                valid_forms: verdict.valid_forms,
                message,
            },
        });

        self.arm(TaskKind::AdvanceRound, sched);
        SessionStep::Resolved { round, is_correct: verdict.is_correct }
    }

    fn finish(&mut self, sched: &mut Scheduler, ui: &mut dyn UiListener) -> SessionStep {
        self.cancel_task(sched);
        self.input_locked = true;
        self.current = None;
        self.phase = SessionPhase::Ended;

        let summary = self.summary();
        info!("{}: {}", self.player, summary.message);
        ui.notify(UiEvent::SessionEnded { player: self.player, summary });
        SessionStep::Ended
    }

    /// Replace the outstanding task with a new one.
    fn arm(&mut self, kind: TaskKind, sched: &mut Scheduler) {
        self.cancel_task(sched);
        debug_assert_eq!(sched.owned_by(self.player), 0, "{} has an orphaned task", self.player);

        let id = match kind {
            TaskKind::CountdownTick => sched.schedule_repeating(self.player, kind, self.config.tick),
            TaskKind::AdvanceRound => sched.schedule_once(self.player, kind, self.config.feedback_delay),
        };
        debug!("{} armed {kind:?} as {id}", self.player);
        self.task = Some(id);
    }

    fn cancel_task(&mut self, sched: &mut Scheduler) {
        if let Some(id) = self.task.take() {
            sched.cancel(id);
        }
    }
}
