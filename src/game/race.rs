//! Two-player race coordinator.
//!
//! Both players get the same set of questions, each in an independently
//! shuffled order. Sessions run side by side with fully separate timers;
//! the coordinator only looks at their progress after each step and ends
//! the race as soon as the rules say so.

use im::Vector;
use log::info;

use crate::core::{DrillConfig, DrillError, DrillRng, PlayerId, PlayerMap};
use crate::events::{UiEvent, UiListener};
use crate::question::{Question, QuestionGenerator};
use crate::rules::{decide, MatchOutcome};
use crate::session::{QuestionSource, Session, SessionStep};
use crate::timer::{FiredTask, Scheduler};

/// Players in a race.
pub const RACE_PLAYERS: usize = 2;

/// A two-player race over a shared question bank.
#[derive(Clone, Debug)]
pub struct Match {
    sessions: PlayerMap<Session>,
    bank: Vector<Question>,
    winning_progress: u32,
    outcome: Option<MatchOutcome>,
}

impl Match {
    /// Build a race: `questions_total` questions of random variants, one
    /// shuffled copy per player.
    pub fn new(config: &DrillConfig, generator: &mut QuestionGenerator) -> Self {
        let bank: Vector<Question> = (0..config.questions_total)
            .map(|_| generator.generate_any())
            .collect();
        Self::with_bank(config, bank, generator.rng_mut())
    }

    /// Build a race over an existing bank.
    pub fn with_bank(config: &DrillConfig, bank: Vector<Question>, rng: &mut DrillRng) -> Self {
        let sessions = PlayerMap::new(RACE_PLAYERS, |player| {
            let mut order: Vec<Question> = bank.iter().cloned().collect();
            rng.fork().shuffle(&mut order);
            Session::new(
                player,
                config.clone(),
                QuestionSource::bank(order.into_iter().collect()),
            )
        });

        Self {
            sessions,
            bank,
            winning_progress: config.winning_progress,
            outcome: None,
        }
    }

    /// Start both sessions.
    ///
    /// # Errors
    ///
    /// `AlreadyStarted` if either session has already begun.
    pub fn start(&mut self, sched: &mut Scheduler, ui: &mut dyn UiListener) -> Result<(), DrillError> {
        info!("race starting over {} questions", self.bank.len());
        for (_, session) in self.sessions.iter_mut() {
            session.start(sched, ui)?;
        }
        Ok(())
    }

    /// The shared bank in generation order.
    #[must_use]
    pub fn bank(&self) -> &Vector<Question> {
        &self.bank
    }

    #[must_use]
    pub fn session(&self, player: PlayerId) -> Option<&Session> {
        self.sessions.get(player)
    }

    #[must_use]
    pub fn sessions(&self) -> &PlayerMap<Session> {
        &self.sessions
    }

    #[must_use]
    pub fn winning_progress(&self) -> u32 {
        self.winning_progress
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&MatchOutcome> {
        self.outcome.as_ref()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Run an input operation on one player's session, then check the race.
    ///
    /// # Errors
    ///
    /// `NoSuchPlayer` for an unknown player, otherwise whatever the
    /// session operation returns. Input after the race ends is refused by
    /// the (aborted) session.
    pub fn with_session(
        &mut self,
        player: PlayerId,
        sched: &mut Scheduler,
        ui: &mut dyn UiListener,
        op: impl FnOnce(&mut Session, &mut Scheduler, &mut dyn UiListener) -> Result<SessionStep, DrillError>,
    ) -> Result<SessionStep, DrillError> {
        let session = self
            .sessions
            .get_mut(player)
            .ok_or(DrillError::NoSuchPlayer(player))?;
        let step = op(session, sched, ui)?;
        self.after_step(step, sched, ui);
        Ok(step)
    }

    /// Route a fired timer to its session, then check the race.
    pub fn handle_task(&mut self, fired: &FiredTask, sched: &mut Scheduler, ui: &mut dyn UiListener) -> SessionStep {
        let Some(session) = self.sessions.get_mut(fired.owner) else {
            // Repeating tasks stay armed after firing; drop everything this owner holds.
            sched.cancel_owner(fired.owner);
            return SessionStep::Waiting;
        };
        let step = session.handle_task(fired, sched, ui);
        self.after_step(step, sched, ui);
        step
    }

    /// Reset both sessions to `AwaitingStart`, cancelling every timer.
    pub fn reset(&mut self, sched: &mut Scheduler, ui: &mut dyn UiListener) {
        for (_, session) in self.sessions.iter_mut() {
            session.reset(sched, ui);
        }
        self.outcome = None;
    }

    /// Stop both sessions without deciding a result.
    pub fn abort(&mut self, sched: &mut Scheduler) {
        for (_, session) in self.sessions.iter_mut() {
            session.abort(sched);
        }
    }

    fn after_step(&mut self, step: SessionStep, sched: &mut Scheduler, ui: &mut dyn UiListener) {
        if self.outcome.is_some() || !matches!(step, SessionStep::Resolved { .. } | SessionStep::Ended) {
            return;
        }

        let progress = self.sessions.map(|_, s| s.progress());
        let scores = self.sessions.map(|_, s| s.score());
        let finished = self.sessions.map(|_, s| s.is_ended());
        let Some(outcome) = decide(&progress, &scores, &finished, self.winning_progress) else {
            return;
        };

        // Stops every in-flight round, including the winner's feedback delay.
        self.abort(sched);
        info!("race over: {:?} with scores {:?}", outcome.result, outcome.final_scores);
        ui.notify(UiEvent::MatchEnded { outcome: outcome.clone() });
        self.outcome = Some(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventLog;

    fn prompts(questions: impl Iterator<Item = Question>) -> Vec<String> {
        let mut prompts: Vec<String> = questions.map(|q| q.prompt.to_string()).collect();
        prompts.sort();
        prompts
    }

    #[test]
    fn test_players_share_question_set() {
        let config = DrillConfig::default();
        let mut generator = QuestionGenerator::with_seed(11);
        let race = Match::new(&config, &mut generator);

        assert_eq!(race.bank().len(), 10);
        let expected = prompts(race.bank().iter().cloned());

        for (player, session) in race.sessions().iter() {
            let QuestionSource::Bank { questions, .. } = session.source() else {
                panic!("{player} is not bank-fed");
            };
            assert_eq!(prompts(questions.iter().cloned()), expected);
            assert_eq!(session.questions_total(), 10);
        }
    }

    #[test]
    fn test_start_shows_both_players_a_question() {
        let config = DrillConfig::default();
        let mut generator = QuestionGenerator::with_seed(12);
        let mut race = Match::new(&config, &mut generator);
        let mut sched = Scheduler::new();
        let mut log = EventLog::new();

        race.start(&mut sched, &mut log).unwrap();

        for player in PlayerId::all(RACE_PLAYERS) {
            assert!(log.last_question(player).is_some());
            assert_eq!(sched.owned_by(player), 1);
        }
    }

    #[test]
    fn test_unknown_player() {
        let config = DrillConfig::default();
        let mut generator = QuestionGenerator::with_seed(1);
        let mut race = Match::new(&config, &mut generator);
        let mut sched = Scheduler::new();
        let mut log = EventLog::new();

        let err = race.with_session(PlayerId::new(2), &mut sched, &mut log, |s, sched, ui| {
            s.submit_selection("1", sched, ui)
        });
        assert_eq!(err, Err(DrillError::NoSuchPlayer(PlayerId::new(2))));
    }

    #[test]
    fn test_tasks_for_unknown_player_are_dropped() {
        use crate::timer::TaskKind;
        use std::time::Duration;

        let config = DrillConfig::default();
        let mut generator = QuestionGenerator::with_seed(2);
        let mut race = Match::new(&config, &mut generator);
        let mut sched = Scheduler::new();
        let mut log = EventLog::new();
        race.start(&mut sched, &mut log).unwrap();

        let stranger = PlayerId::new(5);
        sched.schedule_repeating(stranger, TaskKind::CountdownTick, Duration::from_millis(100));
        sched.schedule_once(stranger, TaskKind::AdvanceRound, Duration::from_secs(3));

        let fired = sched.pop_due(Duration::from_millis(100)).unwrap();
        assert_eq!(fired.owner, stranger);
        assert_eq!(race.handle_task(&fired, &mut sched, &mut log), SessionStep::Waiting);

        assert_eq!(sched.owned_by(stranger), 0);
        for player in PlayerId::all(RACE_PLAYERS) {
            assert_eq!(sched.owned_by(player), 1);
        }
    }
}
