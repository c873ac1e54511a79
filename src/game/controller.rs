//! Top-level driver owning the active game, the clock and the listener.
//!
//! The UI calls `request_*` and `submit_*` methods and advances the
//! virtual clock; everything else flows back through the listener.
//!
//! ```
//! use std::time::Duration;
//! use times_table_drill::{Controller, DrillConfig, EventLog, PlayerId, StartRequest, Variant};
//!
//! let mut controller = Controller::new(DrillConfig::default(), 7, EventLog::new()).unwrap();
//! controller.request_start(StartRequest::Single(Some(Variant::Recognition))).unwrap();
//!
//! let answer = controller
//!     .session(PlayerId::SOLO)
//!     .and_then(|s| s.current_question())
//!     .map(|q| q.correct_answer.clone())
//!     .unwrap();
//! controller.submit_selection(PlayerId::SOLO, &answer).unwrap();
//! controller.advance(Duration::from_millis(1500));
//!
//! assert_eq!(controller.session(PlayerId::SOLO).unwrap().score(), 1);
//! ```

use std::time::Duration;

use log::{info, warn};

use super::race::Match;
use crate::core::{DrillConfig, DrillError, DrillRng, PlayerId};
use crate::events::UiListener;
use crate::question::{QuestionGenerator, Variant};
use crate::session::{QuestionSource, Session, SessionStep};
use crate::timer::{FiredTask, Scheduler};

/// What the player asked to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartRequest {
    /// Ten rounds of one variant. `None` shows the difficulty prompt.
    Single(Option<Variant>),
    /// Two-player race over a shared bank.
    Race,
}

#[derive(Clone, Debug)]
enum Mode {
    Idle,
    Single(Session),
    Race(Match),
}

/// Owns the current game and routes UI input and timer callbacks into it.
pub struct Controller<L: UiListener> {
    config: DrillConfig,
    rng: DrillRng,
    scheduler: Scheduler,
    mode: Mode,
    listener: L,
}

impl<L: UiListener> Controller<L> {
    /// Create a controller with a deterministic seed.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the configuration is inconsistent.
    pub fn new(config: DrillConfig, seed: u64, listener: L) -> Result<Self, DrillError> {
        config.validate()?;
        Ok(Self {
            config,
            rng: DrillRng::new(seed),
            scheduler: Scheduler::new(),
            mode: Mode::Idle,
            listener,
        })
    }

    #[must_use]
    pub fn config(&self) -> &DrillConfig {
        &self.config
    }

    #[must_use]
    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    #[must_use]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// A player's session in the current game.
    #[must_use]
    pub fn session(&self, player: PlayerId) -> Option<&Session> {
        match &self.mode {
            Mode::Single(session) if session.player() == player => Some(session),
            Mode::Race(race) => race.session(player),
            _ => None,
        }
    }

    /// The running race, if any.
    #[must_use]
    pub fn race(&self) -> Option<&Match> {
        match &self.mode {
            Mode::Race(race) => Some(race),
            _ => None,
        }
    }

    /// Start a game, replacing (and cancelling) whatever was running.
    ///
    /// # Errors
    ///
    /// Propagates session start errors; none occur for a fresh game.
    pub fn request_start(&mut self, request: StartRequest) -> Result<(), DrillError> {
        self.stop_all();
        let generator = QuestionGenerator::new(self.rng.fork());
        info!("starting {request:?}");

        match request {
            StartRequest::Single(variant) => {
                let mut session = Session::new(
                    PlayerId::SOLO,
                    self.config.clone(),
                    QuestionSource::generated(generator, variant),
                );
                session.start(&mut self.scheduler, &mut self.listener)?;
                self.mode = Mode::Single(session);
            }
            StartRequest::Race => {
                let mut generator = generator;
                let mut race = Match::new(&self.config, &mut generator);
                race.start(&mut self.scheduler, &mut self.listener)?;
                self.mode = Mode::Race(race);
            }
        }
        Ok(())
    }

    /// Start a single-player game from a difficulty label (`easy`, `simple`, `hard`).
    ///
    /// # Errors
    ///
    /// `UnknownDifficulty` for an unrecognised label.
    pub fn select_difficulty(&mut self, label: &str) -> Result<(), DrillError> {
        let variant = Variant::from_difficulty(label)?;
        self.request_start(StartRequest::Single(Some(variant)))
    }

    /// Send every session back to `AwaitingStart`, cancelling all timers.
    pub fn request_restart(&mut self) {
        match &mut self.mode {
            Mode::Idle => {}
            Mode::Single(session) => session.reset(&mut self.scheduler, &mut self.listener),
            Mode::Race(race) => race.reset(&mut self.scheduler, &mut self.listener),
        }
        debug_assert!(self.scheduler.is_empty(), "timers survived a restart");
        info!("restarted");
    }

    /// Start the current game again after [`Controller::request_restart`].
    ///
    /// A race replays the same banks in the same order. A single-player
    /// game has lost its variant and shows the difficulty prompt.
    ///
    /// # Errors
    ///
    /// `NoActiveGame` when idle, `AlreadyStarted` if the game was not reset.
    pub fn replay(&mut self) -> Result<(), DrillError> {
        match &mut self.mode {
            Mode::Idle => Err(DrillError::NoActiveGame),
            Mode::Single(session) => session
                .start(&mut self.scheduler, &mut self.listener)
                .map(|_| ()),
            Mode::Race(race) => race.start(&mut self.scheduler, &mut self.listener),
        }
    }

    /// # Errors
    ///
    /// See [`Session::submit_selection`].
    pub fn submit_selection(&mut self, player: PlayerId, text: &str) -> Result<SessionStep, DrillError> {
        self.with_session(player, |s, sched, ui| s.submit_selection(text, sched, ui))
    }

    /// # Errors
    ///
    /// See [`Session::submit_constructed`].
    pub fn submit_constructed(
        &mut self,
        player: PlayerId,
        first: Option<u32>,
        second: Option<u32>,
    ) -> Result<SessionStep, DrillError> {
        self.with_session(player, |s, sched, ui| s.submit_constructed(first, second, sched, ui))
    }

    /// # Errors
    ///
    /// See [`Session::submit_single_value`].
    pub fn submit_single_value(&mut self, player: PlayerId, value: Option<u32>) -> Result<SessionStep, DrillError> {
        self.with_session(player, |s, sched, ui| s.submit_single_value(value, sched, ui))
    }

    /// # Errors
    ///
    /// See [`Session::press_digit`].
    pub fn press_digit(&mut self, player: PlayerId, digit: u32) -> Result<SessionStep, DrillError> {
        self.with_session(player, |s, _, ui| s.press_digit(digit, ui))
    }

    /// # Errors
    ///
    /// See [`Session::delete_digit`].
    pub fn delete_digit(&mut self, player: PlayerId) -> Result<SessionStep, DrillError> {
        self.with_session(player, |s, _, ui| s.delete_digit(ui))
    }

    /// # Errors
    ///
    /// See [`Session::submit_pending`].
    pub fn submit_pending(&mut self, player: PlayerId) -> Result<SessionStep, DrillError> {
        self.with_session(player, |s, sched, ui| s.submit_pending(sched, ui))
    }

    /// Advance the virtual clock, firing every timer that comes due on the way.
    pub fn advance(&mut self, dt: Duration) {
        let until = self.scheduler.now() + dt;
        while let Some(fired) = self.scheduler.pop_due(until) {
            self.dispatch(&fired);
        }
        self.scheduler.settle(until);
    }

    fn dispatch(&mut self, fired: &FiredTask) {
        match &mut self.mode {
            Mode::Single(session) if session.player() == fired.owner => {
                session.handle_task(fired, &mut self.scheduler, &mut self.listener);
            }
            Mode::Race(race) => {
                race.handle_task(fired, &mut self.scheduler, &mut self.listener);
            }
            _ => {
                let dropped = self.scheduler.cancel_owner(fired.owner);
                warn!("no session for {} ({:?}); cancelled {dropped} task(s)", fired.owner, fired.kind);
            }
        }
    }

    fn with_session(
        &mut self,
        player: PlayerId,
        op: impl FnOnce(&mut Session, &mut Scheduler, &mut dyn UiListener) -> Result<SessionStep, DrillError>,
    ) -> Result<SessionStep, DrillError> {
        match &mut self.mode {
            Mode::Idle => Err(DrillError::NoActiveGame),
            Mode::Single(session) if session.player() == player => {
                op(session, &mut self.scheduler, &mut self.listener)
            }
            Mode::Single(_) => Err(DrillError::NoSuchPlayer(player)),
            Mode::Race(race) => race.with_session(player, &mut self.scheduler, &mut self.listener, op),
        }
    }

    /// Cancel everything and drop the current game.
    fn stop_all(&mut self) {
        match &mut self.mode {
            Mode::Idle => {}
            Mode::Single(session) => session.abort(&mut self.scheduler),
            Mode::Race(race) => race.abort(&mut self.scheduler),
        }
        self.mode = Mode::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventLog, UiEvent};
    use crate::question::Question;

    fn controller() -> Controller<EventLog> {
        Controller::new(DrillConfig::default(), 42, EventLog::new()).unwrap()
    }

    #[test]
    fn test_idle_rejects_input() {
        let mut c = controller();
        assert_eq!(
            c.submit_selection(PlayerId::SOLO, "1"),
            Err(DrillError::NoActiveGame)
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = DrillConfig::new().with_questions_total(0);
        assert!(Controller::new(config, 1, EventLog::new()).is_err());
    }

    #[test]
    fn test_single_player_wrong_player() {
        let mut c = controller();
        c.select_difficulty("easy").unwrap();

        assert_eq!(
            c.submit_selection(PlayerId::new(1), "1"),
            Err(DrillError::NoSuchPlayer(PlayerId::new(1)))
        );
    }

    #[test]
    fn test_start_without_difficulty_prompts() {
        let mut c = controller();
        c.request_start(StartRequest::Single(None)).unwrap();

        assert_eq!(
            c.listener().last_question(PlayerId::SOLO),
            Some(&Question::choose_difficulty())
        );
        assert!(c.scheduler().is_empty());
        assert_eq!(
            c.submit_selection(PlayerId::SOLO, "1"),
            Err(DrillError::NotInProgress)
        );
    }

    #[test]
    fn test_restart_mid_round_cancels_everything() {
        let mut c = controller();
        c.select_difficulty("hard").unwrap();
        c.advance(Duration::from_secs(3));

        c.request_restart();
        assert!(c.scheduler().is_empty());

        c.listener_mut().drain();
        c.advance(Duration::from_secs(60));
        assert!(c.listener().events.is_empty());
        assert_eq!(c.session(PlayerId::SOLO).unwrap().variant(), None);
    }

    #[test]
    fn test_replay_single_needs_difficulty() {
        let mut c = controller();
        assert_eq!(c.replay(), Err(DrillError::NoActiveGame));

        c.select_difficulty("easy").unwrap();
        assert_eq!(c.replay(), Err(DrillError::AlreadyStarted));

        c.request_restart();
        c.replay().unwrap();
        assert_eq!(
            c.listener().last_question(PlayerId::SOLO),
            Some(&Question::choose_difficulty())
        );
        assert!(c.scheduler().is_empty());
    }

    #[test]
    fn test_starting_again_replaces_game() {
        let mut c = controller();
        c.request_start(StartRequest::Race).unwrap();
        c.advance(Duration::from_secs(2));

        c.select_difficulty("simple").unwrap();
        assert!(c.race().is_none());
        assert_eq!(c.scheduler().len(), 1);

        c.listener_mut().drain();
        c.advance(Duration::from_secs(1));
        let ticks = c.listener().count(|e| matches!(e, UiEvent::TimeChanged { .. }));
        assert_eq!(ticks, 1);
        assert_eq!(c.session(PlayerId::SOLO).unwrap().time_remaining(), 9);
    }
}
