//! `drill-sim [seed]`: play a two-player race between scripted bots.
//!
//! Each bot has an accuracy and a thinking time drawn from the seed. The
//! virtual clock runs in 100ms steps until the race ends. Set `RUST_LOG`
//! to `debug` to see every question and answer.

use std::process::ExitCode;
use std::time::Duration;

use log::{error, info};
use times_table_drill::{
    Controller, DrillConfig, DrillRng, EventLog, MatchResult, PlayerId, PlayerMap, SessionPhase, StartRequest,
};

const STEP: Duration = Duration::from_millis(100);
const MAX_VIRTUAL_TIME: Duration = Duration::from_secs(15 * 60);

#[derive(Clone, Debug)]
struct Bot {
    accuracy: f64,
    think: Duration,
    /// Round the bot is looking at and when it first saw it.
    seen: Option<(u32, Duration)>,
}

impl Bot {
    fn random(rng: &mut DrillRng) -> Self {
        let accuracy = f64::from(rng.gen_inclusive(50, 95)) / 100.0;
        let think = Duration::from_millis(rng.gen_inclusive(1_500, 8_000) as u64);
        Self { accuracy, think, seen: None }
    }

    /// Whether the bot has thought about `round` long enough to answer.
    fn ready(&mut self, round: u32, now: Duration) -> bool {
        match self.seen {
            Some((seen_round, at)) if seen_round == round => now >= at + self.think,
            _ => {
                self.seen = Some((round, now));
                false
            }
        }
    }
}

fn wrong_answer(correct: &str) -> &'static str {
    if correct == "0" {
        "10"
    } else {
        "0"
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = match std::env::args().nth(1) {
        Some(arg) => match arg.parse::<u64>() {
            Ok(seed) => seed,
            Err(err) => {
                error!("invalid seed {arg:?}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => DrillRng::from_entropy().seed(),
    };
    info!("seed {seed}");

    let mut controller = match Controller::new(DrillConfig::default(), seed, EventLog::new()) {
        Ok(controller) => controller,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let mut bot_rng = DrillRng::new(seed).fork();
    let mut bots = PlayerMap::new(2, |player| {
        let bot = Bot::random(&mut bot_rng);
        info!("{player}: accuracy {:.0}%, thinks {:?}", bot.accuracy * 100.0, bot.think);
        bot
    });

    if let Err(err) = controller.request_start(StartRequest::Race) {
        error!("could not start race: {err}");
        return ExitCode::FAILURE;
    }

    while controller.now() < MAX_VIRTUAL_TIME {
        if controller.race().is_some_and(|race| race.is_over()) {
            break;
        }

        let now = controller.now();
        for player in PlayerId::all(2) {
            let Some(session) = controller.session(player) else {
                continue;
            };
            let SessionPhase::InProgress { round } = session.phase() else {
                continue;
            };
            if session.is_input_locked() || !bots[player].ready(round, now) {
                continue;
            }
            let Some(question) = session.current_question() else {
                continue;
            };

            let correct = question.correct_answer.clone();
            let roll = f64::from(bot_rng.gen_inclusive(0, 99)) / 100.0;
            let text = if roll < bots[player].accuracy {
                correct.as_str()
            } else {
                wrong_answer(&correct)
            };
            if let Err(err) = controller.submit_selection(player, text) {
                error!("{player} could not answer: {err}");
            }
        }

        controller.advance(STEP);
    }

    match controller.race().and_then(|race| race.outcome()) {
        Some(outcome) => {
            let scores: Vec<String> = outcome
                .final_scores
                .iter()
                .map(|(player, score)| format!("{player}: {score}"))
                .collect();
            match outcome.result {
                MatchResult::Winner(player) => info!("{player} wins ({})", scores.join(", ")),
                MatchResult::Draw => info!("draw ({})", scores.join(", ")),
            }
            ExitCode::SUCCESS
        }
        None => {
            error!("race did not finish within {MAX_VIRTUAL_TIME:?}");
            ExitCode::FAILURE
        }
    }
}
