//! Race results.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, PlayerMap};

/// Result of a completed race.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    Winner(PlayerId),
    Draw,
}

impl MatchResult {
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, MatchResult::Winner(p) if *p == player)
    }
}

/// Result plus the final score of every player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub result: MatchResult,
    pub final_scores: PlayerMap<u32>,
    /// True when a player hit the threshold; false when the banks ran out.
    pub by_threshold: bool,
}

/// Decide a race from the current state.
///
/// Returns `None` while the race continues: nobody has reached
/// `winning_progress` and at least one player still has rounds to play.
#[must_use]
pub fn decide(
    progress: &PlayerMap<u32>,
    scores: &PlayerMap<u32>,
    finished: &PlayerMap<bool>,
    winning_progress: u32,
) -> Option<MatchOutcome> {
    if let Some((winner, _)) = progress.iter().find(|(_, &p)| p >= winning_progress) {
        return Some(MatchOutcome {
            result: MatchResult::Winner(winner),
            final_scores: scores.clone(),
            by_threshold: true,
        });
    }

    if !finished.iter().all(|(_, &done)| done) {
        return None;
    }

    let best = scores.iter().map(|(_, &s)| s).max()?;
    let mut leaders = scores.iter().filter(|(_, &s)| s == best).map(|(p, _)| p);
    let result = match (leaders.next(), leaders.next()) {
        (Some(only), None) => MatchResult::Winner(only),
        _ => MatchResult::Draw,
    };

    Some(MatchOutcome {
        result,
        final_scores: scores.clone(),
        by_threshold: false,
    })
}
