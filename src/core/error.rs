//! Engine error type.
//!
//! All errors are local and recoverable: the player corrects the input or
//! the UI re-prompts. Nothing here is fatal.

use thiserror::Error;

use super::player::PlayerId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrillError {
    /// A required input slot is still empty.
    #[error("answer is incomplete: {missing} slot(s) still empty")]
    IncompleteInput { missing: usize },

    /// A question was requested before a variant was chosen.
    #[error("no difficulty selected")]
    InvalidVariantConfiguration,

    #[error("unknown difficulty `{0}`")]
    UnknownDifficulty(String),

    #[error("cannot read answer `{0}`")]
    MalformedAnswer(String),

    /// Feedback is showing or time is up; input resumes with the next question.
    #[error("input is locked until the next question")]
    InputLocked,

    #[error("no round is in progress")]
    NotInProgress,

    #[error("session already started")]
    AlreadyStarted,

    #[error("{0} is not part of this game")]
    NoSuchPlayer(PlayerId),

    #[error("no game is running")]
    NoActiveGame,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            DrillError::IncompleteInput { missing: 1 }.to_string(),
            "answer is incomplete: 1 slot(s) still empty"
        );
        assert_eq!(
            DrillError::NoSuchPlayer(PlayerId::new(2)).to_string(),
            "Player 3 is not part of this game"
        );
    }
}
