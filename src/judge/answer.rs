//! Submitted answers.

use serde::{Deserialize, Serialize};

use crate::core::DrillError;
use crate::question::format_pair;

/// What the player submitted.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Answer {
    /// Text of a chosen option, or a typed answer such as `"3 × 4"`.
    Selection(String),
    /// Two keypad slots, in the order entered.
    Pair(u32, u32),
    /// One keypad slot.
    Single(u32),
}

impl Answer {
    /// Read the answer as a single number, if it is one.
    #[must_use]
    pub fn as_number(&self) -> Option<u32> {
        match self {
            Answer::Single(v) => Some(*v),
            Answer::Selection(text) => text.trim().parse().ok(),
            Answer::Pair(..) => None,
        }
    }

    /// Read the answer as a factor pair, if it is one.
    #[must_use]
    pub fn as_pair(&self) -> Option<(u32, u32)> {
        match self {
            Answer::Pair(x, y) => Some((*x, *y)),
            Answer::Selection(text) => parse_pair(text).ok(),
            Answer::Single(_) => None,
        }
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Answer::Selection(text) => f.write_str(text),
            Answer::Pair(x, y) => f.write_str(&format_pair(*x, *y)),
            Answer::Single(v) => write!(f, "{v}"),
        }
    }
}

/// Parse `"x × y"`. Also accepts `x`, `X` and `*` as the operator.
///
/// # Errors
///
/// Returns `DrillError::MalformedAnswer` unless the text is exactly two
/// unsigned integers around one operator.
pub fn parse_pair(text: &str) -> Result<(u32, u32), DrillError> {
    let malformed = || DrillError::MalformedAnswer(text.to_string());

    let mut parts = text.split(['×', 'x', 'X', '*']);
    let (Some(left), Some(right), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(malformed());
    };

    let x = left.trim().parse().map_err(|_| malformed())?;
    let y = right.trim().parse().map_err(|_| malformed())?;
    Ok((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair() {
        assert_eq!(parse_pair("3 × 4"), Ok((3, 4)));
        assert_eq!(parse_pair("4x3"), Ok((4, 3)));
        assert_eq!(parse_pair(" 2 * 6 "), Ok((2, 6)));
        assert!(parse_pair("12").is_err());
        assert!(parse_pair("1 × 2 × 3").is_err());
        assert!(parse_pair("a × 2").is_err());
        assert!(parse_pair("-1 × 2").is_err());
    }

    #[test]
    fn test_views() {
        assert_eq!(Answer::Selection("12".into()).as_number(), Some(12));
        assert_eq!(Answer::Selection("3 × 4".into()).as_pair(), Some((3, 4)));
        assert_eq!(Answer::Single(7).as_pair(), None);
        assert_eq!(Answer::Pair(4, 3).to_string(), "4 × 3");
    }
}
