//! The three question archetypes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::DrillError;

/// Question archetype. Carried explicitly on every question and session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    /// `a × b = ( )`, pick the product from four options.
    Recognition,
    /// `( ) × ( ) = p`, fill in any valid factor pair.
    Construction,
    /// `( ) × f ≤ t`, give the largest value that fits.
    BoundedQuotient,
}

impl Variant {
    pub const ALL: [Variant; 3] = [
        Variant::Recognition,
        Variant::Construction,
        Variant::BoundedQuotient,
    ];

    /// Difficulty label shown on the selector.
    #[must_use]
    pub fn difficulty(self) -> &'static str {
        match self {
            Variant::Recognition => "easy",
            Variant::Construction => "simple",
            Variant::BoundedQuotient => "hard",
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Variant::Recognition => "recognition",
            Variant::Construction => "construction",
            Variant::BoundedQuotient => "bounded-quotient",
        }
    }

    /// Parse a difficulty label or variant name.
    ///
    /// # Errors
    ///
    /// Returns `DrillError::UnknownDifficulty` for anything else.
    pub fn from_difficulty(label: &str) -> Result<Self, DrillError> {
        let normalized = label.trim().to_lowercase();
        Variant::ALL
            .into_iter()
            .find(|v| v.difficulty() == normalized || v.name() == normalized)
            .ok_or_else(|| DrillError::UnknownDifficulty(label.to_string()))
    }
}

impl FromStr for Variant {
    type Err = DrillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::from_difficulty(s)
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_difficulty() {
        assert_eq!(Variant::from_difficulty("easy"), Ok(Variant::Recognition));
        assert_eq!(Variant::from_difficulty(" Simple "), Ok(Variant::Construction));
        assert_eq!(Variant::from_difficulty("hard"), Ok(Variant::BoundedQuotient));
        assert_eq!("bounded-quotient".parse::<Variant>(), Ok(Variant::BoundedQuotient));
        assert_eq!(
            Variant::from_difficulty(""),
            Err(DrillError::UnknownDifficulty(String::new()))
        );
    }
}
