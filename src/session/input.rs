//! Keypad input in progress.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::DrillError;
use crate::judge::Answer;

/// The player's partially-entered answer: zero, one or two digit slots.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PendingInput {
    slots: SmallVec<[Option<u32>; 2]>,
}

impl PendingInput {
    /// Empty input with `slot_count` blank slots.
    #[must_use]
    pub fn new(slot_count: usize) -> Self {
        Self {
            slots: std::iter::repeat(None).take(slot_count).collect(),
        }
    }

    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn slots(&self) -> &[Option<u32>] {
        &self.slots
    }

    /// Number of slots still blank.
    #[must_use]
    pub fn missing(&self) -> usize {
        self.slots.iter().filter(|s| s.is_none()).count()
    }

    /// Put `digit` into the first blank slot. Returns false when every slot
    /// is filled or the digit is not 0-9.
    pub fn press_digit(&mut self, digit: u32) -> bool {
        if digit > 9 {
            return false;
        }
        match self.slots.iter_mut().find(|s| s.is_none()) {
            Some(slot) => {
                *slot = Some(digit);
                true
            }
            None => false,
        }
    }

    /// Clear the last filled slot. Returns false when nothing was filled.
    pub fn delete(&mut self) -> bool {
        match self.slots.iter_mut().rev().find(|s| s.is_some()) {
            Some(slot) => {
                *slot = None;
                true
            }
            None => false,
        }
    }

    /// Turn filled slots into an answer.
    ///
    /// # Errors
    ///
    /// `IncompleteInput` if a slot is blank, `MalformedAnswer` if the
    /// question takes no keypad input.
    pub fn to_answer(&self) -> Result<Answer, DrillError> {
        let missing = self.missing();
        if missing > 0 {
            return Err(DrillError::IncompleteInput { missing });
        }
        match self.slots.as_slice() {
            [Some(value)] => Ok(Answer::Single(*value)),
            [Some(x), Some(y)] => Ok(Answer::Pair(*x, *y)),
            _ => Err(DrillError::MalformedAnswer(
                "this question is answered by selection".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_and_delete() {
        let mut input = PendingInput::new(2);
        assert_eq!(input.missing(), 2);

        assert!(input.press_digit(4));
        assert_eq!(input.slots(), &[Some(4), None]);
        assert!(input.press_digit(3));
        assert!(!input.press_digit(1));
        assert_eq!(input.to_answer(), Ok(Answer::Pair(4, 3)));

        assert!(input.delete());
        assert_eq!(input.slots(), &[Some(4), None]);
        assert_eq!(input.to_answer(), Err(DrillError::IncompleteInput { missing: 1 }));

        assert!(input.delete());
        assert!(!input.delete());
    }

    #[test]
    fn test_single_slot() {
        let mut input = PendingInput::new(1);
        assert!(!input.press_digit(10));
        assert!(input.press_digit(0));
        assert_eq!(input.to_answer(), Ok(Answer::Single(0)));
    }

    #[test]
    fn test_no_slots() {
        let input = PendingInput::new(0);
        assert!(matches!(input.to_answer(), Err(DrillError::MalformedAnswer(_))));
    }
}
