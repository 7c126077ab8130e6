use crate::RandomSource;
use serde::{Deserialize, Serialize};

pub type Digit = u8;

pub const DIGITS: [Digit; 10] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9];

/// In-place Fisher-Yates: walk from the last index down to 1 and swap each
/// element with a uniformly chosen one at or before it.
pub fn fisher_yates<T, R: RandomSource + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.index_below(i + 1);
        items.swap(i, j);
    }
}

/// A uniformly shuffled copy of 0..=9.
pub fn shuffled_digits<R: RandomSource + ?Sized>(rng: &mut R) -> Vec<Digit> {
    let mut digits = DIGITS.to_vec();
    fisher_yates(&mut digits, rng);
    digits
}

/// The digits on the table for one turn. Slots keep their position when a
/// digit is taken so indices stay stable for the rest of the turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitPool {
    slots: Vec<Option<Digit>>,
}

impl DigitPool {
    pub fn fresh<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        Self::from_digits(shuffled_digits(rng))
    }

    pub fn from_digits(digits: impl IntoIterator<Item = Digit>) -> Self {
        Self {
            slots: digits.into_iter().map(Some).collect(),
        }
    }

    pub fn slots(&self) -> &[Option<Digit>] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Digit> {
        self.slots.get(index).copied().flatten()
    }

    /// Digits still on the table, in slot order.
    pub fn available(&self) -> Vec<Digit> {
        self.slots.iter().flatten().copied().collect()
    }

    pub fn available_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Removes the digit at `index` from play.
    pub fn take(&mut self, index: usize) -> Option<Digit> {
        self.slots.get_mut(index).and_then(Option::take)
    }

    pub fn position_of(&self, digit: Digit) -> Option<usize> {
        self.slots.iter().position(|slot| *slot == Some(digit))
    }
}
