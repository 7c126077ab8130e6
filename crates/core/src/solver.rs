use crate::{format_move, ordered_selections, score_move, search_pool, Digit, Operator};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The digits and operator the solver judged best for a pool and budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestPlay {
    pub digits: Vec<Digit>,
    pub operator: Operator,
    pub result: i64,
}

impl fmt::Display for BestPlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {}",
            format_move(&self.digits, self.operator),
            self.result
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSizes {
    /// Every size from 1 through the limit.
    UpTo(usize),
    Exactly(usize),
}

impl SelectionSizes {
    fn range(self) -> std::ops::RangeInclusive<usize> {
        match self {
            SelectionSizes::UpTo(max) => 1..=max,
            SelectionSizes::Exactly(count) => count..=count,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub sizes: SelectionSizes,
    /// Search over `search_pool(pool)` instead of the pool itself.
    pub augment_zero: bool,
}

impl SearchOptions {
    /// The search behind the "what you should have played" explanation.
    pub fn explanation(max_digit_count: usize) -> Self {
        Self {
            sizes: SelectionSizes::UpTo(max_digit_count),
            augment_zero: true,
        }
    }

    /// Only plays that can actually be made from the live pool this turn.
    pub fn playable(digit_count: usize) -> Self {
        Self {
            sizes: SelectionSizes::Exactly(digit_count),
            augment_zero: false,
        }
    }
}

/// Closest play to `budget` without going over, searched across every
/// selection size up to `max_digit_count` over the zero-augmented pool.
pub fn find_best_combination(
    pool: &[Digit],
    budget: i64,
    operators: &[Operator],
    max_digit_count: usize,
) -> Option<BestPlay> {
    search(
        pool,
        budget,
        operators,
        SearchOptions::explanation(max_digit_count),
    )
}

/// Exhaustive search. Candidates are whole-number results at or under the
/// budget; the smallest `budget - result` wins and ties keep the first one
/// found (size ascending, then selection order, then operator order).
pub fn search(
    pool: &[Digit],
    budget: i64,
    operators: &[Operator],
    options: SearchOptions,
) -> Option<BestPlay> {
    let digits = if options.augment_zero {
        search_pool(pool)
    } else {
        pool.to_vec()
    };
    let mut best: Option<(i64, BestPlay)> = None;
    let mut evaluated = 0usize;

    'sizes: for size in options.sizes.range() {
        for selection in ordered_selections(&digits, size) {
            for &operator in operators {
                evaluated += 1;
                let Some(result) = score_move(&selection, operator).points() else {
                    continue;
                };
                if result > budget {
                    continue;
                }
                let diff = budget - result;
                if best.as_ref().map_or(true, |(best_diff, _)| diff < *best_diff) {
                    best = Some((
                        diff,
                        BestPlay {
                            digits: selection.clone(),
                            operator,
                            result,
                        },
                    ));
                    if diff == 0 {
                        break 'sizes;
                    }
                }
            }
        }
    }

    tracing::debug!(
        pool = ?pool,
        budget,
        evaluated,
        found = best.is_some(),
        "best play search"
    );
    best.map(|(_, play)| play)
}
