use crate::{Digit, Operator};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Folds `operator` left to right over `digits`.
///
/// A single digit is returned as-is whatever the operator. For division, a
/// zero anywhere after the first digit yields `f64::INFINITY`, which callers
/// must treat as unplayable. An empty tuple evaluates to zero.
pub fn evaluate(digits: &[Digit], operator: Operator) -> f64 {
    let Some((first, rest)) = digits.split_first() else {
        return 0.0;
    };
    if operator == Operator::Divide && rest.contains(&0) {
        return f64::INFINITY;
    }
    rest.iter()
        .fold(f64::from(*first), |acc, digit| operator.apply(acc, f64::from(*digit)))
}

/// What a committed move is worth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MoveValue {
    Points(i64),
    Fraction(f64),
    DivideByZero,
}

impl MoveValue {
    /// Points the move scores, or `None` when it is illegal and counts as an
    /// overshoot.
    pub fn points(self) -> Option<i64> {
        match self {
            MoveValue::Points(points) => Some(points),
            MoveValue::Fraction(_) | MoveValue::DivideByZero => None,
        }
    }

    pub fn raw(self) -> f64 {
        match self {
            MoveValue::Points(points) => points as f64,
            MoveValue::Fraction(value) => value,
            MoveValue::DivideByZero => f64::INFINITY,
        }
    }
}

impl fmt::Display for MoveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveValue::Points(points) => write!(f, "{points}"),
            MoveValue::Fraction(raw) => write!(f, "{raw:.2}"),
            MoveValue::DivideByZero => f.write_str("∞"),
        }
    }
}

/// `digits` joined by the operator symbol, e.g. `7 ÷ 2`.
pub fn format_move(digits: &[Digit], operator: Operator) -> String {
    digits
        .iter()
        .map(|digit| digit.to_string())
        .collect::<Vec<_>>()
        .join(&format!(" {operator} "))
}

pub fn score_move(digits: &[Digit], operator: Operator) -> MoveValue {
    let value = evaluate(digits, operator);
    if value.is_infinite() {
        MoveValue::DivideByZero
    } else if value.fract() != 0.0 {
        MoveValue::Fraction(value)
    } else {
        MoveValue::Points(value as i64)
    }
}
