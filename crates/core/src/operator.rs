use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Operator::Add => "add",
            Operator::Subtract => "subtract",
            Operator::Multiply => "multiply",
            Operator::Divide => "divide",
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '×',
            Operator::Divide => '÷',
        }
    }

    pub(crate) fn apply(self, acc: f64, value: f64) -> f64 {
        match self {
            Operator::Add => acc + value,
            Operator::Subtract => acc - value,
            Operator::Multiply => acc * value,
            Operator::Divide => acc / value,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown operator '{0}'")]
pub struct ParseOperatorError(pub String);

impl FromStr for Operator {
    type Err = ParseOperatorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "+" | "add" | "plus" => Ok(Operator::Add),
            "-" | "sub" | "subtract" | "minus" => Ok(Operator::Subtract),
            "*" | "x" | "×" | "mul" | "multiply" | "times" => Ok(Operator::Multiply),
            "/" | "÷" | "div" | "divide" => Ok(Operator::Divide),
            other => Err(ParseOperatorError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! parse_case {
        ($name:ident, $input:expr, $expected:expr) => {
            #[test]
            fn $name() {
                assert_eq!($input.parse::<Operator>(), Ok($expected));
            }
        };
    }

    parse_case!(parse_plus_sign, "+", Operator::Add);
    parse_case!(parse_add_word, "Add", Operator::Add);
    parse_case!(parse_minus_sign, "-", Operator::Subtract);
    parse_case!(parse_times_letter, "x", Operator::Multiply);
    parse_case!(parse_times_sign, "×", Operator::Multiply);
    parse_case!(parse_star, "*", Operator::Multiply);
    parse_case!(parse_slash, " / ", Operator::Divide);
    parse_case!(parse_obelus, "÷", Operator::Divide);

    #[test]
    fn rejects_unknown_symbol() {
        let err = "^".parse::<Operator>().expect_err("must fail");
        assert_eq!(err, ParseOperatorError("^".to_string()));
        assert_eq!(err.to_string(), "unknown operator '^'");
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&Operator::Subtract).expect("serialize");
        assert_eq!(json, "\"subtract\"");
    }
}
