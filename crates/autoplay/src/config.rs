use crate::error::AutoplayError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the scripted player picks its digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Closest legal play to the target without going over.
    Solver,
    /// Uniform slots and operator, like the AI opponent.
    Random,
}

impl Strategy {
    pub fn id(self) -> &'static str {
        match self {
            Strategy::Solver => "solver",
            Strategy::Random => "random",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Strategy {
    type Err = AutoplayError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "solver" | "best" => Ok(Strategy::Solver),
            "random" | "rand" => Ok(Strategy::Random),
            other => Err(AutoplayError::Config(format!(
                "unknown strategy '{other}' (expected solver or random)"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AutoplayConfig {
    pub seed: u64,
    pub rounds: u32,
    pub strategy: Strategy,
    /// Player-move cap per round; a round that hits it is recorded as stalled.
    pub max_steps: u32,
    pub start_level: u8,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            seed: 0xC0FFEE,
            rounds: 20,
            strategy: Strategy::Solver,
            max_steps: 200,
            start_level: 1,
        }
    }
}
