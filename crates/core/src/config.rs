use crate::Operator;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_DIGIT_COUNT: usize = 2;
pub const MAX_DIGIT_COUNT: usize = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("level table is empty")]
    EmptyTable,
    #[error("level table has {0} levels; at most 255 are supported")]
    TooManyLevels(usize),
    #[error("levels must be numbered from 1 without gaps: expected {expected}, found {found}")]
    LevelGap { expected: u8, found: u8 },
    #[error("level {0} allows no operators")]
    NoOperators(u8),
    #[error("level {level} lists operator {operator:?} twice")]
    DuplicateOperator { level: u8, operator: Operator },
    #[error("level {level} digit count {count} is outside 2..=3")]
    InvalidDigitCount { level: u8, count: usize },
    #[error("level {0} has a zero-second turn limit")]
    ZeroTimeLimit(u8),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub level: u8,
    pub operators: Vec<Operator>,
    pub digit_count: usize,
    #[serde(default)]
    pub turn_time_limit_secs: Option<u32>,
    pub title: String,
    pub color: String,
}

impl LevelConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.operators.is_empty() {
            return Err(ConfigError::NoOperators(self.level));
        }
        for (idx, operator) in self.operators.iter().enumerate() {
            if self.operators[..idx].contains(operator) {
                return Err(ConfigError::DuplicateOperator {
                    level: self.level,
                    operator: *operator,
                });
            }
        }
        if !(MIN_DIGIT_COUNT..=MAX_DIGIT_COUNT).contains(&self.digit_count) {
            return Err(ConfigError::InvalidDigitCount {
                level: self.level,
                count: self.digit_count,
            });
        }
        if self.turn_time_limit_secs == Some(0) {
            return Err(ConfigError::ZeroTimeLimit(self.level));
        }
        Ok(())
    }

    pub fn allows(&self, operator: Operator) -> bool {
        self.operators.contains(&operator)
    }

    /// The operator a selection starts with.
    pub fn default_operator(&self) -> Operator {
        self.operators.first().copied().unwrap_or(Operator::Add)
    }

    pub fn has_operator_choice(&self) -> bool {
        self.operators.len() > 1
    }
}

/// Read-only level table, numbered contiguously from 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelTable {
    levels: Vec<LevelConfig>,
}

impl LevelTable {
    pub fn new(mut levels: Vec<LevelConfig>) -> Result<Self, ConfigError> {
        if levels.is_empty() {
            return Err(ConfigError::EmptyTable);
        }
        if levels.len() > usize::from(u8::MAX) {
            return Err(ConfigError::TooManyLevels(levels.len()));
        }
        levels.sort_by_key(|level| level.level);
        for (idx, level) in levels.iter().enumerate() {
            let expected = idx as u8 + 1;
            if level.level != expected {
                return Err(ConfigError::LevelGap {
                    expected,
                    found: level.level,
                });
            }
            level.validate()?;
        }
        Ok(Self { levels })
    }

    pub fn builtin() -> Self {
        Self {
            levels: builtin_levels(),
        }
    }

    pub fn levels(&self) -> &[LevelConfig] {
        &self.levels
    }

    pub fn max_level(&self) -> u8 {
        self.levels.len() as u8
    }

    /// Config for `level`, clamped into the table's range.
    pub fn get(&self, level: u8) -> &LevelConfig {
        let idx = usize::from(level.clamp(1, self.max_level())) - 1;
        &self.levels[idx]
    }

    pub fn next_level(&self, level: u8) -> u8 {
        level.saturating_add(1).min(self.max_level())
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn level(
    level: u8,
    operators: &[Operator],
    digit_count: usize,
    turn_time_limit_secs: Option<u32>,
    title: &str,
    color: &str,
) -> LevelConfig {
    LevelConfig {
        level,
        operators: operators.to_vec(),
        digit_count,
        turn_time_limit_secs,
        title: title.to_string(),
        color: color.to_string(),
    }
}

pub fn builtin_levels() -> Vec<LevelConfig> {
    use Operator::*;
    vec![
        level(1, &[Add], 2, None, "Warm-up", "#34C759"),
        level(2, &[Add, Subtract], 2, None, "Give and Take", "#007AFF"),
        level(3, &[Add, Subtract], 3, None, "Triples", "#5856D6"),
        level(4, &[Add, Subtract, Multiply], 3, Some(30), "Multiplier", "#FF9500"),
        level(5, &Operator::ALL, 3, Some(20), "Full Toolkit", "#FF3B30"),
        level(6, &Operator::ALL, 3, Some(10), "Lightning", "#AF52DE"),
    ]
}
