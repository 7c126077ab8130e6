use crate::{BestPlay, Digit, DigitPool, LevelConfig, MoveValue, Operator};
use serde::{Deserialize, Serialize};

pub const TARGET_MIN: i64 = 50;
pub const TARGET_MAX: i64 = 99;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Mover {
    Player,
    Ai,
}

impl Mover {
    pub fn opponent(self) -> Self {
        match self {
            Mover::Player => Mover::Ai,
            Mover::Ai => Mover::Player,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundOutcome {
    InProgress,
    PlayerReachedTarget,
    PlayerOverTarget,
    AiReachedTarget,
    AiOverTarget,
    TimeExpired,
}

impl RoundOutcome {
    pub fn is_over(self) -> bool {
        self != RoundOutcome::InProgress
    }

    /// The player reached the target or the AI went over it.
    pub fn player_won(self) -> bool {
        matches!(
            self,
            RoundOutcome::PlayerReachedTarget | RoundOutcome::AiOverTarget
        )
    }

    pub fn winner(self) -> Option<Mover> {
        match self {
            RoundOutcome::InProgress => None,
            RoundOutcome::PlayerReachedTarget | RoundOutcome::AiOverTarget => Some(Mover::Player),
            RoundOutcome::PlayerOverTarget
            | RoundOutcome::AiReachedTarget
            | RoundOutcome::TimeExpired => Some(Mover::Ai),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreState {
    pub player: i64,
    pub ai: i64,
    pub target: i64,
}

impl ScoreState {
    pub fn new(target: i64) -> Self {
        Self {
            player: 0,
            ai: 0,
            target,
        }
    }

    pub fn of(&self, mover: Mover) -> i64 {
        match mover {
            Mover::Player => self.player,
            Mover::Ai => self.ai,
        }
    }

    pub fn set(&mut self, mover: Mover, score: i64) {
        match mover {
            Mover::Player => self.player = score,
            Mover::Ai => self.ai = score,
        }
    }

    /// Points `mover` still needs.
    pub fn budget(&self, mover: Mover) -> i64 {
        self.target - self.of(mover)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TurnSelection {
    pub digits: Vec<Digit>,
    pub operator: Operator,
}

impl TurnSelection {
    pub fn new(operator: Operator) -> Self {
        Self {
            digits: Vec::new(),
            operator,
        }
    }
}

/// The most recent committed move, kept so front-ends can show what the AI
/// played after its pool has been replaced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayedMove {
    pub mover: Mover,
    pub digits: Vec<Digit>,
    pub operator: Operator,
    pub value: MoveValue,
}

/// Everything a round needs. Transitions never mutate a state in place; they
/// return the next one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoundState {
    pub level: LevelConfig,
    pub scores: ScoreState,
    pub pool: DigitPool,
    /// The pool as it was dealt at the start of the current turn.
    pub turn_pool: Vec<Digit>,
    pub active: Mover,
    pub selection: TurnSelection,
    /// Seconds left on the player's turn timer, when the level has one.
    pub time_left: Option<u32>,
    pub outcome: RoundOutcome,
    pub best_play: Option<BestPlay>,
    #[serde(default)]
    pub last_move: Option<PlayedMove>,
}

impl RoundState {
    pub fn is_player_turn(&self) -> bool {
        self.active == Mover::Player && !self.outcome.is_over()
    }

    pub fn selection_complete(&self) -> bool {
        self.selection.digits.len() >= self.level.digit_count
    }

    /// The player is picking digits and the turn timer, if any, is running.
    pub fn awaiting_player_input(&self) -> bool {
        self.is_player_turn() && !self.selection_complete()
    }
}

/// Result of a scoring step: the next state plus what the presentation layer
/// needs to report.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: RoundState,
    pub outcome: RoundOutcome,
    pub best_play: Option<BestPlay>,
}

impl Transition {
    pub(crate) fn unchanged(state: &RoundState) -> Self {
        Self {
            state: state.clone(),
            outcome: state.outcome,
            best_play: state.best_play.clone(),
        }
    }
}
