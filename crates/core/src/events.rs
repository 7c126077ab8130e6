use crate::{BestPlay, Digit, MoveValue, Mover, Operator, RoundOutcome};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    RoundStarted {
        level: u8,
        target: i64,
        digit_count: usize,
        time_limit: Option<u32>,
    },
    DigitSelected { digit: Digit, selected: usize },
    OperatorChosen { operator: Operator },
    MoveScored {
        mover: Mover,
        digits: Vec<Digit>,
        operator: Operator,
        value: MoveValue,
        score: i64,
    },
    TurnPassed { to: Mover },
    TimerTicked { seconds_left: u32 },
    RoundEnded {
        outcome: RoundOutcome,
        player: i64,
        ai: i64,
        target: i64,
        best_play: Option<BestPlay>,
    },
    LevelAdvanced { from: u8, to: u8 },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }
}
