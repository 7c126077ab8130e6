use crate::{
    BestPlay, Deferred, Event, EventBus, LevelConfig, LevelTable, ManualScheduler, Mover,
    Operator, RandomSource, RngState, RoundOutcome, RoundState, Scheduler, ScoreState, TaskId,
    Transition,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const SCORE_DELAY: Duration = Duration::from_millis(500);
pub const AI_DELAY: Duration = Duration::from_millis(1000);
pub const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Pause between a full selection and its scoring.
    pub score_delay: Duration,
    /// Pause before the AI moves.
    pub ai_delay: Duration,
    pub tick: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            score_delay: SCORE_DELAY,
            ai_delay: AI_DELAY,
            tick: TICK,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    pub level: u8,
    pub outcome: RoundOutcome,
    pub scores: ScoreState,
    pub best_play: Option<BestPlay>,
}

/// A play session: the current round plus everything that drives it. Player
/// input, deferred scoring, the AI's move and the countdown all go through
/// here and into the round's transitions.
#[derive(Debug)]
pub struct Game<R = RngState, S = ManualScheduler> {
    levels: LevelTable,
    level: u8,
    rng: R,
    scheduler: S,
    timing: Timing,
    round: RoundState,
    events: EventBus,
    timer: Option<TaskId>,
    last_result: Option<RoundResult>,
    rounds_played: u32,
}

impl<R: RandomSource, S: Scheduler> Game<R, S> {
    pub fn new(levels: LevelTable, rng: R, scheduler: S) -> Self {
        Self::with_timing(levels, rng, scheduler, Timing::default())
    }

    pub fn with_timing(levels: LevelTable, mut rng: R, scheduler: S, timing: Timing) -> Self {
        let round = RoundState::start(levels.get(1), &mut rng);
        let mut game = Self {
            levels,
            level: 1,
            rng,
            scheduler,
            timing,
            round,
            events: EventBus::default(),
            timer: None,
            last_result: None,
            rounds_played: 0,
        };
        game.open_round();
        game
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn level_config(&self) -> &LevelConfig {
        self.levels.get(self.level)
    }

    pub fn levels(&self) -> &LevelTable {
        &self.levels
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn last_result(&self) -> Option<&RoundResult> {
        self.last_result.as_ref()
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        self.events.drain().collect()
    }

    /// Starts a fresh round at the current level, dropping anything still
    /// scheduled from the previous one.
    pub fn start_round(&mut self) {
        self.round = RoundState::start(self.levels.get(self.level), &mut self.rng);
        self.open_round();
    }

    /// Moves up a level after a player win, then starts the next round.
    pub fn next_round(&mut self) {
        if self.round.outcome.player_won() {
            let from = self.level;
            self.level = self.levels.next_level(from);
            if self.level != from {
                tracing::info!(from, to = self.level, "level advanced");
                self.events.push(Event::LevelAdvanced {
                    from,
                    to: self.level,
                });
            }
        }
        self.start_round();
    }

    pub fn jump_to_level(&mut self, level: u8) {
        self.level = self.levels.get(level).level;
        self.start_round();
    }

    pub fn select_digit(&mut self, pool_index: usize) {
        let before = self.round.selection.digits.len();
        let next = self.round.select_digit(pool_index);
        if next.selection.digits.len() == before {
            return;
        }
        self.round = next;
        if let Some(&digit) = self.round.selection.digits.last() {
            self.events.push(Event::DigitSelected {
                digit,
                selected: self.round.selection.digits.len(),
            });
        }
        if self.round.selection_complete() {
            self.scheduler
                .after(self.timing.score_delay, Deferred::ScoreSelection);
        }
    }

    pub fn choose_operator(&mut self, operator: Operator) {
        let next = self.round.choose_operator(operator);
        if next.selection.operator != self.round.selection.operator {
            self.events.push(Event::OperatorChosen { operator });
        }
        self.round = next;
    }

    /// Lets `elapsed` pass, running every task that falls due in order.
    pub fn advance(&mut self, elapsed: Duration) {
        let deadline = self.scheduler.now() + elapsed;
        while let Some(task) = self.scheduler.pop_due(deadline) {
            self.run_task(task);
        }
        self.scheduler.advance_to(deadline);
    }

    /// Runs everything pending, however far off. Stops once the round is
    /// over or the player has to act.
    pub fn settle(&mut self) {
        while !self.round.outcome.is_over() && !self.round.awaiting_player_input() {
            let Some(task) = self.scheduler.pop_due(Duration::MAX) else {
                break;
            };
            self.run_task(task);
        }
    }

    fn run_task(&mut self, task: Deferred) {
        match task {
            Deferred::ScoreSelection => {
                let operator = self.round.selection.operator;
                let transition = self.round.commit_selection(operator, &mut self.rng);
                self.apply(transition, true);
            }
            Deferred::AiTurn => {
                let transition = self.round.run_ai_turn(&mut self.rng);
                self.apply(transition, true);
            }
            Deferred::TimerTick => {
                self.timer = None;
                let transition = self.round.on_timer_tick();
                if transition.state.time_left != self.round.time_left {
                    if let Some(seconds_left) = transition.state.time_left {
                        self.events.push(Event::TimerTicked { seconds_left });
                    }
                }
                self.apply(transition, false);
                if !self.round.outcome.is_over() {
                    self.arm_timer();
                }
            }
        }
    }

    fn apply(&mut self, transition: Transition, moved: bool) {
        let previous = self.round.active;
        self.round = transition.state;
        if moved {
            if let Some(played) = self.round.last_move.clone() {
                self.events.push(Event::MoveScored {
                    score: self.round.scores.of(played.mover),
                    mover: played.mover,
                    digits: played.digits,
                    operator: played.operator,
                    value: played.value,
                });
            }
        }
        if transition.outcome.is_over() {
            self.close_round(transition.outcome, transition.best_play);
            return;
        }
        if self.round.active != previous {
            self.events.push(Event::TurnPassed {
                to: self.round.active,
            });
            match self.round.active {
                Mover::Ai => {
                    self.scheduler.after(self.timing.ai_delay, Deferred::AiTurn);
                }
                Mover::Player => self.arm_timer(),
            }
        }
    }

    fn open_round(&mut self) {
        self.scheduler.cancel_all();
        self.timer = None;
        self.arm_timer();
        self.events.push(Event::RoundStarted {
            level: self.level,
            target: self.round.scores.target,
            digit_count: self.round.level.digit_count,
            time_limit: self.round.level.turn_time_limit_secs,
        });
    }

    fn arm_timer(&mut self) {
        if self.round.level.turn_time_limit_secs.is_none() {
            return;
        }
        if let Some(id) = self.timer.take() {
            self.scheduler.cancel(id);
        }
        self.timer = Some(self.scheduler.after(self.timing.tick, Deferred::TimerTick));
    }

    fn close_round(&mut self, outcome: RoundOutcome, best_play: Option<BestPlay>) {
        self.scheduler.cancel_all();
        self.timer = None;
        self.rounds_played += 1;
        let result = RoundResult {
            level: self.level,
            outcome,
            scores: self.round.scores,
            best_play: best_play.clone(),
        };
        self.events.push(Event::RoundEnded {
            outcome,
            player: result.scores.player,
            ai: result.scores.ai,
            target: result.scores.target,
            best_play,
        });
        self.last_result = Some(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DigitPool, SequenceRng};

    fn game(level: u8) -> Game<SequenceRng, ManualScheduler> {
        let mut game = Game::new(
            LevelTable::builtin(),
            SequenceRng::zeros(),
            ManualScheduler::new(),
        );
        if level != 1 {
            game.jump_to_level(level);
        }
        game.drain_events();
        game
    }

    fn rig(game: &mut Game<SequenceRng, ManualScheduler>, pool: &[u8], target: i64, player: i64) {
        game.round.pool = DigitPool::from_digits(pool.iter().copied());
        game.round.turn_pool = pool.to_vec();
        game.round.scores = ScoreState {
            player,
            ai: 0,
            target,
        };
    }

    #[test]
    fn scoring_waits_for_the_delay() {
        let mut game = game(1);
        rig(&mut game, &[3, 2, 9], 65, 60);
        game.select_digit(0);
        game.select_digit(1);
        game.advance(Duration::from_millis(499));
        assert_eq!(game.round().outcome, RoundOutcome::InProgress);
        game.advance(Duration::from_millis(1));
        assert_eq!(game.round().outcome, RoundOutcome::PlayerReachedTarget);
        let result = game.last_result().expect("result");
        assert!(result.best_play.is_none());
        assert_eq!(game.scheduler().pending(), 0);
    }

    #[test]
    fn ai_moves_after_its_delay() {
        let mut game = game(1);
        rig(&mut game, &[3, 2, 9], 65, 0);
        game.select_digit(0);
        game.select_digit(1);
        game.advance(Duration::from_millis(500));
        assert_eq!(game.round().active, Mover::Ai);
        assert!(game.scheduler().is_scheduled(Deferred::AiTurn));
        game.advance(Duration::from_millis(999));
        assert_eq!(game.round().active, Mover::Ai);
        game.advance(Duration::from_millis(1));
        assert_eq!(game.round().active, Mover::Player);
        let events = game.drain_events();
        let moves = events
            .iter()
            .filter(|event| matches!(event, Event::MoveScored { .. }))
            .count();
        assert_eq!(moves, 2);
    }

    #[test]
    fn player_win_advances_level_and_caps() {
        let mut game = game(5);
        rig(&mut game, &[3, 2, 1, 9], 65, 59);
        game.select_digit(0);
        game.select_digit(1);
        game.select_digit(2);
        game.settle();
        assert_eq!(game.round().outcome, RoundOutcome::PlayerReachedTarget);
        game.next_round();
        assert_eq!(game.level(), 6);
        assert_eq!(game.round().level.turn_time_limit_secs, Some(10));
        assert!(game
            .drain_events()
            .contains(&Event::LevelAdvanced { from: 5, to: 6 }));

        rig(&mut game, &[3, 2, 1, 9], 65, 59);
        game.select_digit(0);
        game.select_digit(1);
        game.select_digit(2);
        game.settle();
        game.next_round();
        assert_eq!(game.level(), 6);
    }

    #[test]
    fn loss_keeps_level() {
        let mut game = game(2);
        rig(&mut game, &[9, 8, 1], 65, 60);
        game.select_digit(0);
        game.select_digit(1);
        game.settle();
        assert_eq!(game.round().outcome, RoundOutcome::PlayerOverTarget);
        game.next_round();
        assert_eq!(game.level(), 2);
        assert_eq!(game.round().scores.player, 0);
        assert!(game.round().best_play.is_none());
    }

    #[test]
    fn timer_expires_and_new_round_cancels_it() {
        let mut game = game(6);
        rig(&mut game, &[1, 2, 3, 4], 65, 60);
        game.advance(Duration::from_secs(9));
        assert_eq!(game.round().time_left, Some(1));
        game.advance(Duration::from_secs(1));
        assert_eq!(game.round().outcome, RoundOutcome::TimeExpired);
        assert!(game.last_result().and_then(|r| r.best_play.as_ref()).is_some());
        assert_eq!(game.scheduler().pending(), 0);

        game.next_round();
        assert_eq!(game.scheduler().pending(), 1);
        game.start_round();
        assert_eq!(game.scheduler().pending(), 1);
        assert_eq!(game.round().time_left, Some(10));
    }

    #[test]
    fn timer_pauses_while_move_is_scored() {
        let mut game = game(4);
        rig(&mut game, &[1, 2, 3, 4], 65, 0);
        game.select_digit(0);
        game.select_digit(1);
        game.select_digit(2);
        // Tick at 1s lands after scoring at 0.5s; the AI is then to move.
        game.advance(Duration::from_millis(1200));
        assert_eq!(game.round().active, Mover::Ai);
        assert_eq!(game.round().time_left, Some(30));
        game.advance(Duration::from_millis(300));
        assert_eq!(game.round().active, Mover::Player);
        assert_eq!(game.round().time_left, Some(30));
    }

    #[test]
    fn operator_choice_emits_event_only_on_change() {
        let mut game = game(2);
        game.choose_operator(Operator::Add);
        game.choose_operator(Operator::Subtract);
        game.choose_operator(Operator::Divide);
        assert_eq!(
            game.drain_events(),
            vec![Event::OperatorChosen {
                operator: Operator::Subtract
            }]
        );
    }

    #[test]
    fn untimed_levels_schedule_nothing() {
        let game = game(1);
        assert_eq!(game.scheduler().pending(), 0);
        assert_eq!(game.round().time_left, None);
    }
}
