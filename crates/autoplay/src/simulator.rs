use crate::{
    AutoMove, AutoplayConfig, AutoplayError, MoveRecord, RoundRecord, RoundStatus,
    SimulationReport, Strategy, SummaryStats,
};
use digitduel_core::{
    search, Event, Game, LevelTable, ManualScheduler, Mover, RandomSource, RngState,
    SearchOptions,
};
use std::time::Instant;

/// Seed offset for the scripted player's own random source, so the player
/// and the game never share a stream.
const PLAYER_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug)]
pub struct Simulator {
    pub game: Game<RngState, ManualScheduler>,
    pub strategy: Strategy,
    player_rng: RngState,
}

impl Simulator {
    pub fn new(levels: LevelTable, config: &AutoplayConfig) -> Self {
        let mut game = Game::new(
            levels,
            RngState::from_seed(config.seed),
            ManualScheduler::new(),
        );
        if config.start_level != 1 {
            game.jump_to_level(config.start_level);
        }
        Self {
            game,
            strategy: config.strategy,
            player_rng: RngState::from_seed(config.seed ^ PLAYER_SEED_SALT),
        }
    }

    /// The move the strategy would make now, or `None` off turn.
    pub fn choose_move(&mut self) -> Option<AutoMove> {
        let round = self.game.round();
        if !round.awaiting_player_input() {
            return None;
        }
        let count = round.level.digit_count;
        if self.strategy == Strategy::Solver {
            let play = search(
                &round.pool.available(),
                round.scores.budget(Mover::Player),
                &round.level.operators,
                SearchOptions::playable(count),
            );
            if let Some(play) = play {
                let mut pool = round.pool.clone();
                let indices = play
                    .digits
                    .iter()
                    .filter_map(|digit| {
                        let index = pool.position_of(*digit)?;
                        pool.take(index);
                        Some(index)
                    })
                    .collect();
                return Some(AutoMove {
                    indices,
                    operator: play.operator,
                });
            }
        }
        Some(self.random_move())
    }

    fn random_move(&mut self) -> AutoMove {
        let round = self.game.round();
        let mut open: Vec<usize> = round
            .pool
            .slots()
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.map(|_| idx))
            .collect();
        let mut indices = Vec::with_capacity(round.level.digit_count);
        for _ in 0..round.level.digit_count {
            if open.is_empty() {
                break;
            }
            indices.push(open.remove(self.player_rng.index_below(open.len())));
        }
        let operators = &round.level.operators;
        let operator = operators[self.player_rng.index_below(operators.len())];
        AutoMove { indices, operator }
    }

    /// Enters the move and lets the session run until the player is up again
    /// or the round is over.
    pub fn apply(&mut self, action: &AutoMove) {
        self.game.choose_operator(action.operator);
        for &index in &action.indices {
            self.game.select_digit(index);
        }
        self.game.settle();
    }

    /// Plays the current round to the end, then sets up the next one.
    pub fn play_round(&mut self, round_no: u32, max_steps: u32) -> RoundRecord {
        let level = self.game.level();
        let target = self.game.round().scores.target;
        let mut moves = Vec::new();
        let mut turn = 0;
        let mut steps = 0;
        let mut status = RoundStatus::Finished;
        self.record_events(&mut moves, &mut turn);

        while !self.game.round().outcome.is_over() {
            if steps >= max_steps {
                status = RoundStatus::MaxSteps;
                break;
            }
            steps += 1;
            let Some(action) = self.choose_move() else {
                self.game.settle();
                continue;
            };
            tracing::debug!(round = round_no, action = %action.short_label(), "autoplay move");
            self.apply(&action);
            self.record_events(&mut moves, &mut turn);
        }

        let round = self.game.round();
        let record = RoundRecord {
            round: round_no,
            level,
            target,
            status,
            outcome: round.outcome,
            player: round.scores.player,
            ai: round.scores.ai,
            best_play: round.best_play.as_ref().map(|play| play.to_string()),
            moves,
        };
        self.game.next_round();
        record
    }

    fn record_events(&mut self, moves: &mut Vec<MoveRecord>, turn: &mut u32) {
        for event in self.game.drain_events() {
            if let Event::MoveScored {
                mover,
                digits,
                operator,
                value,
                score,
            } = event
            {
                *turn += 1;
                moves.push(MoveRecord {
                    turn: *turn,
                    mover,
                    digits,
                    operator,
                    value,
                    score_after: score,
                });
            }
        }
    }
}

/// Plays `config.rounds` rounds headlessly. The same seed and strategy always
/// give the same report, apart from wall time.
pub fn run_simulation(
    levels: LevelTable,
    config: &AutoplayConfig,
) -> Result<SimulationReport, AutoplayError> {
    if config.rounds == 0 {
        return Err(AutoplayError::Config("rounds must be at least 1".to_string()));
    }
    if config.max_steps == 0 {
        return Err(AutoplayError::Config("max_steps must be at least 1".to_string()));
    }
    if config.start_level == 0 || config.start_level > levels.max_level() {
        return Err(AutoplayError::Config(format!(
            "start level {} is outside 1..={}",
            config.start_level,
            levels.max_level()
        )));
    }

    let started_at = Instant::now();
    let mut sim = Simulator::new(levels, config);
    let mut rounds = Vec::with_capacity(config.rounds as usize);
    let mut summary = SummaryStats::default();

    for round_no in 1..=config.rounds {
        let record = sim.play_round(round_no, config.max_steps);
        summary.rounds += 1;
        summary.moves += record.moves.len() as u32;
        summary.highest_level = summary.highest_level.max(record.level);
        if record.status == RoundStatus::MaxSteps {
            summary.stalled += 1;
        } else if record.outcome.player_won() {
            summary.player_wins += 1;
        } else {
            summary.ai_wins += 1;
        }
        rounds.push(record);
    }
    summary.wall_time_ms = started_at.elapsed().as_millis() as u64;
    tracing::info!(
        seed = config.seed,
        strategy = %config.strategy,
        player_wins = summary.player_wins,
        ai_wins = summary.ai_wins,
        "simulation finished"
    );

    Ok(SimulationReport {
        seed: config.seed,
        strategy: config.strategy,
        rounds,
        summary,
    })
}
