use crate::{
    find_best_combination, score_move, BestPlay, Digit, DigitPool, LevelConfig, MoveValue, Mover,
    Operator, PlayedMove, RandomSource, RoundOutcome, RoundState, ScoreState, Transition,
    TurnSelection, TARGET_MAX, TARGET_MIN,
};

impl RoundState {
    /// Fresh round: new target, new pool, zero scores, player to move.
    pub fn start<R: RandomSource + ?Sized>(level: &LevelConfig, rng: &mut R) -> Self {
        let target = rng.in_range(TARGET_MIN, TARGET_MAX);
        let pool = DigitPool::fresh(rng);
        tracing::debug!(level = level.level, target, "round start");
        Self {
            level: level.clone(),
            scores: ScoreState::new(target),
            turn_pool: pool.available(),
            pool,
            active: Mover::Player,
            selection: TurnSelection::new(level.default_operator()),
            time_left: level.turn_time_limit_secs,
            outcome: RoundOutcome::InProgress,
            best_play: None,
            last_move: None,
        }
    }

    /// Adds the digit at `pool_index` to the player's selection. Out of turn,
    /// over-selection and empty slots are ignored.
    pub fn select_digit(&self, pool_index: usize) -> Self {
        if !self.awaiting_player_input() {
            return self.clone();
        }
        let mut next = self.clone();
        if let Some(digit) = next.pool.take(pool_index) {
            next.selection.digits.push(digit);
        }
        next
    }

    pub fn choose_operator(&self, operator: Operator) -> Self {
        if !self.awaiting_player_input() || !self.level.allows(operator) {
            return self.clone();
        }
        let mut next = self.clone();
        next.selection.operator = operator;
        next
    }

    /// Scores the player's completed selection with `operator`.
    pub fn commit_selection<R: RandomSource + ?Sized>(
        &self,
        operator: Operator,
        rng: &mut R,
    ) -> Transition {
        if !self.is_player_turn() || !self.selection_complete() || !self.level.allows(operator) {
            return Transition::unchanged(self);
        }
        let digits = self.selection.digits.clone();
        self.apply_move(Mover::Player, &digits, operator, rng)
    }

    /// One second off the player's clock. Running out ends the round exactly
    /// like an overshoot, explained against the digits still on the table.
    pub fn on_timer_tick(&self) -> Transition {
        let Some(left) = self.time_left else {
            return Transition::unchanged(self);
        };
        if !self.awaiting_player_input() {
            return Transition::unchanged(self);
        }
        let mut next = self.clone();
        let left = left.saturating_sub(1);
        next.time_left = Some(left);
        if left > 0 {
            return Transition {
                outcome: next.outcome,
                best_play: None,
                state: next,
            };
        }
        let best_play = self.explain(&self.pool.available());
        next.finish(RoundOutcome::TimeExpired, best_play)
    }

    /// The AI's whole move at once: random distinct digits from the live pool
    /// and a random allowed operator.
    pub fn run_ai_turn<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Transition {
        if self.outcome.is_over() || self.active != Mover::Ai {
            return Transition::unchanged(self);
        }
        let mut picker = self.pool.clone();
        let mut digits = Vec::with_capacity(self.level.digit_count);
        for _ in 0..self.level.digit_count {
            let open: Vec<usize> = picker
                .slots()
                .iter()
                .enumerate()
                .filter_map(|(idx, slot)| slot.map(|_| idx))
                .collect();
            if open.is_empty() {
                break;
            }
            let slot = open[rng.index_below(open.len())];
            if let Some(digit) = picker.take(slot) {
                digits.push(digit);
            }
        }
        let operator = match self.level.operators.len() {
            0 => self.level.default_operator(),
            len => self.level.operators[rng.index_below(len)],
        };
        let mut staged = self.clone();
        staged.pool = picker;
        staged.apply_move(Mover::Ai, &digits, operator, rng)
    }

    fn apply_move<R: RandomSource + ?Sized>(
        &self,
        mover: Mover,
        digits: &[Digit],
        operator: Operator,
        rng: &mut R,
    ) -> Transition {
        let value = score_move(digits, operator);
        let mut next = self.clone();
        next.last_move = Some(PlayedMove {
            mover,
            digits: digits.to_vec(),
            operator,
            value,
        });
        let before = self.scores.of(mover);
        let target = self.scores.target;
        let landed = value.points().map(|points| before + points);
        tracing::debug!(
            ?mover,
            ?digits,
            %operator,
            value = value.raw(),
            before,
            target,
            "move committed"
        );

        match landed {
            Some(score) if score == target => {
                next.scores.set(mover, score);
                let outcome = match mover {
                    Mover::Player => RoundOutcome::PlayerReachedTarget,
                    Mover::Ai => RoundOutcome::AiReachedTarget,
                };
                next.finish(outcome, None)
            }
            Some(score) if score < target => {
                next.scores.set(mover, score);
                next.pass_turn(rng);
                Transition {
                    outcome: RoundOutcome::InProgress,
                    best_play: None,
                    state: next,
                }
            }
            _ => next.overshoot(mover, value),
        }
    }

    fn overshoot(self, mover: Mover, value: MoveValue) -> Transition {
        match mover {
            Mover::Player => {
                tracing::debug!(value = value.raw(), "player over target");
                let best_play = self.explain(&self.turn_pool);
                self.finish(RoundOutcome::PlayerOverTarget, best_play)
            }
            Mover::Ai => self.finish(RoundOutcome::AiOverTarget, None),
        }
    }

    /// What the player could have played from `pool` with their pre-move
    /// budget.
    fn explain(&self, pool: &[Digit]) -> Option<BestPlay> {
        find_best_combination(
            pool,
            self.scores.budget(Mover::Player),
            &self.level.operators,
            self.level.digit_count,
        )
    }

    fn pass_turn<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        self.pool = DigitPool::fresh(rng);
        self.turn_pool = self.pool.available();
        self.active = self.active.opponent();
        self.selection = TurnSelection::new(self.level.default_operator());
        if self.active == Mover::Player {
            self.time_left = self.level.turn_time_limit_secs;
        }
    }

    fn finish(mut self, outcome: RoundOutcome, best_play: Option<BestPlay>) -> Transition {
        tracing::info!(
            ?outcome,
            player = self.scores.player,
            ai = self.scores.ai,
            target = self.scores.target,
            "round over"
        );
        self.outcome = outcome;
        self.best_play = best_play.clone();
        Transition {
            state: self,
            outcome,
            best_play,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LevelTable, RngState, SequenceRng};

    fn level(n: u8) -> LevelConfig {
        LevelTable::builtin().get(n).clone()
    }

    fn state_with(level_no: u8, pool: &[Digit], target: i64, player: i64) -> RoundState {
        let mut state = RoundState::start(&level(level_no), &mut SequenceRng::zeros());
        state.pool = DigitPool::from_digits(pool.iter().copied());
        state.turn_pool = pool.to_vec();
        state.scores = ScoreState {
            player,
            ai: 0,
            target,
        };
        state
    }

    fn pick(state: RoundState, digits: &[Digit]) -> RoundState {
        digits.iter().fold(state, |state, digit| {
            let idx = state.pool.position_of(*digit).expect("digit on table");
            state.select_digit(idx)
        })
    }

    #[test]
    fn start_resets_scores_and_draws_target_in_range() {
        let mut rng = RngState::from_seed(5);
        for _ in 0..200 {
            let state = RoundState::start(&level(1), &mut rng);
            assert_eq!(state.scores.player, 0);
            assert_eq!(state.scores.ai, 0);
            assert!((50..=99).contains(&state.scores.target));
            assert_eq!(state.pool.available_count(), 10);
            assert_eq!(state.active, Mover::Player);
            assert!(state.best_play.is_none());
        }
    }

    #[test]
    fn start_arms_timer_only_for_timed_levels() {
        let mut rng = SequenceRng::zeros();
        assert_eq!(RoundState::start(&level(1), &mut rng).time_left, None);
        assert_eq!(RoundState::start(&level(4), &mut rng).time_left, Some(30));
    }

    #[test]
    fn selection_stops_at_digit_count() {
        let state = state_with(1, &[1, 2, 3, 4], 80, 0);
        let state = state.select_digit(0).select_digit(0).select_digit(1);
        assert_eq!(state.selection.digits, vec![1, 2]);
        let full = state.select_digit(2);
        assert_eq!(full, state);
        assert_eq!(full.pool.available(), vec![3, 4]);
    }

    #[test]
    fn selection_ignored_out_of_turn() {
        let mut state = state_with(1, &[1, 2, 3], 80, 0);
        state.active = Mover::Ai;
        assert_eq!(state.select_digit(0), state);
    }

    #[test]
    fn operator_choice_respects_level() {
        let state = state_with(1, &[1, 2, 3], 80, 0);
        assert_eq!(
            state.choose_operator(Operator::Multiply).selection.operator,
            Operator::Add
        );
        let state = state_with(5, &[1, 2, 3], 80, 0);
        assert_eq!(
            state.choose_operator(Operator::Divide).selection.operator,
            Operator::Divide
        );
    }

    #[test]
    fn exact_hit_wins_without_explanation() {
        let state = pick(state_with(1, &[3, 2, 9, 4], 65, 60), &[3, 2]);
        let result = state.commit_selection(Operator::Add, &mut SequenceRng::zeros());
        assert_eq!(result.outcome, RoundOutcome::PlayerReachedTarget);
        assert!(result.best_play.is_none());
        assert_eq!(result.state.scores.player, 65);
    }

    #[test]
    fn overshoot_explains_against_pre_move_pool() {
        let state = pick(state_with(1, &[9, 2, 3, 7], 65, 60), &[9, 2]);
        let result = state.commit_selection(Operator::Add, &mut SequenceRng::zeros());
        assert_eq!(result.outcome, RoundOutcome::PlayerOverTarget);
        assert_eq!(result.state.scores.player, 60);
        let best = result.best_play.expect("explanation");
        assert!(best.result <= 5);
        // 2 + 3 uses digits that were on the table before the move.
        assert_eq!(best.digits, vec![2, 3]);
        assert_eq!(best.result, 5);
        assert_eq!(result.state.best_play, Some(best));
    }

    #[test]
    fn fractional_division_loses() {
        let state = pick(state_with(5, &[7, 2, 1, 4], 90, 10), &[7, 2, 1]);
        let result = state.commit_selection(Operator::Divide, &mut SequenceRng::zeros());
        assert_eq!(result.outcome, RoundOutcome::PlayerOverTarget);
        assert!(result.best_play.is_some());
    }

    #[test]
    fn division_by_zero_loses() {
        let state = pick(state_with(5, &[7, 0, 1, 4], 90, 10), &[7, 0, 1]);
        let result = state.commit_selection(Operator::Divide, &mut SequenceRng::zeros());
        assert_eq!(result.outcome, RoundOutcome::PlayerOverTarget);
    }

    #[test]
    fn commit_needs_full_selection_and_allowed_operator() {
        let state = pick(state_with(1, &[3, 2, 9], 65, 0), &[3]);
        let result = state.commit_selection(Operator::Add, &mut SequenceRng::zeros());
        assert_eq!(result.outcome, RoundOutcome::InProgress);
        assert_eq!(result.state, state);

        let state = pick(state_with(1, &[3, 2, 9], 65, 0), &[3, 2]);
        let result = state.commit_selection(Operator::Multiply, &mut SequenceRng::zeros());
        assert_eq!(result.state, state);
    }

    #[test]
    fn regular_move_passes_turn_with_fresh_pool() {
        let state = pick(state_with(1, &[3, 2, 9], 65, 10), &[3, 2]);
        let result = state.commit_selection(Operator::Add, &mut SequenceRng::zeros());
        assert_eq!(result.outcome, RoundOutcome::InProgress);
        let next = result.state;
        assert_eq!(next.scores.player, 15);
        assert_eq!(next.active, Mover::Ai);
        assert!(next.selection.digits.is_empty());
        assert_eq!(next.pool.available_count(), 10);
        assert_eq!(next.turn_pool, next.pool.available());
    }

    #[test]
    fn ai_turn_picks_from_live_pool() {
        let mut state = state_with(1, &[4, 5, 6], 65, 0);
        state.active = Mover::Ai;
        // Slot picks: index 1 of [4,5,6] then index 0 of [4,6].
        let result = state.run_ai_turn(&mut SequenceRng::new(vec![1, 0, 0]));
        assert_eq!(result.outcome, RoundOutcome::InProgress);
        assert_eq!(result.state.scores.ai, 9);
        assert_eq!(result.state.active, Mover::Player);
    }

    #[test]
    fn ai_overshoot_is_a_player_win_without_explanation() {
        let mut state = state_with(1, &[9, 8], 65, 0);
        state.active = Mover::Ai;
        state.scores.ai = 60;
        let result = state.run_ai_turn(&mut SequenceRng::zeros());
        assert_eq!(result.outcome, RoundOutcome::AiOverTarget);
        assert!(result.outcome.player_won());
        assert!(result.best_play.is_none());
    }

    #[test]
    fn ai_exact_hit_wins() {
        let mut state = state_with(1, &[2, 3], 65, 0);
        state.active = Mover::Ai;
        state.scores.ai = 60;
        let result = state.run_ai_turn(&mut SequenceRng::zeros());
        assert_eq!(result.outcome, RoundOutcome::AiReachedTarget);
        assert_eq!(result.state.scores.ai, 65);
    }

    fn ai_move(state: &RoundState) -> (Vec<Digit>, Operator) {
        let played = state.last_move.as_ref().expect("ai moved");
        assert_eq!(played.mover, Mover::Ai);
        (played.digits.clone(), played.operator)
    }

    #[test]
    fn ai_draws_operator_from_level_set() {
        let mut state = state_with(5, &[9, 3, 2], 65, 0);
        state.active = Mover::Ai;
        // Two slot picks, the last slot is forced, then operator index 1 of four.
        let result = state.run_ai_turn(&mut SequenceRng::new(vec![0, 0, 1]));
        assert_eq!(ai_move(&result.state), (vec![9, 3, 2], Operator::Subtract));
        assert_eq!(result.outcome, RoundOutcome::InProgress);
        assert_eq!(result.state.scores.ai, 4);
    }

    #[test]
    fn ai_fractional_divide_goes_over() {
        let mut state = state_with(5, &[7, 2, 1], 65, 0);
        state.active = Mover::Ai;
        let result = state.run_ai_turn(&mut SequenceRng::new(vec![0, 0, 3]));
        assert_eq!(ai_move(&result.state), (vec![7, 2, 1], Operator::Divide));
        assert_eq!(
            result.state.last_move.as_ref().map(|played| played.value),
            Some(MoveValue::Fraction(3.5))
        );
        assert_eq!(result.outcome, RoundOutcome::AiOverTarget);
        assert!(result.best_play.is_none());
        assert_eq!(result.state.scores.ai, 0);
    }

    #[test]
    fn ai_divide_by_zero_goes_over() {
        let mut state = state_with(5, &[7, 0, 1], 65, 0);
        state.active = Mover::Ai;
        let result = state.run_ai_turn(&mut SequenceRng::new(vec![0, 0, 3]));
        assert_eq!(ai_move(&result.state), (vec![7, 0, 1], Operator::Divide));
        assert_eq!(result.outcome, RoundOutcome::AiOverTarget);
        assert!(result.best_play.is_none());
    }

    #[test]
    fn ai_falls_back_to_add_without_operators() {
        let mut state = state_with(1, &[2, 3], 65, 0);
        state.active = Mover::Ai;
        state.level.operators.clear();
        let result = state.run_ai_turn(&mut SequenceRng::zeros());
        assert_eq!(ai_move(&result.state), (vec![2, 3], Operator::Add));
        assert_eq!(result.state.scores.ai, 5);
    }

    #[test]
    fn ai_turn_ignored_on_player_turn() {
        let state = state_with(1, &[2, 3], 65, 0);
        assert_eq!(
            state.run_ai_turn(&mut SequenceRng::zeros()).state,
            state
        );
    }

    #[test]
    fn timer_counts_down_then_expires_with_explanation() {
        let mut state = state_with(4, &[1, 2, 3, 4], 65, 60);
        state.time_left = Some(2);
        let state = state.select_digit(0);
        let tick = state.on_timer_tick();
        assert_eq!(tick.outcome, RoundOutcome::InProgress);
        assert_eq!(tick.state.time_left, Some(1));
        let expired = tick.state.on_timer_tick();
        assert_eq!(expired.outcome, RoundOutcome::TimeExpired);
        let best = expired.best_play.expect("explanation");
        // 1 was already picked; the search sees 2, 3, 4 and the extra zero.
        assert!(!best.digits.contains(&1));
        assert_eq!(best.result, 5);
    }

    #[test]
    fn timer_ignored_without_limit_or_off_turn() {
        let state = state_with(1, &[1, 2], 65, 0);
        assert_eq!(state.on_timer_tick().state, state);
        let mut state = state_with(4, &[1, 2], 65, 0);
        state.active = Mover::Ai;
        assert_eq!(state.on_timer_tick().state, state);
    }

    #[test]
    fn timer_rearmed_when_turn_returns_to_player() {
        let mut state = state_with(4, &[1, 2, 3], 65, 0);
        state.active = Mover::Ai;
        state.time_left = Some(3);
        let result = state.run_ai_turn(&mut SequenceRng::zeros());
        assert_eq!(result.state.active, Mover::Player);
        assert_eq!(result.state.time_left, Some(30));
    }
}
