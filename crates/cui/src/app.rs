use digitduel_core::{
    Digit, Game, LevelConfig, LevelTable, ManualScheduler, Operator, RngState, RoundOutcome,
    RoundState,
};
use digitduel_data::{format_event, outcome_text, turn_label, UiLocale};
use std::collections::VecDeque;
use std::time::Duration;

pub const DEFAULT_RUN_SEED: u64 = 0xC0FFEE;
const MAX_EVENT_LOG: usize = 200;

pub struct App {
    pub locale: UiLocale,
    pub seed: u64,
    pub game: Game<RngState, ManualScheduler>,
    pub cursor: usize,
    pub event_log: VecDeque<String>,
    pub status_line: String,
    pub show_help: bool,
    pub should_quit: bool,
}

impl App {
    pub fn bootstrap(locale: UiLocale, seed: u64, levels: LevelTable) -> Self {
        let game = Game::new(levels, RngState::from_seed(seed), ManualScheduler::new());
        let mut app = Self {
            locale,
            seed,
            game,
            cursor: 0,
            event_log: VecDeque::new(),
            status_line: locale.text("ready", "listo").to_string(),
            show_help: false,
            should_quit: false,
        };
        app.flush_events();
        app
    }

    /// Feeds wall time into the session so deferred scoring, the AI and the
    /// countdown run.
    pub fn on_tick(&mut self, elapsed: Duration) {
        self.game.advance(elapsed);
        self.flush_events();
    }

    pub fn round(&self) -> &RoundState {
        self.game.round()
    }

    pub fn level(&self) -> &LevelConfig {
        self.game.level_config()
    }

    pub fn move_cursor(&mut self, forward: bool) {
        let len = self.round().pool.len();
        move_index(&mut self.cursor, len, forward);
    }

    pub fn select_at_cursor(&mut self) {
        self.select_slot(self.cursor);
    }

    pub fn pick_digit(&mut self, digit: Digit) {
        match self.round().pool.position_of(digit) {
            Some(index) => {
                self.cursor = index;
                self.select_slot(index);
            }
            None => self.push_status(format!(
                "{} {digit}",
                self.locale.text("not on the table:", "no está en la mesa:")
            )),
        }
    }

    fn select_slot(&mut self, index: usize) {
        if !self.round().awaiting_player_input() {
            self.push_status(self.locale.text("wait for your turn", "espera tu turno"));
            return;
        }
        if self.round().pool.get(index).is_none() {
            self.push_status(self.locale.text("slot already used", "casilla ya usada"));
            return;
        }
        self.game.select_digit(index);
        self.flush_events();
    }

    pub fn set_operator(&mut self, operator: Operator) {
        if !self.level().allows(operator) {
            self.push_status(format!(
                "{} {operator}",
                self.locale
                    .text("not allowed on this level:", "no permitido en este nivel:")
            ));
            return;
        }
        self.game.choose_operator(operator);
        self.flush_events();
    }

    pub fn cycle_operator(&mut self, forward: bool) {
        let operators = self.level().operators.clone();
        if operators.len() < 2 {
            return;
        }
        let current = self.round().selection.operator;
        let mut idx = operators.iter().position(|op| *op == current).unwrap_or(0);
        move_index(&mut idx, operators.len(), forward);
        self.set_operator(operators[idx]);
    }

    /// Enter: continue after a finished round, otherwise pick the digit
    /// under the cursor.
    pub fn activate_primary(&mut self) {
        if self.round().outcome.is_over() {
            self.game.next_round();
            self.cursor = 0;
            self.flush_events();
        } else {
            self.select_at_cursor();
        }
    }

    pub fn new_game(&mut self) {
        self.game.jump_to_level(1);
        self.cursor = 0;
        self.push_event_line(self.locale.text("new game", "nuevo juego").to_string());
        self.flush_events();
    }

    pub fn next_hint(&self) -> String {
        let round = self.round();
        if round.outcome.is_over() {
            return self
                .locale
                .text("enter: continue | N: new game", "enter: continuar | N: nuevo juego")
                .to_string();
        }
        if round.awaiting_player_input() {
            let left = round.level.digit_count - round.selection.digits.len();
            return format!(
                "{} {left}",
                self.locale.text("digits to pick:", "dígitos por elegir:")
            );
        }
        turn_label(self.locale, round.active).to_string()
    }

    pub fn outcome_label(&self) -> String {
        let (title, detail) = outcome_text(self.locale, self.round().outcome);
        if detail.is_empty() {
            title.to_string()
        } else {
            format!("{title} {detail}")
        }
    }

    pub fn is_over(&self) -> bool {
        self.round().outcome != RoundOutcome::InProgress
    }

    pub fn push_status(&mut self, value: impl Into<String>) {
        self.status_line = value.into();
    }

    fn flush_events(&mut self) {
        for event in self.game.drain_events() {
            let line = format_event(self.locale, &event);
            self.push_event_line(line);
        }
    }

    fn push_event_line(&mut self, line: String) {
        if self.event_log.len() >= MAX_EVENT_LOG {
            let _ = self.event_log.pop_front();
        }
        self.event_log.push_back(line);
    }
}

fn move_index(value: &mut usize, len: usize, forward: bool) {
    if len == 0 {
        *value = 0;
        return;
    }
    if forward {
        *value = (*value + 1) % len;
    } else if *value == 0 {
        *value = len - 1;
    } else {
        *value -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::bootstrap(UiLocale::EnUs, 7, LevelTable::builtin())
    }

    #[test]
    fn bootstrap_logs_round_start() {
        let app = app();
        assert!(app.event_log.front().is_some_and(|line| line.starts_with("Level 1")));
        assert_eq!(app.round().pool.available_count(), 10);
    }

    #[test]
    fn cursor_wraps_both_ways() {
        let mut app = app();
        app.move_cursor(false);
        assert_eq!(app.cursor, 9);
        app.move_cursor(true);
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn picking_digits_then_ticking_scores_the_move() {
        let mut app = app();
        app.pick_digit(1);
        app.pick_digit(2);
        assert_eq!(app.round().selection.digits, vec![1, 2]);
        app.pick_digit(3);
        assert_eq!(app.round().selection.digits, vec![1, 2]);
        app.on_tick(Duration::from_millis(500));
        assert_eq!(app.round().scores.player, 3);
        assert!(app.event_log.iter().any(|line| line == "You: 1 + 2 = 3 -> 3"));
    }

    #[test]
    fn disallowed_operator_reports_status() {
        let mut app = app();
        app.set_operator(Operator::Divide);
        assert_eq!(app.round().selection.operator, Operator::Add);
        assert!(app.status_line.starts_with("not allowed"));
    }

    #[test]
    fn cycle_operator_walks_level_operators() {
        let mut app = app();
        app.game.jump_to_level(2);
        app.cycle_operator(true);
        assert_eq!(app.round().selection.operator, Operator::Subtract);
        app.cycle_operator(true);
        assert_eq!(app.round().selection.operator, Operator::Add);
    }

    #[test]
    fn used_slot_is_rejected() {
        let mut app = app();
        app.select_at_cursor();
        app.select_at_cursor();
        assert_eq!(app.round().selection.digits.len(), 1);
        assert_eq!(app.status_line, "slot already used");
    }
}
