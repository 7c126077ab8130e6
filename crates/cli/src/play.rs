use anyhow::{Context, Result};
use digitduel_core::{
    format_move, Digit, Event, Game, LevelTable, ManualScheduler, Operator, RngState, RoundState,
};
use digitduel_data::{format_event, next_round_label, turn_label, UiLocale};
use std::io::{self, BufRead, Write};
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Pick {
        operator: Option<Operator>,
        digits: Vec<Digit>,
    },
    Next,
    NewGame,
    State,
    Help,
    Quit,
}

/// Parses one input line. Digits and operator symbols may be mixed freely,
/// so `3 2`, `32 +` and `3+2` are the same move.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let trimmed = line.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "" | "s" | "state" => return Ok(Command::State),
        "n" | "next" => return Ok(Command::Next),
        "new" => return Ok(Command::NewGame),
        "h" | "?" | "help" => return Ok(Command::Help),
        "q" | "quit" | "exit" => return Ok(Command::Quit),
        _ => {}
    }
    let mut operator = None;
    let mut digits = Vec::new();
    for token in trimmed.split(|ch: char| ch.is_whitespace() || ch == ',') {
        if token.is_empty() {
            continue;
        }
        if let Ok(op) = token.parse::<Operator>() {
            operator = Some(op);
            continue;
        }
        for ch in token.chars() {
            if let Some(digit) = ch.to_digit(10) {
                digits.push(digit as Digit);
            } else if let Ok(op) = ch.to_string().parse::<Operator>() {
                operator = Some(op);
            } else {
                return Err(format!("unexpected '{ch}'"));
            }
        }
    }
    Ok(Command::Pick { operator, digits })
}

pub fn run(locale: UiLocale, seed: u64, levels: LevelTable) -> Result<()> {
    let mut game = Game::new(levels, RngState::from_seed(seed), ManualScheduler::new());
    println!("{}: {}", locale.text("locale", "idioma"), locale.code());
    print_help(locale);
    flush_events(locale, &mut game);
    print_state(locale, game.round());

    let stdin = io::stdin();
    let mut last_input = Instant::now();
    loop {
        prompt(locale, game.round())?;
        let mut line = String::new();
        let read = stdin.lock().read_line(&mut line).context("read input")?;
        if read == 0 {
            break;
        }
        let was_over = game.round().outcome.is_over();
        let now = Instant::now();
        game.advance(now.duration_since(last_input));
        last_input = now;
        let timed_out = !was_over && game.round().outcome.is_over();
        flush_events(locale, &mut game);

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                println!("{}: {err}", locale.text("error", "error"));
                continue;
            }
        };
        match command {
            Command::Quit => break,
            Command::Help => print_help(locale),
            Command::State => print_state(locale, game.round()),
            Command::Next => {
                if game.round().outcome.is_over() {
                    game.next_round();
                    flush_events(locale, &mut game);
                    print_state(locale, game.round());
                } else {
                    println!("{}", locale.text("the round is still on", "la ronda sigue"));
                }
            }
            Command::NewGame => {
                game.jump_to_level(1);
                flush_events(locale, &mut game);
                print_state(locale, game.round());
            }
            Command::Pick { operator, digits } => {
                if timed_out {
                    continue;
                }
                apply_pick(locale, &mut game, operator, &digits);
                game.settle();
                flush_events(locale, &mut game);
                if !game.round().outcome.is_over() {
                    print_state(locale, game.round());
                }
            }
        }
        io::stdout().flush().context("flush stdout")?;
        last_input = Instant::now();
    }
    Ok(())
}

fn apply_pick(
    locale: UiLocale,
    game: &mut Game<RngState, ManualScheduler>,
    operator: Option<Operator>,
    digits: &[Digit],
) {
    if !game.round().awaiting_player_input() {
        println!("{}", locale.text("not your turn", "no es tu turno"));
        return;
    }
    if let Some(op) = operator {
        if game.level_config().allows(op) {
            game.choose_operator(op);
        } else {
            println!(
                "{} {op}",
                locale.text("not allowed on this level:", "no permitido en este nivel:")
            );
            return;
        }
    }
    for digit in digits {
        if !game.round().awaiting_player_input() {
            break;
        }
        match game.round().pool.position_of(*digit) {
            Some(index) => game.select_digit(index),
            None => println!(
                "{} {digit}",
                locale.text("not on the table:", "no está en la mesa:")
            ),
        }
    }
}

/// Prints pending events. Countdown ticks and single picks are left out;
/// the state line already shows them.
fn flush_events(locale: UiLocale, game: &mut Game<RngState, ManualScheduler>) {
    for event in game.drain_events() {
        if matches!(
            event,
            Event::TimerTicked { .. } | Event::DigitSelected { .. } | Event::OperatorChosen { .. }
        ) {
            continue;
        }
        println!("  {}", format_event(locale, &event));
    }
}

fn prompt(locale: UiLocale, round: &RoundState) -> Result<()> {
    let label = if round.outcome.is_over() {
        format!("[n] {}", next_round_label(locale, round.outcome))
    } else {
        turn_label(locale, round.active).to_string()
    };
    print!("{label}> ");
    io::stdout().flush().context("flush stdout")
}

fn print_state(locale: UiLocale, round: &RoundState) {
    let pool = round
        .pool
        .slots()
        .iter()
        .map(|slot| match slot {
            Some(digit) => digit.to_string(),
            None => "·".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ");
    let operators = round
        .level
        .operators
        .iter()
        .map(|op| op.symbol().to_string())
        .collect::<Vec<_>>()
        .join(" ");
    println!(
        "{} {} ({}) | {} {} | {} {} | {} {}",
        locale.text("Level", "Nivel"),
        round.level.level,
        round.level.title,
        locale.text("target", "objetivo"),
        round.scores.target,
        locale.text("you", "tú"),
        round.scores.player,
        locale.text("AI", "IA"),
        round.scores.ai
    );
    println!(
        "  {}: [{pool}]  {}: {operators}  {}: {}",
        locale.text("digits", "dígitos"),
        locale.text("operators", "operadores"),
        locale.text("pick", "elige"),
        round.level.digit_count
    );
    if !round.selection.digits.is_empty() {
        println!(
            "  {}: {}",
            locale.text("selection", "selección"),
            format_move(&round.selection.digits, round.selection.operator)
        );
    }
    if let Some(left) = round.time_left {
        println!("  {}: {left}s", locale.text("time left", "tiempo restante"));
    }
}

fn print_help(locale: UiLocale) {
    println!(
        "{}",
        locale.text(
            "Type the digits to play, optionally with an operator: `3 2`, `7 2 /`, `3+2`.",
            "Escribe los dígitos a jugar, con operador opcional: `3 2`, `7 2 /`, `3+2`.",
        )
    );
    println!(
        "{}",
        locale.text(
            "s state | n next round | new new game | h help | q quit",
            "s estado | n siguiente ronda | new nuevo juego | h ayuda | q salir",
        )
    );
}
