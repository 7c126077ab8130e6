use crate::UiLocale;
use digitduel_core::{format_move, BestPlay, Event, Mover, RoundOutcome};

pub fn mover_label(locale: UiLocale, mover: Mover) -> &'static str {
    match mover {
        Mover::Player => locale.text("You", "Tú"),
        Mover::Ai => locale.text("AI", "IA"),
    }
}

pub fn turn_label(locale: UiLocale, mover: Mover) -> &'static str {
    match mover {
        Mover::Player => locale.text("Your turn", "Tu turno"),
        Mover::Ai => locale.text("AI's turn", "Turno de la IA"),
    }
}

/// Headline and one-line explanation for a finished round.
pub fn outcome_text(locale: UiLocale, outcome: RoundOutcome) -> (&'static str, &'static str) {
    let won = locale.text("You won!", "¡Ganaste!");
    let lost = locale.text("You lost!", "¡Perdiste!");
    match outcome {
        RoundOutcome::InProgress => (locale.text("In play", "En juego"), ""),
        RoundOutcome::PlayerReachedTarget => (
            won,
            locale.text(
                "You reached the target number!",
                "¡Has alcanzado el número objetivo!",
            ),
        ),
        RoundOutcome::PlayerOverTarget => (
            lost,
            locale.text(
                "You went over the target number",
                "Te has pasado del número objetivo",
            ),
        ),
        RoundOutcome::AiReachedTarget => (
            lost,
            locale.text(
                "The AI reached the target number",
                "La IA ha alcanzado el número objetivo",
            ),
        ),
        RoundOutcome::AiOverTarget => (
            won,
            locale.text(
                "The AI went over the target number",
                "La IA se ha pasado del número objetivo",
            ),
        ),
        RoundOutcome::TimeExpired => (
            lost,
            locale.text("You ran out of time", "Se te acabó el tiempo"),
        ),
    }
}

/// Label for the "play again" prompt after a round.
pub fn next_round_label(locale: UiLocale, outcome: RoundOutcome) -> &'static str {
    if outcome.player_won() {
        locale.text("Next level", "Siguiente nivel")
    } else {
        locale.text("Try again", "Intentar de nuevo")
    }
}

/// What the best play would have scored, and the total it would have left
/// the player on.
pub fn best_play_detail(locale: UiLocale, play: &BestPlay, player_score: i64) -> String {
    let total = player_score + play.result;
    match locale {
        UiLocale::EnUs => format!(
            "That play would have scored {}, for a total of {total}.",
            play.result
        ),
        UiLocale::EsEs => format!(
            "Esta combinación te habría dado {} puntos, llevándote a un total de {total} puntos.",
            play.result
        ),
    }
}

pub fn format_event(locale: UiLocale, event: &Event) -> String {
    match event {
        Event::RoundStarted {
            level,
            target,
            digit_count,
            time_limit,
        } => {
            let mut line = format!(
                "{} {level}: {} {target}, {digit_count} {}",
                locale.text("Level", "Nivel"),
                locale.text("target", "objetivo"),
                locale.text("digits per turn", "dígitos por turno"),
            );
            if let Some(secs) = time_limit {
                line.push_str(&format!(", {secs}s {}", locale.text("per turn", "por turno")));
            }
            line
        }
        Event::DigitSelected { digit, selected } => format!(
            "{} {digit} ({selected})",
            locale.text("picked", "elegido")
        ),
        Event::OperatorChosen { operator } => {
            format!("{} {operator}", locale.text("operator", "operador"))
        }
        Event::MoveScored {
            mover,
            digits,
            operator,
            value,
            score,
        } => format!(
            "{}: {} = {} -> {score}",
            mover_label(locale, *mover),
            format_move(digits, *operator),
            value
        ),
        Event::TurnPassed { to } => turn_label(locale, *to).to_string(),
        Event::TimerTicked { seconds_left } => {
            format!("{seconds_left}s {}", locale.text("left", "restantes"))
        }
        Event::RoundEnded {
            outcome,
            player,
            ai,
            target,
            best_play,
        } => {
            let (title, detail) = outcome_text(locale, *outcome);
            let mut line = format!(
                "{title} {detail} ({} {player}, {} {ai}, {} {target})",
                mover_label(locale, Mover::Player),
                mover_label(locale, Mover::Ai),
                locale.text("target", "objetivo"),
            );
            if let Some(play) = best_play {
                line.push_str(&format!(
                    " | {} {play}. {}",
                    locale.text("Best possible play:", "Mejor jugada posible:"),
                    best_play_detail(locale, play, *player)
                ));
            }
            line
        }
        Event::LevelAdvanced { from, to } => format!(
            "{} {from} -> {to}",
            locale.text("Level up", "Subes de nivel")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use digitduel_core::{MoveValue, Operator};

    #[test]
    fn move_lines_show_operator_and_value() {
        let event = Event::MoveScored {
            mover: Mover::Ai,
            digits: vec![7, 2],
            operator: Operator::Divide,
            value: MoveValue::Fraction(3.5),
            score: 12,
        };
        assert_eq!(format_event(UiLocale::EnUs, &event), "AI: 7 ÷ 2 = 3.50 -> 12");
        assert_eq!(format_event(UiLocale::EsEs, &event), "IA: 7 ÷ 2 = 3.50 -> 12");
    }

    #[test]
    fn best_play_detail_adds_result_to_score() {
        let play = BestPlay {
            digits: vec![4, 3],
            operator: Operator::Subtract,
            result: 1,
        };
        assert_eq!(
            best_play_detail(UiLocale::EnUs, &play, 70),
            "That play would have scored 1, for a total of 71."
        );
    }

    #[test]
    fn round_end_mentions_best_play() {
        let event = Event::RoundEnded {
            outcome: RoundOutcome::PlayerOverTarget,
            player: 60,
            ai: 31,
            target: 65,
            best_play: Some(BestPlay {
                digits: vec![2, 3],
                operator: Operator::Add,
                result: 5,
            }),
        };
        let line = format_event(UiLocale::EsEs, &event);
        assert!(line.starts_with("¡Perdiste! Te has pasado del número objetivo"));
        assert!(line.contains("Mejor jugada posible: 2 + 3 = 5."));
        assert!(line.ends_with(
            "Esta combinación te habría dado 5 puntos, llevándote a un total de 65 puntos."
        ));
    }

    #[test]
    fn outcome_headlines_follow_the_winner() {
        for outcome in [RoundOutcome::PlayerReachedTarget, RoundOutcome::AiOverTarget] {
            assert_eq!(outcome_text(UiLocale::EnUs, outcome).0, "You won!");
            assert_eq!(next_round_label(UiLocale::EnUs, outcome), "Next level");
        }
        for outcome in [
            RoundOutcome::PlayerOverTarget,
            RoundOutcome::AiReachedTarget,
            RoundOutcome::TimeExpired,
        ] {
            assert_eq!(outcome_text(UiLocale::EnUs, outcome).0, "You lost!");
            assert_eq!(next_round_label(UiLocale::EsEs, outcome), "Intentar de nuevo");
        }
    }
}
