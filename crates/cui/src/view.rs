use crate::app::App;
use digitduel_core::{format_move, Mover};
use digitduel_data::{best_play_detail, next_round_label, turn_label};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Alignment, Color, Line, Modifier, Span, Style, Stylize};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

pub fn draw(frame: &mut Frame, app: &App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(7),
            Constraint::Min(8),
        ])
        .split(frame.area());

    draw_header(frame, root[0], app);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(root[1]);

    draw_scores(frame, middle[0], app);
    draw_pool(frame, middle[1], app);
    draw_events(frame, root[2], app);

    if app.is_over() {
        draw_result_popup(frame, app);
    }
    if app.show_help {
        draw_help_popup(frame, app);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let level = app.level();
    let title = Line::from(vec![
        Span::raw("DigitDuel | ").bold(),
        Span::styled(
            format!(
                "{} {}: {}",
                app.locale.text("Level", "Nivel"),
                level.level,
                level.title
            ),
            Style::default()
                .fg(level_color(&level.color))
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    let operators = level
        .operators
        .iter()
        .map(|op| op.symbol().to_string())
        .collect::<Vec<_>>()
        .join(" ");
    let rules = format!(
        "{}: {} | {}: {} | {}: {}",
        app.locale.text("Digits", "Dígitos"),
        level.digit_count,
        app.locale.text("Operators", "Operadores"),
        operators,
        app.locale.text("Time", "Tiempo"),
        level
            .turn_time_limit_secs
            .map(|secs| format!("{secs}s"))
            .unwrap_or_else(|| "-".to_string())
    );
    let extra = format!(
        "{} {} | {} {} | {}: {}",
        app.locale.text("Seed", "Semilla"),
        app.seed,
        app.locale.text("Lang", "Idioma"),
        app.locale.code(),
        app.locale.text("Hint", "Pista"),
        app.next_hint()
    );
    let lines = vec![
        title,
        Line::from(rules),
        Line::from(extra),
        Line::from(format!(
            "{}: {}",
            app.locale.text("Status", "Estado"),
            app.status_line
        )),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .title(app.locale.text("Overview", "Resumen"));
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(paragraph, area);
}

fn draw_scores(frame: &mut Frame, area: Rect, app: &App) {
    let round = app.round();
    let turn_style = match round.active {
        Mover::Player => Style::default().fg(Color::Green),
        Mover::Ai => Style::default().fg(Color::Magenta),
    };
    let mut lines = vec![
        Line::from(format!(
            "{}: {}",
            app.locale.text("Target", "Objetivo"),
            round.scores.target
        ))
        .bold(),
        Line::from(format!(
            "{}: {}",
            app.locale.text("You", "Tú"),
            round.scores.player
        )),
        Line::from(format!("{}: {}", app.locale.text("AI", "IA"), round.scores.ai)),
        Line::from(Span::styled(turn_label(app.locale, round.active), turn_style)),
    ];
    if let Some(left) = round.time_left {
        let style = if left <= 5 {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!("{}: {left}s", app.locale.text("Time left", "Tiempo restante")),
            style,
        )));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .title(app.locale.text("Score", "Puntaje"));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_pool(frame: &mut Frame, area: Rect, app: &App) {
    let round = app.round();
    let mut cells = Vec::new();
    for (idx, slot) in round.pool.slots().iter().enumerate() {
        let label = match slot {
            Some(digit) => format!(" {digit} "),
            None => " · ".to_string(),
        };
        let mut style = if slot.is_some() {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        if idx == app.cursor && round.awaiting_player_input() {
            style = style
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD);
        }
        cells.push(Span::styled(label, style));
        cells.push(Span::raw(" "));
    }

    let selection = if round.selection.digits.is_empty() {
        "-".to_string()
    } else {
        format_move(&round.selection.digits, round.selection.operator)
    };
    let operators = round
        .level
        .operators
        .iter()
        .map(|op| {
            let label = format!(" {} ", op.symbol());
            if *op == round.selection.operator {
                Span::styled(label, Style::default().fg(Color::Black).bg(Color::Cyan))
            } else {
                Span::raw(label)
            }
        })
        .collect::<Vec<_>>();

    let mut lines = vec![
        Line::from(cells),
        Line::from(""),
        Line::from(format!(
            "{}: {selection}",
            app.locale.text("Selection", "Selección")
        )),
    ];
    let mut operator_line = vec![Span::raw(format!(
        "{}: ",
        app.locale.text("Operator", "Operador")
    ))];
    operator_line.extend(operators);
    lines.push(Line::from(operator_line));
    if let Some(last) = round.last_move.as_ref() {
        lines.push(Line::from(format!(
            "{}: {}",
            app.locale.text("Last move", "Última jugada"),
            format_move(&last.digits, last.operator)
        )));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .title(app.locale.text("Digits", "Dígitos"));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_events(frame: &mut Frame, area: Rect, app: &App) {
    let capacity = area.height.saturating_sub(2) as usize;
    let start = app.event_log.len().saturating_sub(capacity);
    let items: Vec<ListItem<'_>> = app
        .event_log
        .iter()
        .skip(start)
        .map(|line| ListItem::new(line.as_str()))
        .collect();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(app.locale.text("Events", "Eventos"));
    frame.render_widget(List::new(items).block(block), area);
}

fn draw_result_popup(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 50, frame.area());
    frame.render_widget(Clear, area);
    let round = app.round();
    let won = round.outcome.player_won();
    let mut lines = vec![
        Line::from(if won {
            app.locale.text("Congratulations!", "¡Felicitaciones!")
        } else {
            app.locale.text("Game over!", "¡Fin del juego!")
        })
        .bold(),
        Line::from(app.outcome_label()),
        Line::from(""),
        Line::from(format!(
            "{} {}",
            app.locale.text("Your score:", "Tu puntaje:"),
            round.scores.player
        )),
        Line::from(format!(
            "{} {}",
            app.locale.text("Target:", "Objetivo:"),
            round.scores.target
        )),
    ];
    if let Some(play) = round.best_play.as_ref() {
        lines.push(Line::from(""));
        lines.push(Line::from(
            app.locale
                .text("Best possible play:", "Mejor jugada posible:"),
        ));
        lines.push(Line::from(play.to_string()).bold());
        lines.push(Line::from(best_play_detail(
            app.locale,
            play,
            round.scores.player,
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(format!(
        "[enter] {}",
        next_round_label(app.locale, round.outcome)
    )));
    let color = if won { Color::Green } else { Color::Red };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_help_popup(frame: &mut Frame, app: &App) {
    let area = centered_rect(70, 60, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from(app.locale.text(
            "q quit | ? / esc help | N new game",
            "q salir | ? / esc ayuda | N nuevo juego",
        )),
        Line::from(app.locale.text(
            "0-9 pick that digit | arrows/hl move | space/enter pick at cursor",
            "0-9 elegir ese dígito | flechas/hl mover | espacio/enter elegir",
        )),
        Line::from(app.locale.text(
            "tab/o next operator | + - * / choose operator",
            "tab/o siguiente operador | + - * / elegir operador",
        )),
        Line::from(app.locale.text(
            "reach the target exactly; going over loses the round",
            "alcanza el objetivo exacto; pasarte pierde la ronda",
        )),
    ];
    let block = Block::default()
        .title(app.locale.text("Help", "Ayuda"))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

/// `#RRGGBB` to a terminal color; anything else renders plain.
fn level_color(hex: &str) -> Color {
    let Some(raw) = hex.strip_prefix('#') else {
        return Color::Reset;
    };
    if raw.len() != 6 || !raw.is_ascii() {
        return Color::Reset;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&raw[range], 16).ok();
    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
        _ => Color::Reset,
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
