use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use digitduel_core::{Digit, Operator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    Quit,
    ToggleHelp,
    MoveLeft,
    MoveRight,
    SelectAtCursor,
    PickDigit(Digit),
    NextOperator,
    PrevOperator,
    SetOperator(Operator),
    Activate,
    NewGame,
}

pub fn map_key(key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Esc => InputAction::ToggleHelp,
        KeyCode::Tab => InputAction::NextOperator,
        KeyCode::BackTab => InputAction::PrevOperator,
        KeyCode::Left => InputAction::MoveLeft,
        KeyCode::Right => InputAction::MoveRight,
        KeyCode::Enter => InputAction::Activate,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => InputAction::Quit,
        KeyCode::Char('q') => InputAction::Quit,
        KeyCode::Char('?') => InputAction::ToggleHelp,
        KeyCode::Char(' ') => InputAction::SelectAtCursor,
        KeyCode::Char('h') => InputAction::MoveLeft,
        KeyCode::Char('l') => InputAction::MoveRight,
        KeyCode::Char('o') => InputAction::NextOperator,
        KeyCode::Char('N') => InputAction::NewGame,
        KeyCode::Char('n') => InputAction::Activate,
        KeyCode::Char(ch @ '0'..='9') => InputAction::PickDigit(ch as u8 - b'0'),
        KeyCode::Char('+') => InputAction::SetOperator(Operator::Add),
        KeyCode::Char('-') => InputAction::SetOperator(Operator::Subtract),
        KeyCode::Char('*') | KeyCode::Char('x') => InputAction::SetOperator(Operator::Multiply),
        KeyCode::Char('/') => InputAction::SetOperator(Operator::Divide),
        _ => InputAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn maps_digits_and_operators() {
        assert_eq!(map_key(key(KeyCode::Char('7'))), InputAction::PickDigit(7));
        assert_eq!(map_key(key(KeyCode::Char('0'))), InputAction::PickDigit(0));
        assert_eq!(
            map_key(key(KeyCode::Char('/'))),
            InputAction::SetOperator(Operator::Divide)
        );
        assert_eq!(
            map_key(key(KeyCode::Char('x'))),
            InputAction::SetOperator(Operator::Multiply)
        );
    }

    #[test]
    fn maps_navigation_and_quit() {
        assert_eq!(map_key(key(KeyCode::Left)), InputAction::MoveLeft);
        assert_eq!(map_key(key(KeyCode::Char('l'))), InputAction::MoveRight);
        assert_eq!(map_key(key(KeyCode::Enter)), InputAction::Activate);
        assert_eq!(map_key(key(KeyCode::Char('q'))), InputAction::Quit);
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            InputAction::Quit
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('N'), KeyModifiers::SHIFT)),
            InputAction::NewGame
        );
    }
}
