use crate::app::App;
use crate::input::InputAction;

pub fn dispatch(app: &mut App, action: InputAction) {
    match action {
        InputAction::None => {}
        InputAction::Quit => app.should_quit = true,
        InputAction::ToggleHelp => app.show_help = !app.show_help,
        InputAction::MoveLeft => app.move_cursor(false),
        InputAction::MoveRight => app.move_cursor(true),
        InputAction::SelectAtCursor => app.select_at_cursor(),
        InputAction::PickDigit(digit) => app.pick_digit(digit),
        InputAction::NextOperator => app.cycle_operator(true),
        InputAction::PrevOperator => app.cycle_operator(false),
        InputAction::SetOperator(operator) => app.set_operator(operator),
        InputAction::Activate => app.activate_primary(),
        InputAction::NewGame => app.new_game(),
    }
}
