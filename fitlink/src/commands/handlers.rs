use crate::events::AppCommand;
use crate::input::{Key, KeyEvent};
use crate::state::AppState;

/// Map user input (KeyEvent) to AppCommand based on current UI state
/// Returns None if the key should be ignored
pub fn handle_key_input(event: KeyEvent, state: &AppState) -> Option<AppCommand> {
    if event.modifiers.ctrl {
        return match event.key {
            Key::Char('c') => Some(AppCommand::Quit),
            _ => None,
        };
    }

    match event.key {
        Key::Char('q') | Key::Esc => Some(AppCommand::Quit),
        Key::Char('c') => Some(AppCommand::BeginAuthorization),
        // Already in flight
        Key::Char('r') if state.is_loading_steps() => None,
        Key::Char('r') => Some(AppCommand::FetchTodaySteps),
        _ => None,
    }
}
