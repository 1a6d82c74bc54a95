use crate::events::AppCommand;
use crate::input::{Key, KeyEvent};
use crate::state::{AppState, Route};

/// Map user input (KeyEvent) to AppCommand based on current UI state
/// Returns None if the key should be ignored
pub fn handle_key_input(event: KeyEvent, state: &AppState) -> Option<AppCommand> {
    let key = event.key;

    if event.ctrl && key == Key::Char('c') {
        return Some(AppCommand::Quit);
    }

    // The auth warning modal swallows everything else.
    if state.auth_modal_visible() {
        return match key {
            Key::Enter => Some(AppCommand::ConfirmAuthModal),
            Key::Esc => Some(AppCommand::DismissAuthModal),
            Key::Char('q') => Some(AppCommand::Quit),
            _ => None,
        };
    }

    match key {
        Key::Char('q') => Some(AppCommand::Quit),
        Key::Char(c @ '1'..='5') => Route::from_hotkey(c).map(AppCommand::Navigate),
        Key::Char('g') if !state.authenticated => Some(AppCommand::StartGoogleLogin),
        Key::Char('o') if state.authenticated => Some(AppCommand::Logout),
        Key::Char('x') | Key::Esc if state.notice.is_some() => Some(AppCommand::DismissNotice),
        Key::Char('r') if state.content_interactive() => Some(AppCommand::Reload),
        Key::Char('j') | Key::Down if state.content_interactive() => Some(AppCommand::SelectNext),
        Key::Char('k') | Key::Up if state.content_interactive() => Some(AppCommand::SelectPrevious),
        _ => None,
    }
}
