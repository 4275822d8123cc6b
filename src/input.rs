//! Keyboard mapping.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Up,
    Down,
    /// Choose the highlighted row, or acknowledge a raised alarm
    Select,
    Acknowledge,
    Back,
    Stop,
    Reset,
    Quit,
}

/// Map a key event to an action. Returns None for keys we don't handle
/// and for key releases.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let action = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('q') => Action::Quit,

        KeyCode::Up | KeyCode::Char('k') => Action::Up,
        KeyCode::Down | KeyCode::Char('j') => Action::Down,

        KeyCode::Enter => Action::Select,
        KeyCode::Char(' ') => Action::Acknowledge,

        KeyCode::Esc | KeyCode::Backspace | KeyCode::Left => Action::Back,

        KeyCode::Char('s') => Action::Stop,
        KeyCode::Char('r') => Action::Reset,

        _ => return None,
    };
    Some(action)
}
