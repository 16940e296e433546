//! Keyboard input handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::runtime::{App, PAGE_STEP};

/// Maps a key event to an application action.
///
/// Guards on [`KeyEventKind::Press`] to avoid double-fire on some terminals.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    let page = PAGE_STEP as isize;
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit = true,
        KeyCode::Left | KeyCode::Char('h') => app.move_by(-1),
        KeyCode::Right | KeyCode::Char('l') => app.move_by(1),
        KeyCode::PageDown => app.move_by(page),
        KeyCode::PageUp => app.move_by(-page),
        KeyCode::Home => app.first(),
        KeyCode::End => app.last(),
        _ => {}
    }
}
