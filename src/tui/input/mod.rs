mod edit;
mod mouse;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};
use super::render::task_list::entry_text_width;

use edit::handle_edit;
pub use mouse::handle_mouse;
use navigate::handle_navigate;

/// Result of handling one key or click
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[must_use]
pub struct KeyOutcome {
    /// The task list changed and must be written back
    pub persist: bool,
}

impl KeyOutcome {
    pub const NONE: KeyOutcome = KeyOutcome { persist: false };
    pub const PERSIST: KeyOutcome = KeyOutcome { persist: true };
}

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) -> KeyOutcome {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return KeyOutcome::NONE;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('w') | KeyCode::Char('c'))
    {
        tracing::debug!("quit requested");
        app.should_quit = true;
        return KeyOutcome::NONE;
    }

    let outcome = match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        _ => handle_edit(app, key),
    };
    app.clamp_selection();
    if app.is_editing() {
        let width = entry_text_width(app);
        app.entry.update_h_scroll(width);
    }
    outcome
}
