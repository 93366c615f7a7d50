use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::display::display_index;
use crate::ops::task_ops;
use crate::tui::app::{App, EditTarget, Mode};

use super::KeyOutcome;

/// Keys while a text entry is open. Shortcuts are suppressed here.
pub(super) fn handle_edit(app: &mut App, key: KeyEvent) -> KeyOutcome {
    match key.code {
        KeyCode::Enter => confirm(app),
        KeyCode::Esc => {
            tracing::debug!(mode = ?app.mode, "entry cancelled");
            app.entry.clear();
            app.mode = Mode::Navigate;
            KeyOutcome::NONE
        }
        KeyCode::Backspace => {
            app.entry.backspace();
            KeyOutcome::NONE
        }
        KeyCode::Delete => {
            app.entry.delete();
            KeyOutcome::NONE
        }
        KeyCode::Left => {
            app.entry.move_left();
            KeyOutcome::NONE
        }
        KeyCode::Right => {
            app.entry.move_right();
            KeyOutcome::NONE
        }
        KeyCode::Home => {
            app.entry.move_home();
            KeyOutcome::NONE
        }
        KeyCode::End => {
            app.entry.move_end();
            KeyOutcome::NONE
        }
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            app.entry.insert(c);
            KeyOutcome::NONE
        }
        _ => KeyOutcome::NONE,
    }
}

/// Enter: apply the entry. Blank text is discarded, the mode always exits.
fn confirm(app: &mut App) -> KeyOutcome {
    let text = app.entry.take();
    let mode = std::mem::replace(&mut app.mode, Mode::Navigate);
    match mode {
        Mode::Navigate => KeyOutcome::NONE,
        Mode::CreatingTask => confirm_task(app, &text),
        Mode::CreatingSubtask { task } => confirm_subtask(app, task, &text),
        Mode::Renaming(target) => confirm_rename(app, target, &text),
    }
}

fn confirm_task(app: &mut App, text: &str) -> KeyOutcome {
    let Some(backing) = task_ops::add_task(&mut app.tasks, text) else {
        tracing::debug!("blank task discarded");
        return KeyOutcome::NONE;
    };
    app.selected_task = display_index(&app.tasks, backing).unwrap_or(0);
    app.selected_subtask = None;
    KeyOutcome::PERSIST
}

fn confirm_subtask(app: &mut App, task: usize, text: &str) -> KeyOutcome {
    let Some(parent) = app.tasks.get_mut(task) else {
        return KeyOutcome::NONE;
    };
    let Some(index) = task_ops::add_subtask(parent, text) else {
        tracing::debug!("blank subtask discarded");
        return KeyOutcome::NONE;
    };
    if let Some(display) = display_index(&app.tasks, task) {
        app.selected_task = display;
    }
    app.selected_subtask = Some(index);
    KeyOutcome::PERSIST
}

fn confirm_rename(app: &mut App, target: EditTarget, text: &str) -> KeyOutcome {
    let Some(task) = app.tasks.get_mut(target.task) else {
        return KeyOutcome::NONE;
    };
    let slot = match target.subtask {
        Some(i) => match task.subtasks.get_mut(i) {
            Some(subtask) => &mut subtask.text,
            None => return KeyOutcome::NONE,
        },
        None => &mut task.text,
    };
    if task_ops::rename(slot, text) {
        KeyOutcome::PERSIST
    } else {
        KeyOutcome::NONE
    }
}
