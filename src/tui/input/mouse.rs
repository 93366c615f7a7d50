use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::ops::task_ops;
use crate::tui::app::App;
use crate::tui::render::task_list::checkbox_at;

use super::KeyOutcome;

/// Left click on a checkbox flips that task or subtask. Other mouse
/// input is ignored, as are clicks while an entry is open.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) -> KeyOutcome {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) || app.is_editing() {
        return KeyOutcome::NONE;
    }
    let Some(target) = checkbox_at(app, mouse.column, mouse.row) else {
        return KeyOutcome::NONE;
    };
    tracing::debug!(task = target.task, subtask = ?target.subtask, "checkbox clicked");

    let Some(task) = app.tasks.get_mut(target.task) else {
        return KeyOutcome::NONE;
    };
    match target.subtask {
        Some(i) => match task.subtasks.get_mut(i) {
            Some(subtask) => task_ops::toggle_subtask(subtask),
            None => return KeyOutcome::NONE,
        },
        None => task_ops::toggle_task(task),
    }
    app.clamp_selection();
    KeyOutcome::PERSIST
}
