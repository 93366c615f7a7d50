use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::task_ops;
use crate::tui::app::{App, EntryBuffer, Mode};

use super::KeyOutcome;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) -> KeyOutcome {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return KeyOutcome::NONE;
    }

    // Help panel stays up until the next key, which is then handled normally
    app.show_help = false;

    let KeyCode::Char(c) = key.code else {
        return KeyOutcome::NONE;
    };
    tracing::debug!(key = %c, task = app.selected_task, subtask = ?app.selected_subtask, "shortcut");

    match c {
        'i' => {
            app.show_help = true;
            KeyOutcome::NONE
        }
        'q' => {
            app.entry.clear();
            app.mode = Mode::CreatingTask;
            KeyOutcome::NONE
        }
        'w' => {
            move_up(app);
            KeyOutcome::NONE
        }
        's' => {
            move_down(app);
            KeyOutcome::NONE
        }
        'r' => {
            start_rename(app);
            KeyOutcome::NONE
        }
        ' ' => toggle_completed(app),
        'e' => {
            start_subtask(app);
            KeyOutcome::NONE
        }
        'x' => delete_selected(app),
        'a' => collapse_or_leave(app),
        'd' => toggle_collapsed(app),
        _ => KeyOutcome::NONE,
    }
}

/// `w`: previous row, wrapping from the first task to the last
fn move_up(app: &mut App) {
    let count = app.tasks.len();
    if count == 0 {
        return;
    }
    match app.selected_subtask {
        None => {
            app.selected_task = if app.selected_task > 0 {
                app.selected_task - 1
            } else {
                count - 1
            };
            app.selected_subtask = app
                .selected()
                .filter(|t| t.shows_subtasks())
                .map(|t| t.subtasks.len() - 1);
        }
        Some(0) => app.selected_subtask = None,
        Some(i) => app.selected_subtask = Some(i - 1),
    }
}

/// `s`: next row, wrapping from the last task to the first
fn move_down(app: &mut App) {
    let count = app.tasks.len();
    let Some(task) = app.selected() else {
        return;
    };
    let visible = if task.shows_subtasks() {
        task.subtasks.len()
    } else {
        0
    };
    match app.selected_subtask {
        None if visible > 0 => app.selected_subtask = Some(0),
        Some(i) if i + 1 < visible => app.selected_subtask = Some(i + 1),
        _ => {
            app.selected_subtask = None;
            app.selected_task = (app.selected_task + 1) % count;
        }
    }
}

/// `r`: open an inline entry prefilled with the selection's text
fn start_rename(app: &mut App) {
    let Some(target) = app.selection_target() else {
        return;
    };
    let task = &app.tasks[target.task];
    let text = match target.subtask {
        Some(i) => &task.subtasks[i].text,
        None => &task.text,
    };
    app.entry = EntryBuffer::with_text(text);
    app.mode = Mode::Renaming(target);
}

/// `e`: open a subtask entry under the selected task (task rows only)
fn start_subtask(app: &mut App) {
    if app.selected_subtask.is_some() {
        return;
    }
    let Some(task) = app.selected_backing() else {
        return;
    };
    app.entry.clear();
    app.mode = Mode::CreatingSubtask { task };
}

/// Space: flip completion on the selection
fn toggle_completed(app: &mut App) -> KeyOutcome {
    let subtask = app.selected_subtask;
    let Some(task) = app.selected_mut() else {
        return KeyOutcome::NONE;
    };
    match subtask {
        Some(i) => task_ops::toggle_subtask(&mut task.subtasks[i]),
        None => task_ops::toggle_task(task),
    }
    KeyOutcome::PERSIST
}

/// `x`: delete the selected subtask, or the task when on a task row
fn delete_selected(app: &mut App) -> KeyOutcome {
    let Some(backing) = app.selected_backing() else {
        return KeyOutcome::NONE;
    };
    match app.selected_subtask {
        None => {
            app.tasks.remove(backing);
            app.selected_task = app.selected_task.min(app.tasks.len().saturating_sub(1));
        }
        Some(i) => {
            let subtasks = &mut app.tasks[backing].subtasks;
            subtasks.remove(i);
            app.selected_subtask = match subtasks.len() {
                0 => None,
                len => Some(i.min(len - 1)),
            };
        }
    }
    KeyOutcome::PERSIST
}

/// `a`: leave the subtask rows, or fold the selected task
fn collapse_or_leave(app: &mut App) -> KeyOutcome {
    if app.selected_subtask.take().is_some() {
        return KeyOutcome::NONE;
    }
    match app.selected_mut() {
        Some(task) if task.shows_subtasks() => {
            task.collapsed = true;
            KeyOutcome::PERSIST
        }
        _ => KeyOutcome::NONE,
    }
}

/// `d`: fold or unfold the selected task, entering its first subtask on unfold
fn toggle_collapsed(app: &mut App) -> KeyOutcome {
    if app.selected_subtask.is_some() {
        return KeyOutcome::NONE;
    }
    let Some(task) = app.selected_mut() else {
        return KeyOutcome::NONE;
    };
    task.collapsed = !task.collapsed;
    if task.shows_subtasks() {
        app.selected_subtask = Some(0);
    }
    KeyOutcome::PERSIST
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Subtask, Task};
    use crate::tui::input::handle_key;
    use crate::tui::input::test_keys::*;
    use crate::tui::theme::Theme;
    use pretty_assertions::assert_eq;

    fn task(text: &str, subtasks: &[&str]) -> Task {
        let mut t = Task::new(text);
        t.subtasks = subtasks.iter().map(|s| Subtask::new(*s)).collect();
        t
    }

    fn done(text: &str) -> Task {
        let mut t = Task::new(text);
        t.completed = true;
        t
    }

    fn app_with(tasks: Vec<Task>) -> App {
        App::new(tasks, Theme::default())
    }

    fn press(app: &mut App, keys: &str) -> bool {
        let mut persisted = false;
        for c in keys.chars() {
            persisted |= handle_key(app, ch(c)).persist;
        }
        persisted
    }

    fn selection(app: &App) -> (usize, Option<usize>) {
        (app.selected_task, app.selected_subtask)
    }

    // --- movement ---

    #[test]
    fn s_walks_tasks_and_expanded_subtasks_then_wraps() {
        let mut app = app_with(vec![task("A", &["a1", "a2"]), task("B", &[])]);
        let mut seen = vec![selection(&app)];
        for _ in 0..4 {
            press(&mut app, "s");
            seen.push(selection(&app));
        }
        assert_eq!(
            seen,
            vec![(0, None), (0, Some(0)), (0, Some(1)), (1, None), (0, None)]
        );
    }

    #[test]
    fn w_walks_backwards_and_enters_last_subtask() {
        let mut app = app_with(vec![task("A", &["a1", "a2"]), task("B", &[])]);
        let mut seen = vec![selection(&app)];
        for _ in 0..4 {
            press(&mut app, "w");
            seen.push(selection(&app));
        }
        assert_eq!(
            seen,
            vec![(0, None), (1, None), (0, Some(1)), (0, Some(0)), (0, None)]
        );
    }

    #[test]
    fn w_wrap_checks_last_task_for_subtasks() {
        let mut app = app_with(vec![task("A", &[]), task("B", &["b1", "b2", "b3"])]);
        press(&mut app, "w");
        assert_eq!(selection(&app), (1, Some(2)));
    }

    #[test]
    fn collapsed_subtasks_are_skipped() {
        let mut first = task("A", &["a1"]);
        first.collapsed = true;
        let mut app = app_with(vec![first, task("B", &[])]);
        press(&mut app, "s");
        assert_eq!(selection(&app), (1, None));
        press(&mut app, "w");
        assert_eq!(selection(&app), (0, None));
    }

    #[test]
    fn movement_uses_display_order_for_subtasks() {
        // Completed "A" sorts after "B", so display 0 is B with its subtasks
        let mut a = task("A", &[]);
        a.completed = true;
        let mut app = app_with(vec![a, task("B", &["b1"])]);
        press(&mut app, "s");
        assert_eq!(selection(&app), (0, Some(0)));
        press(&mut app, "s");
        assert_eq!(selection(&app), (1, None));
        assert_eq!(app.selected().unwrap().text, "A");
    }

    #[test]
    fn movement_on_empty_list_is_noop() {
        let mut app = app_with(vec![]);
        assert!(!press(&mut app, "wsad x"));
        assert_eq!(selection(&app), (0, None));
    }

    #[test]
    fn single_task_wraps_onto_itself() {
        let mut app = app_with(vec![task("A", &[])]);
        press(&mut app, "sw");
        assert_eq!(selection(&app), (0, None));
    }

    // --- toggling ---

    #[test]
    fn space_on_task_cascades_to_subtasks() {
        let mut app = app_with(vec![task("A", &["a1", "a2"])]);
        assert!(press(&mut app, " "));
        assert!(app.tasks[0].completed);
        assert!(app.tasks[0].subtasks.iter().all(|s| s.completed));
    }

    #[test]
    fn space_on_subtask_leaves_parent() {
        let mut app = app_with(vec![task("A", &["a1"])]);
        press(&mut app, "s ");
        assert!(app.tasks[0].subtasks[0].completed);
        assert!(!app.tasks[0].completed);
    }

    #[test]
    fn space_resolves_display_index() {
        let mut app = app_with(vec![done("A"), Task::new("B")]);
        press(&mut app, " ");
        assert!(app.tasks[1].completed);
        assert!(app.tasks[0].completed);
        // Storage order untouched
        assert_eq!(app.tasks[0].text, "A");
    }

    #[test]
    fn toggle_keeps_display_position() {
        let mut app = app_with(vec![Task::new("A"), Task::new("B")]);
        press(&mut app, " ");
        // A sorted to the end; display 0 is now B
        assert_eq!(app.selected_task, 0);
        assert_eq!(app.selected().unwrap().text, "B");
    }

    // --- deleting ---

    #[test]
    fn x_deletes_display_selection_from_backing() {
        let mut app = app_with(vec![Task::new("A"), done("B")]);
        assert!(press(&mut app, "x"));
        assert_eq!(app.tasks, vec![done("B")]);
    }

    #[test]
    fn x_on_last_display_row_clamps() {
        let mut app = app_with(vec![Task::new("A"), Task::new("B")]);
        press(&mut app, "w");
        assert_eq!(app.selected_task, 1);
        press(&mut app, "x");
        assert_eq!(app.selected_task, 0);
        press(&mut app, "x");
        assert!(app.tasks.is_empty());
        assert_eq!(selection(&app), (0, None));
        assert!(!press(&mut app, "x"));
    }

    #[test]
    fn x_on_subtask_clamps_within_subtasks() {
        let mut app = app_with(vec![task("A", &["a1", "a2"])]);
        press(&mut app, "ss");
        assert_eq!(selection(&app), (0, Some(1)));
        press(&mut app, "x");
        assert_eq!(selection(&app), (0, Some(0)));
        press(&mut app, "x");
        assert_eq!(selection(&app), (0, None));
        assert_eq!(app.tasks.len(), 1);
        assert!(app.tasks[0].subtasks.is_empty());
    }

    #[test]
    fn deleting_from_every_selection_stays_in_bounds() {
        let build = || {
            app_with(vec![
                task("A", &["a1", "a2"]),
                done("B"),
                task("C", &["c1"]),
            ])
        };
        let rows = 6;
        for start in 0..rows {
            let mut app = build();
            for _ in 0..start {
                press(&mut app, "s");
            }
            for _ in 0..10 {
                press(&mut app, "x");
                let len = app.tasks.len();
                assert!(app.selected_task < len.max(1));
                if let Some(i) = app.selected_subtask {
                    assert!(i < app.selected().unwrap().subtasks.len());
                }
            }
            assert!(app.tasks.is_empty());
        }
    }

    // --- folding ---

    #[test]
    fn d_expands_and_enters_first_subtask() {
        let mut t = task("A", &["a1", "a2"]);
        t.collapsed = true;
        let mut app = app_with(vec![t]);
        assert!(press(&mut app, "d"));
        assert!(!app.tasks[0].collapsed);
        assert_eq!(selection(&app), (0, Some(0)));
    }

    #[test]
    fn d_collapses_expanded_task() {
        let mut app = app_with(vec![task("A", &["a1"])]);
        assert!(press(&mut app, "d"));
        assert!(app.tasks[0].collapsed);
        assert_eq!(selection(&app), (0, None));
    }

    #[test]
    fn d_on_subtask_row_does_nothing() {
        let mut app = app_with(vec![task("A", &["a1"])]);
        press(&mut app, "s");
        assert!(!press(&mut app, "d"));
        assert!(!app.tasks[0].collapsed);
    }

    #[test]
    fn d_on_childless_task_toggles_flag_only() {
        let mut app = app_with(vec![task("A", &[])]);
        press(&mut app, "d");
        assert!(app.tasks[0].collapsed);
        assert_eq!(selection(&app), (0, None));
    }

    #[test]
    fn a_leaves_subtask_then_collapses() {
        let mut app = app_with(vec![task("A", &["a1"])]);
        press(&mut app, "s");
        assert!(!press(&mut app, "a"));
        assert_eq!(selection(&app), (0, None));
        assert!(!app.tasks[0].collapsed);
        assert!(press(&mut app, "a"));
        assert!(app.tasks[0].collapsed);
        assert!(!press(&mut app, "a"));
    }

    // --- modes ---

    #[test]
    fn q_enters_task_creation() {
        let mut app = app_with(vec![]);
        press(&mut app, "q");
        assert_eq!(app.mode, Mode::CreatingTask);
        assert!(app.entry.text.is_empty());
    }

    #[test]
    fn e_requires_task_row() {
        let mut app = app_with(vec![task("A", &["a1"])]);
        press(&mut app, "s");
        press(&mut app, "e");
        assert_eq!(app.mode, Mode::Navigate);
        press(&mut app, "a");
        press(&mut app, "e");
        assert_eq!(app.mode, Mode::CreatingSubtask { task: 0 });
    }

    #[test]
    fn e_on_empty_list_is_noop() {
        let mut app = app_with(vec![]);
        press(&mut app, "e");
        assert_eq!(app.mode, Mode::Navigate);
    }

    #[test]
    fn r_prefills_selected_text() {
        let mut app = app_with(vec![task("A", &["a1"])]);
        press(&mut app, "sr");
        assert_eq!(app.entry.text, "a1");
        assert_eq!(app.entry.cursor, 2);
        assert!(matches!(app.mode, Mode::Renaming(_)));
    }

    #[test]
    fn i_shows_help_until_next_key() {
        let mut app = app_with(vec![Task::new("A"), Task::new("B")]);
        press(&mut app, "i");
        assert!(app.show_help);
        assert_eq!(selection(&app), (0, None));
        press(&mut app, "s");
        assert!(!app.show_help);
        assert_eq!(selection(&app), (1, None));
    }

    #[test]
    fn uppercase_and_unknown_keys_are_ignored() {
        let mut app = app_with(vec![Task::new("A")]);
        assert!(!press(&mut app, "XSz9"));
        assert_eq!(app.tasks.len(), 1);
    }
}
