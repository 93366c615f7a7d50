use crate::model::{Subtask, Task};

/// Trim entry text; blank input yields None
pub fn clean_entry(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Append a task. Returns its backing index, or None for blank text.
pub fn add_task(tasks: &mut Vec<Task>, text: &str) -> Option<usize> {
    let text = clean_entry(text)?;
    tasks.push(Task::new(text));
    Some(tasks.len() - 1)
}

/// Append a subtask. Returns its index, or None for blank text.
/// A collapsed parent is expanded so the new subtask is visible.
pub fn add_subtask(task: &mut Task, text: &str) -> Option<usize> {
    let text = clean_entry(text)?;
    task.subtasks.push(Subtask::new(text));
    task.collapsed = false;
    Some(task.subtasks.len() - 1)
}

/// Flip a task's completion and cascade the new value to its subtasks
pub fn toggle_task(task: &mut Task) {
    task.completed = !task.completed;
    let completed = task.completed;
    for subtask in &mut task.subtasks {
        subtask.completed = completed;
    }
}

/// Flip a single subtask. The parent is untouched.
pub fn toggle_subtask(subtask: &mut Subtask) {
    subtask.completed = !subtask.completed;
}

/// Replace `text` with trimmed `new_text`. Blank input leaves it alone.
pub fn rename(text: &mut String, new_text: &str) -> bool {
    match clean_entry(new_text) {
        Some(clean) => {
            *text = clean.to_string();
            true
        }
        None => false,
    }
}
