//! Display order: incomplete tasks first, then completed, each group in
//! backing order. The backing list itself is never reordered.

use crate::model::Task;

/// Backing index for every display position
pub fn display_order(tasks: &[Task]) -> Vec<usize> {
    let open = (0..tasks.len()).filter(|&i| !tasks[i].completed);
    let done = (0..tasks.len()).filter(|&i| tasks[i].completed);
    open.chain(done).collect()
}

/// Map a display position to its backing index
pub fn backing_index(tasks: &[Task], display: usize) -> Option<usize> {
    display_order(tasks).get(display).copied()
}

/// Map a backing index to its current display position
pub fn display_index(tasks: &[Task], backing: usize) -> Option<usize> {
    display_order(tasks).iter().position(|&i| i == backing)
}
