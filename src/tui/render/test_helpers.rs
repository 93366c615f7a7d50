use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::{Subtask, Task};
use crate::tui::app::App;
use crate::tui::theme::Theme;

/// Default popup width in cells
pub const POPUP_W: u16 = 50;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// App over the given tasks with the default theme
pub fn app_with_tasks(tasks: Vec<Task>) -> App {
    App::new(tasks, Theme::default())
}

/// Incomplete task with incomplete subtasks
pub fn task(text: &str, subtasks: &[&str]) -> Task {
    let mut t = Task::new(text);
    t.subtasks = subtasks.iter().map(|s| Subtask::new(*s)).collect();
    t
}

/// Completed task without subtasks
pub fn done(text: &str) -> Task {
    let mut t = Task::new(text);
    t.completed = true;
    t
}
