pub mod help_panel;
pub mod status_row;
pub mod task_list;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders};

use super::app::App;

/// Split the popup's inside into the list area and the status row
fn split_inner(area: Rect) -> [Rect; 2] {
    let inner = Block::default().borders(Borders::ALL).inner(area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // list / help
            Constraint::Length(1), // status row
        ])
        .split(inner);
    [chunks[0], chunks[1]]
}

/// Screen cells of the task list inside a popup drawn at `area`
pub fn list_area(area: Rect) -> Rect {
    split_inner(area)[0]
}

/// Main render function: bordered popup, list area, status row
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let bg_style = Style::default().bg(app.theme.background);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(app.theme.background))
        .title(Span::styled(
            " todo ",
            Style::default().fg(app.theme.highlight).bg(app.theme.background),
        ))
        .style(bg_style);
    frame.render_widget(block, area);

    let [list, status] = split_inner(area);
    task_list::render_task_list(frame, app, list);
    status_row::render_status_row(frame, app, status);
}
