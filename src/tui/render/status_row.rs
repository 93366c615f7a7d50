use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

/// Render the status row (bottom of the popup)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let dim = Style::default().fg(app.theme.dim).bg(bg);

    let line = if let Some(ref error) = app.status_error {
        Line::from(Span::styled(
            format!(" {error}"),
            Style::default().fg(app.theme.red).bg(bg),
        ))
    } else {
        let hint = match app.mode {
            Mode::Navigate => " i help  q new  ^W close",
            Mode::CreatingTask | Mode::CreatingSubtask { .. } | Mode::Renaming(_) => {
                " Enter confirm  Esc cancel"
            }
        };
        Line::from(Span::styled(hint, dim))
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
