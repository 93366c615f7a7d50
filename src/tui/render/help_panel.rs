use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::tui::app::App;

/// Key bindings shown by `i` and on an empty list
pub const BINDINGS: &[(&str, &str)] = &[
    ("i", "Show these instructions"),
    ("q", "New task"),
    ("w / s", "Move up / down"),
    ("r", "Rewrite task or subtask"),
    ("Space", "Mark complete / incomplete"),
    ("e", "Add a subtask"),
    ("x", "Delete task or subtask"),
    ("d", "Unfold / fold subtasks"),
    ("a", "Back to task / fold"),
    ("Enter", "Confirm entry"),
    ("Esc", "Cancel entry"),
    ("Click", "Check / uncheck a box"),
    ("Ctrl+W", "Close"),
];

/// Render the static instructions in place of the list
pub fn render_help_panel(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(" Instructions", header_style)),
        Line::from(""),
    ];
    for (key, desc) in BINDINGS {
        add_binding(&mut lines, key, desc, key_style, desc_style);
    }

    let paragraph = Paragraph::new(lines)
        .style(Style::default().bg(bg))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 9;
    let padded_key = format!(" {:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}
