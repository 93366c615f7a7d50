use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::display::display_order;
use crate::tui::app::{App, EditTarget, Mode};
use crate::util::unicode::{display_col_to_byte_offset, display_width, truncate_to_width};

use super::help_panel::render_help_panel;

/// Fold marker on a task row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fold {
    /// No subtasks
    Leaf,
    Expanded,
    Collapsed,
}

/// What an entry row creates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Task,
    Subtask,
}

/// One line of the list, in display order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row<'a> {
    Task {
        backing: usize,
        text: &'a str,
        completed: bool,
        fold: Fold,
        selected: bool,
        editing: bool,
    },
    Subtask {
        task: usize,
        index: usize,
        text: &'a str,
        completed: bool,
        selected: bool,
        editing: bool,
    },
    Entry { kind: EntryKind, text: &'a str },
}

impl Row<'_> {
    /// Rows that take the terminal cursor
    pub fn is_editing(&self) -> bool {
        match self {
            Row::Task { editing, .. } | Row::Subtask { editing, .. } => *editing,
            Row::Entry { .. } => true,
        }
    }

    pub fn is_selected(&self) -> bool {
        match self {
            Row::Task { selected, .. } | Row::Subtask { selected, .. } => *selected,
            Row::Entry { .. } => false,
        }
    }

    /// Indented one level under its task
    fn is_nested(&self) -> bool {
        matches!(
            self,
            Row::Subtask { .. }
                | Row::Entry {
                    kind: EntryKind::Subtask,
                    ..
                }
        )
    }
}

/// Build the rows for the current state. Pure: no IO, no terminal.
pub fn build_rows(app: &App) -> Vec<Row<'_>> {
    let renaming = match app.mode {
        Mode::Renaming(target) => Some(target),
        _ => None,
    };
    let mut rows = Vec::new();

    for (display, &backing) in display_order(&app.tasks).iter().enumerate() {
        let task = &app.tasks[backing];
        let is_current = display == app.selected_task;
        let editing = renaming
            == Some(EditTarget {
                task: backing,
                subtask: None,
            });
        let fold = match (task.subtasks.is_empty(), task.collapsed) {
            (true, _) => Fold::Leaf,
            (false, false) => Fold::Expanded,
            (false, true) => Fold::Collapsed,
        };
        rows.push(Row::Task {
            backing,
            text: if editing { &app.entry.text } else { &task.text },
            completed: task.completed,
            fold,
            selected: is_current && app.selected_subtask.is_none(),
            editing,
        });

        if task.shows_subtasks() {
            for (index, subtask) in task.subtasks.iter().enumerate() {
                let editing = renaming
                    == Some(EditTarget {
                        task: backing,
                        subtask: Some(index),
                    });
                rows.push(Row::Subtask {
                    task: backing,
                    index,
                    text: if editing { &app.entry.text } else { &subtask.text },
                    completed: subtask.completed,
                    selected: is_current && app.selected_subtask == Some(index),
                    editing,
                });
            }
        }

        if app.mode == (Mode::CreatingSubtask { task: backing }) {
            rows.push(Row::Entry {
                kind: EntryKind::Subtask,
                text: &app.entry.text,
            });
        }
    }

    if app.mode == Mode::CreatingTask {
        rows.push(Row::Entry {
            kind: EntryKind::Task,
            text: &app.entry.text,
        });
    }

    rows
}

/// True when the list area shows the help panel instead of rows
pub fn shows_help(app: &App) -> bool {
    app.show_help || (app.tasks.is_empty() && app.mode != Mode::CreatingTask)
}

/// Column where row text starts: selection bar, indent, then `[ ] `
fn text_column(nested: bool) -> usize {
    if nested { 9 } else { 7 }
}

/// Cells available to the open entry's text in the current list area
pub fn entry_text_width(app: &App) -> usize {
    let nested = matches!(
        app.mode,
        Mode::CreatingSubtask { .. }
            | Mode::Renaming(EditTarget {
                subtask: Some(_),
                ..
            })
    );
    (app.list_area.width as usize).saturating_sub(text_column(nested))
}

/// First row shown so the focus row (entry, else selection) is visible
fn list_scroll(rows: &[Row], height: usize) -> usize {
    let focus = rows
        .iter()
        .position(|r| r.is_editing())
        .or_else(|| rows.iter().position(|r| r.is_selected()))
        .unwrap_or(0);
    (focus + 1).saturating_sub(height)
}

/// The task or subtask whose checkbox is drawn at screen cell (`column`, `row`)
pub fn checkbox_at(app: &App, column: u16, row: u16) -> Option<EditTarget> {
    let area = app.list_area;
    if shows_help(app) || !area.contains(Position::new(column, row)) {
        return None;
    }
    let rows = build_rows(app);
    let scroll = list_scroll(&rows, area.height as usize);
    let hit = rows.get(scroll + (row - area.y) as usize)?;
    let target = match *hit {
        Row::Task { backing, .. } => EditTarget {
            task: backing,
            subtask: None,
        },
        Row::Subtask { task, index, .. } => EditTarget {
            task,
            subtask: Some(index),
        },
        Row::Entry { .. } => return None,
    };
    // `[ ]` occupies the three cells before the space ahead of the text
    let box_end = text_column(hit.is_nested()) - 1;
    let x = (column - area.x) as usize;
    (box_end - 3..box_end).contains(&x).then_some(target)
}

fn checkbox(completed: bool) -> &'static str {
    if completed { "[x] " } else { "[ ] " }
}

/// Leading cells before the row text (selection bar, indent, checkbox)
fn row_prefix(row: &Row) -> String {
    let (indent, completed) = match row {
        Row::Task { fold, completed, .. } => {
            let marker = match fold {
                Fold::Leaf => "  ",
                Fold::Expanded => "\u{25BE} ",
                Fold::Collapsed => "\u{25B8} ",
            };
            (marker, *completed)
        }
        Row::Subtask { completed, .. } => ("    ", *completed),
        Row::Entry {
            kind: EntryKind::Task,
            ..
        } => ("  ", false),
        Row::Entry {
            kind: EntryKind::Subtask,
            ..
        } => ("    ", false),
    };
    format!("{indent}{}", checkbox(completed))
}

/// Render the task list (or help panel) into `area`
pub fn render_task_list(frame: &mut Frame, app: &App, area: Rect) {
    if shows_help(app) {
        render_help_panel(frame, app, area);
        return;
    }

    let bg = app.theme.background;
    let width = area.width as usize;
    let height = area.height as usize;
    let rows = build_rows(app);
    let scroll = list_scroll(&rows, height);

    let mut lines: Vec<Line> = Vec::new();
    let mut cursor: Option<Position> = None;

    for (i, row) in rows.iter().enumerate().skip(scroll).take(height) {
        let highlighted = if app.is_editing() {
            row.is_editing()
        } else {
            row.is_selected()
        };
        let row_bg = if highlighted { app.theme.selection_bg } else { bg };
        let bar = if highlighted { "\u{258C}" } else { " " };
        let prefix = row_prefix(row);
        let prefix_width = 1 + display_width(&prefix);
        let text_budget = width.saturating_sub(prefix_width);

        let (text, completed) = match row {
            Row::Task { text, completed, .. } | Row::Subtask { text, completed, .. } => {
                (*text, *completed)
            }
            Row::Entry { text, .. } => (*text, false),
        };

        let mut text_style = Style::default().fg(app.theme.item_color(completed)).bg(row_bg);
        if highlighted {
            text_style = text_style.fg(app.theme.text_bright);
        }
        if completed {
            text_style = text_style.add_modifier(Modifier::CROSSED_OUT);
        }

        let shown = if row.is_editing() {
            let h_scroll = app.entry.h_scroll.min(app.entry.cursor_col());
            let col = prefix_width + app.entry.cursor_col() - h_scroll;
            cursor = Some(Position::new(
                area.x + col.min(width.saturating_sub(1)) as u16,
                area.y + (i - scroll) as u16,
            ));
            let visible = &text[display_col_to_byte_offset(text, h_scroll)..];
            visible.to_string()
        } else {
            truncate_to_width(text, text_budget)
        };

        let mut spans = vec![
            Span::styled(
                bar,
                Style::default().fg(app.theme.selection_border).bg(row_bg),
            ),
            Span::styled(
                prefix,
                Style::default().fg(app.theme.item_color(completed)).bg(row_bg),
            ),
        ];
        match row {
            Row::Entry { kind, .. } if text.is_empty() => {
                let placeholder = match kind {
                    EntryKind::Task => "Enter new task",
                    EntryKind::Subtask => "Enter new subtask",
                };
                spans.push(Span::styled(
                    placeholder,
                    Style::default().fg(app.theme.dim).bg(row_bg),
                ));
            }
            _ => spans.push(Span::styled(shown, text_style)),
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
    if let Some(position) = cursor {
        frame.set_cursor_position(position);
    }
}
