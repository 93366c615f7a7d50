use std::io;
use std::path::PathBuf;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::Rect;
use ratatui::{Terminal, TerminalOptions, Viewport};

use crate::io::store::{FileKv, KvStore, TaskStore};
use crate::model::{PopupConfig, Task, UiConfig};
use crate::ops::display::backing_index;
use crate::util::unicode::{
    byte_offset_to_display_col, display_width, next_grapheme_boundary, prev_grapheme_boundary,
};

use super::input;
use super::launcher::popup_area;
use super::render;
use super::theme::Theme;

/// A task or subtask addressed by backing indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditTarget {
    pub task: usize,
    pub subtask: Option<usize>,
}

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Entry row after the task list
    CreatingTask,
    /// Entry row under the task at this backing index
    CreatingSubtask { task: usize },
    /// Inline rename of an existing row
    Renaming(EditTarget),
}

/// Single-line text entry with a byte cursor on grapheme boundaries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryBuffer {
    pub text: String,
    pub cursor: usize,
    /// First display column shown when the text is wider than the row
    pub h_scroll: usize,
}

impl EntryBuffer {
    /// Buffer holding `text` with the cursor at the end
    pub fn with_text(text: &str) -> Self {
        EntryBuffer {
            text: text.to_string(),
            cursor: text.len(),
            h_scroll: 0,
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
        self.h_scroll = 0;
    }

    pub fn insert(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.text, self.cursor) {
            self.text.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.text, self.cursor) {
            self.text.replace_range(self.cursor..next, "");
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Take the text out, leaving the buffer empty
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        self.h_scroll = 0;
        std::mem::take(&mut self.text)
    }

    /// Display column of the cursor within the text
    pub fn cursor_col(&self) -> usize {
        byte_offset_to_display_col(&self.text, self.cursor)
    }

    /// Keep the cursor inside a `width`-cell window, with a margin at either edge
    pub fn update_h_scroll(&mut self, width: usize) {
        if width == 0 {
            return;
        }
        let cursor_col = self.cursor_col();
        let margin = 10.min(width / 3);
        let total = display_width(&self.text);
        // A cursor at the end needs one extra column
        let content_end = if cursor_col >= total { total + 1 } else { total };

        if cursor_col >= self.h_scroll + width.saturating_sub(margin) {
            self.h_scroll = cursor_col.saturating_sub(width.saturating_sub(margin + 1));
        }
        self.h_scroll = self
            .h_scroll
            .min(content_end.saturating_sub(width.saturating_sub(1)));
        if cursor_col < self.h_scroll + margin {
            self.h_scroll = cursor_col.saturating_sub(margin);
        }
    }
}

/// Main application state
pub struct App {
    /// Backing task list, in storage order
    pub tasks: Vec<Task>,
    /// Display index of the selected task
    pub selected_task: usize,
    /// Selected subtask of the selected task (None = task row)
    pub selected_subtask: Option<usize>,
    pub mode: Mode,
    pub entry: EntryBuffer,
    /// Help panel replaces the list until the next key
    pub show_help: bool,
    pub should_quit: bool,
    /// Last persistence failure, shown in the status row
    pub status_error: Option<String>,
    /// Screen cells of the list area, for mouse hits and entry scrolling
    pub list_area: Rect,
    pub theme: Theme,
}

impl App {
    pub fn new(tasks: Vec<Task>, theme: Theme) -> Self {
        App {
            tasks,
            selected_task: 0,
            selected_subtask: None,
            mode: Mode::Navigate,
            entry: EntryBuffer::default(),
            show_help: false,
            should_quit: false,
            status_error: None,
            list_area: Rect::default(),
            theme,
        }
    }

    /// True while a text entry is pending
    pub fn is_editing(&self) -> bool {
        self.mode != Mode::Navigate
    }

    /// Backing index of the selected task
    pub fn selected_backing(&self) -> Option<usize> {
        backing_index(&self.tasks, self.selected_task)
    }

    pub fn selected(&self) -> Option<&Task> {
        self.selected_backing().map(|i| &self.tasks[i])
    }

    pub fn selected_mut(&mut self) -> Option<&mut Task> {
        self.selected_backing().map(|i| &mut self.tasks[i])
    }

    /// The current selection as backing indices
    pub fn selection_target(&self) -> Option<EditTarget> {
        Some(EditTarget {
            task: self.selected_backing()?,
            subtask: self.selected_subtask,
        })
    }

    /// Pull the selection back in bounds after the list changed shape
    pub fn clamp_selection(&mut self) {
        self.selected_task = self.selected_task.min(self.tasks.len().saturating_sub(1));
        let visible = self.selected().map_or(0, |t| {
            if t.shows_subtasks() {
                t.subtasks.len()
            } else {
                0
            }
        });
        self.selected_subtask = match self.selected_subtask {
            Some(_) if visible == 0 => None,
            Some(i) => Some(i.min(visible - 1)),
            None => None,
        };
    }
}

/// Options for opening the popup
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub data_dir: PathBuf,
    pub popup: PopupConfig,
    pub ui: UiConfig,
}

/// Open the popup and run until the user quits
pub fn run(options: LaunchOptions) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = TaskStore::new(FileKv::new(&options.data_dir));
    let tasks = store.load()?;
    tracing::info!(
        data_dir = %options.data_dir.display(),
        count = tasks.len(),
        "opening popup"
    );

    let mut app = App::new(tasks, Theme::from_config(&options.ui));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let area = popup_area(&options.popup, crossterm::terminal::size()?);
    app.list_area = render::list_area(area);
    let mut terminal = Terminal::with_options(
        backend,
        TerminalOptions {
            viewport: Viewport::Fixed(area),
        },
    )?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, &mut store);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    tracing::info!("popup closed");
    result
}

fn run_event_loop<B: Backend, K: KvStore>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    store: &mut TaskStore<K>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        let outcome = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
            Event::Mouse(mouse) => input::handle_mouse(app, mouse),
            _ => input::KeyOutcome::NONE,
        };
        if outcome.persist {
            persist(app, store);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

/// Save the full task list; failures are logged and shown, never fatal
pub fn persist<K: KvStore>(app: &mut App, store: &mut TaskStore<K>) {
    match store.save(&app.tasks) {
        Ok(()) => app.status_error = None,
        Err(e) => {
            tracing::error!(error = %e, "failed to save tasks");
            app.status_error = Some(format!("save failed: {e}"));
        }
    }
}
