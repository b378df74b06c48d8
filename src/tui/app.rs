use std::error::Error;
use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::config_io::read_config;
use crate::io::store::Store;
use crate::model::config::UiConfig;
use crate::model::task::Task;
use crate::ops::repository::TaskRepository;
use crate::ops::undo_log::UndoLog;
use crate::ops::view::{StatusFilter, project};
use crate::util::delay::Delayed;

use super::input;
use super::render;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing in the search box
    Search,
    /// Typing a new task title
    Add,
    /// Waiting for y/n on a delete
    ConfirmDelete,
}

/// Main application state. The repository and undo log are owned here
/// and passed into the input handlers; nothing else touches storage.
pub struct App {
    pub repo: TaskRepository,
    pub undo_log: UndoLog,
    pub mode: Mode,
    pub should_quit: bool,
    /// Workspace display name for the header
    pub name: String,

    /// Applied search query (drives the projection)
    pub query: String,
    /// Query being typed; applied through the debounce window
    pub search_input: String,
    /// Debounced query delivery; each keystroke replaces the pending one
    pub pending_query: Delayed<String>,
    pub filter: StatusFilter,

    /// Title being typed in add mode
    pub add_input: String,
    /// Cursor index into the visible (projected) list
    pub cursor: usize,
    /// Id of the task awaiting delete confirmation
    pub pending_delete: Option<String>,

    /// One-line feedback, cleared automatically shortly after posting
    pub notice: Option<String>,
    notice_clear: Delayed<()>,
}

impl App {
    pub fn new(repo: TaskRepository, undo_log: UndoLog, name: String, ui: &UiConfig) -> App {
        App {
            repo,
            undo_log,
            mode: Mode::Navigate,
            should_quit: false,
            name,
            query: String::new(),
            search_input: String::new(),
            pending_query: Delayed::new(Duration::from_millis(ui.debounce_ms)),
            filter: StatusFilter::All,
            add_input: String::new(),
            cursor: 0,
            pending_delete: None,
            notice: None,
            notice_clear: Delayed::new(Duration::from_millis(ui.notice_ms)),
        }
    }

    /// The visible tasks under the current query and filter
    pub fn visible(&self) -> Vec<&Task> {
        project(self.repo.tasks(), &self.query, self.filter)
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.visible().get(self.cursor).copied()
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    /// Post a notice; it clears itself after the configured delay.
    pub fn notify(&mut self, text: impl Into<String>) {
        self.notice = Some(text.into());
        self.notice_clear.schedule(());
    }

    /// Fire any due timers: debounced query application and notice
    /// expiry. Called once per event-loop iteration.
    pub fn tick(&mut self) {
        if let Some(query) = self.pending_query.poll() {
            self.query = query;
            self.clamp_cursor();
        }
        if self.notice_clear.poll().is_some() {
            self.notice = None;
        }
    }
}

/// Run the TUI application
pub fn run(dir_override: Option<&str>) -> Result<(), Box<dyn Error>> {
    let store = match dir_override {
        Some(dir) => Store::open(Path::new(dir))?,
        None => Store::discover(&std::env::current_dir()?)?,
    };
    let config = read_config(store.dir());
    let repo = TaskRepository::load(store.clone());
    let undo_log = UndoLog::load(store);
    let mut app = App::new(repo, undo_log, config.workspace.name.clone(), &config.ui);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        // Short poll so the debounce and notice timers stay responsive
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }
        app.tick();

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use tempfile::TempDir;

    fn app_in(dir: &TempDir) -> App {
        let store = Store::init(dir.path(), true).unwrap();
        let repo = TaskRepository::load(store.clone());
        let log = UndoLog::load(store);
        App::new(repo, log, "test".into(), &UiConfig::default())
    }

    #[test]
    fn visible_reflects_query_and_filter() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.repo.add("Ship milestone", None, None, false).unwrap();
        app.repo.add("Email team", None, None, false).unwrap();

        assert_eq!(app.visible().len(), 2);
        app.query = "mile".into();
        assert_eq!(app.visible().len(), 1);
        assert_eq!(app.visible()[0].title, "Ship milestone");
    }

    #[test]
    fn debounced_query_applies_on_tick() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.repo.add("Ship milestone", None, None, false).unwrap();

        let t0 = Instant::now();
        app.pending_query.schedule_at("mile".into(), t0);
        // Not yet due, query unchanged
        assert_eq!(app.query, "");
        if let Some(q) = app.pending_query.poll_at(t0 + Duration::from_millis(150)) {
            app.query = q;
        }
        assert_eq!(app.query, "mile");
    }

    #[test]
    fn notice_clears_after_expiry() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.notify("added");
        assert!(app.notice.is_some());
        // Force the deadline into the past, then tick
        app.notice_clear.schedule_at((), Instant::now() - Duration::from_secs(1));
        app.tick();
        assert!(app.notice.is_none());
    }

    #[test]
    fn cursor_clamps_when_the_view_shrinks() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.repo.add("one", None, None, false).unwrap();
        app.repo.add("two", None, None, false).unwrap();
        app.cursor = 1;

        app.query = "two".into();
        app.clamp_cursor();
        assert_eq!(app.cursor, 0);
    }
}
