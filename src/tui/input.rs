use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::task::Status;
use crate::ops::undo_ops;

use super::app::{App, Mode};

/// Top-level key dispatch: routes to the handler for the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Search => handle_search(app, key),
        Mode::Add => handle_add(app, key),
        Mode::ConfirmDelete => handle_confirm(app, key),
    }
}

fn handle_navigate(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Char('q')) => {
            app.should_quit = true;
        }

        // Cursor movement
        (KeyModifiers::NONE, KeyCode::Char('j')) | (_, KeyCode::Down) => {
            let len = app.visible().len();
            if len > 0 && app.cursor + 1 < len {
                app.cursor += 1;
            }
        }
        (KeyModifiers::NONE, KeyCode::Char('k')) | (_, KeyCode::Up) => {
            app.cursor = app.cursor.saturating_sub(1);
        }

        // Enter search mode, seeded with the applied query
        (KeyModifiers::NONE, KeyCode::Char('/')) => {
            app.mode = Mode::Search;
            app.search_input = app.query.clone();
        }

        // Cycle the status filter (applies immediately, no debounce)
        (KeyModifiers::NONE, KeyCode::Char('f')) => {
            app.filter = app.filter.cycled();
            app.clamp_cursor();
        }

        // Add a task
        (KeyModifiers::NONE, KeyCode::Char('a')) => {
            app.mode = Mode::Add;
            app.add_input.clear();
        }

        // Toggle todo/done on the selected task
        (KeyModifiers::NONE, KeyCode::Char(' ')) => {
            if let Some(id) = app.selected_task().map(|t| t.id.clone()) {
                match app.repo.toggle_status(&id) {
                    Some(Status::Done) => app.notify("marked done"),
                    Some(_) => app.notify("reopened"),
                    None => {}
                }
                app.clamp_cursor();
            }
        }

        // Delete requires confirmation first
        (KeyModifiers::NONE, KeyCode::Char('d')) => {
            if let Some(task) = app.selected_task() {
                app.pending_delete = Some(task.id.clone());
                app.mode = Mode::ConfirmDelete;
            }
        }

        // Undo the most recent delete
        (KeyModifiers::NONE, KeyCode::Char('u')) => {
            match undo_ops::undo(&mut app.repo, &mut app.undo_log) {
                Some(task) => app.notify(format!("restored \"{}\"", task.title)),
                None => app.notify("nothing to undo"),
            }
            app.clamp_cursor();
        }

        _ => {}
    }
}

fn handle_search(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Cancel: revert to the applied query, drop any pending one
        (_, KeyCode::Esc) => {
            app.mode = Mode::Navigate;
            app.search_input.clear();
            app.pending_query.cancel();
        }

        // Apply immediately, skipping the remaining debounce window
        (_, KeyCode::Enter) => {
            app.pending_query.cancel();
            app.query = app.search_input.clone();
            app.mode = Mode::Navigate;
            app.clamp_cursor();
        }

        // Each edit reschedules the debounced query; superseded
        // keystrokes are discarded unseen
        (_, KeyCode::Backspace) => {
            app.search_input.pop();
            app.pending_query.schedule(app.search_input.clone());
        }
        (_, KeyCode::Char(c)) => {
            app.search_input.push(c);
            app.pending_query.schedule(app.search_input.clone());
        }

        _ => {}
    }
}

fn handle_add(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => {
            app.mode = Mode::Navigate;
            app.add_input.clear();
        }
        (_, KeyCode::Enter) => {
            match app.repo.add(&app.add_input, None, None, false) {
                Some(task) => {
                    app.notify(format!("added \"{}\"", task.title));
                    app.cursor = 0;
                }
                // Blank title: nothing created
                None => app.notify("nothing added: title is empty"),
            }
            app.add_input.clear();
            app.mode = Mode::Navigate;
        }
        (_, KeyCode::Backspace) => {
            app.add_input.pop();
        }
        (_, KeyCode::Char(c)) => {
            app.add_input.push(c);
        }
        _ => {}
    }
}

fn handle_confirm(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Confirm: y
        (KeyModifiers::NONE, KeyCode::Char('y')) => {
            app.mode = Mode::Navigate;
            if let Some(id) = app.pending_delete.take()
                && let Some(task) = undo_ops::delete_task(&mut app.repo, &mut app.undo_log, &id)
            {
                app.notify(format!("deleted \"{}\" (u to undo)", task.title));
                app.clamp_cursor();
            }
        }
        // Cancel: n or Esc
        (KeyModifiers::NONE, KeyCode::Char('n')) | (_, KeyCode::Esc) => {
            app.pending_delete = None;
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store::Store;
    use crate::model::config::UiConfig;
    use crate::ops::repository::TaskRepository;
    use crate::ops::undo_log::UndoLog;
    use tempfile::TempDir;

    fn app_in(dir: &TempDir) -> App {
        let store = Store::init(dir.path(), true).unwrap();
        let repo = TaskRepository::load(store.clone());
        let log = UndoLog::load(store);
        App::new(repo, log, "test".into(), &UiConfig::default())
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn add_mode_creates_a_task_on_enter() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.mode, Mode::Add);
        type_str(&mut app, "buy paint");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.repo.len(), 1);
        assert_eq!(app.repo.tasks()[0].title, "buy paint");
        assert_eq!(app.notice.as_deref(), Some("added \"buy paint\""));
    }

    #[test]
    fn add_mode_rejects_blank_title() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);

        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "   ");
        press(&mut app, KeyCode::Enter);

        assert!(app.repo.is_empty());
        assert_eq!(app.notice.as_deref(), Some("nothing added: title is empty"));
    }

    #[test]
    fn space_toggles_the_selected_task() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.repo.add("flip me", None, None, false).unwrap();

        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.repo.tasks()[0].status, Status::Done);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.repo.tasks()[0].status, Status::Todo);
    }

    #[test]
    fn delete_needs_confirmation() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.repo.add("doomed", None, None, false).unwrap();

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.mode, Mode::ConfirmDelete);
        assert_eq!(app.repo.len(), 1);

        // n cancels
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.repo.len(), 1);
        assert!(app.undo_log.is_empty());

        // y deletes and logs
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.repo.is_empty());
        assert_eq!(app.undo_log.len(), 1);
    }

    #[test]
    fn undo_restores_the_last_delete() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.repo.add("doomed", None, None, false).unwrap();
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));

        press(&mut app, KeyCode::Char('u'));
        assert_eq!(app.repo.len(), 1);
        assert_eq!(app.repo.tasks()[0].title, "doomed");
        assert_eq!(app.notice.as_deref(), Some("restored \"doomed\""));
    }

    #[test]
    fn search_keystrokes_are_debounced_not_applied_directly() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.repo.add("Ship milestone", None, None, false).unwrap();
        app.repo.add("Email team", None, None, false).unwrap();

        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "mile");

        // Applied query is untouched until the debounce fires
        assert_eq!(app.query, "");
        assert!(app.pending_query.is_pending());
        assert_eq!(app.visible().len(), 2);

        // Enter short-circuits the window
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.query, "mile");
        assert!(!app.pending_query.is_pending());
        assert_eq!(app.visible().len(), 1);
    }

    #[test]
    fn escape_cancels_a_pending_search() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "mil");
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.query, "");
        assert!(!app.pending_query.is_pending());
        assert_eq!(app.mode, Mode::Navigate);
    }

    #[test]
    fn filter_cycles_on_f() {
        use crate::ops::view::StatusFilter;
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.filter, StatusFilter::Todo);
    }
}
