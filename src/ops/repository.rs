use chrono::NaiveDate;

use crate::io::store::{Store, TASKS_KEY};
use crate::model::task::{Status, Task};

/// The ordered task collection, newest first. Every mutation writes the
/// whole collection back to its storage slot (write-through); storage
/// failure is best-effort and never surfaced to the caller.
pub struct TaskRepository {
    store: Store,
    tasks: Vec<Task>,
}

impl TaskRepository {
    /// Load the repository from its storage slot. Missing or corrupt
    /// data yields an empty collection.
    pub fn load(store: Store) -> TaskRepository {
        let tasks = store.load(TASKS_KEY, Vec::new());
        TaskRepository { store, tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Add a new todo task at the front. A title that trims to empty is
    /// rejected: nothing is created and None is returned. On success a
    /// copy of the created task is returned for UI feedback.
    pub fn add(
        &mut self,
        title: &str,
        due: Option<NaiveDate>,
        estimate_minutes: Option<u32>,
        private_email: bool,
    ) -> Option<Task> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let task = Task::new(title.to_string(), due, estimate_minutes, private_email);
        self.tasks.insert(0, task.clone());
        self.persist();
        Some(task)
    }

    /// Flip a task between todo and done (see `Status::toggled`).
    /// Returns the new status, or None if no task has this id.
    pub fn toggle_status(&mut self, id: &str) -> Option<Status> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.status = task.status.toggled();
        let status = task.status;
        self.persist();
        Some(status)
    }

    /// Remove the task with `id`, returning it so the caller can record
    /// it for undo. None if not found (and nothing is persisted).
    pub fn remove(&mut self, id: &str) -> Option<Task> {
        let idx = self.tasks.iter().position(|t| t.id == id)?;
        let task = self.tasks.remove(idx);
        self.persist();
        Some(task)
    }

    /// Reinsert a previously removed task at the front. No duplicate
    /// check: callers must guarantee the id is absent, which holds under
    /// the delete/undo protocol since a restored task was just removed.
    pub fn restore(&mut self, task: Task) {
        self.tasks.insert(0, task);
        self.persist();
    }

    fn persist(&self) {
        // Best-effort write-through
        let _ = self.store.save(TASKS_KEY, &self.tasks);
    }
}
