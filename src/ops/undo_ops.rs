//! The delete-with-undo protocol: the one place with a sequencing
//! contract between the repository and the undo log. The removal
//! happens first and the log entry is only written for a task that was
//! actually present, so every logged delete is recoverable and undo
//! always restores the most recently deleted task first.

use crate::model::task::Task;
use crate::model::undo::UndoEntry;
use crate::ops::repository::TaskRepository;
use crate::ops::undo_log::UndoLog;

/// Remove a task and capture it in the undo log. Returns the removed
/// task, or None if no task has this id (nothing is logged).
///
/// Callers are expected to have already confirmed the deletion with the
/// user; this function performs it unconditionally.
pub fn delete_task(repo: &mut TaskRepository, log: &mut UndoLog, id: &str) -> Option<Task> {
    let task = repo.remove(id)?;
    log.push(UndoEntry::Delete { task: task.clone() });
    Some(task)
}

/// Reverse the most recent logged operation. Returns the restored task,
/// or None if the log is empty.
pub fn undo(repo: &mut TaskRepository, log: &mut UndoLog) -> Option<Task> {
    match log.pop()? {
        UndoEntry::Delete { task } => {
            repo.restore(task.clone());
            Some(task)
        }
    }
}
