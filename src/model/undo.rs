use serde::{Deserialize, Serialize};

use crate::model::task::Task;

/// A reversible destructive operation, captured before it takes effect
/// so it can be undone later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum UndoEntry {
    /// A task that was removed from the repository
    Delete { task: Task },
}
