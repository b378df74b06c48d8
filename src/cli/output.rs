use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::model::task::{Status, Task};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub id: String,
    pub title: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate_minutes: Option<u32>,
    pub private: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Task> for TaskJson {
    fn from(task: &Task) -> Self {
        TaskJson {
            id: task.id.clone(),
            title: task.title.clone(),
            status: task.status,
            due: task.due,
            estimate_minutes: task.estimate_minutes,
            private: task.private_email,
            created_at: task.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct TaskListJson {
    pub query: String,
    pub filter: String,
    pub tasks: Vec<TaskJson>,
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// One task per line: `[x] 01J9…  Title  (due 2026-09-01, 30m, private)`
pub fn task_line(task: &Task) -> String {
    let mut extras = Vec::new();
    if let Some(due) = task.due {
        extras.push(format!("due {}", due));
    }
    if let Some(minutes) = task.estimate_minutes {
        extras.push(format!("{}m", minutes));
    }
    if task.private_email {
        extras.push("private".to_string());
    }
    let suffix = if extras.is_empty() {
        String::new()
    } else {
        format!("  ({})", extras.join(", "))
    };
    format!(
        "[{}] {}  {}{}",
        task.status.marker_char(),
        task.id,
        task.title,
        suffix
    )
}

pub fn print_task_list(tasks: &[&Task]) {
    if tasks.is_empty() {
        println!("no tasks");
        return;
    }
    for task in tasks {
        println!("{}", task_line(task));
    }
}
