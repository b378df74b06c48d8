use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Todo,
    Doing,
    Done,
}

impl Status {
    /// The character used inside the list marker `[ ]`
    pub fn marker_char(self) -> char {
        match self {
            Status::Todo => ' ',
            Status::Doing => '>',
            Status::Done => 'x',
        }
    }

    /// Display name, matching the serialized form
    pub fn label(self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::Doing => "doing",
            Status::Done => "done",
        }
    }

    /// The mark-done toggle: done → todo, anything else → done.
    ///
    /// No operation sets `doing` today; it only exists in data written by
    /// other means, and the toggle treats it as not-done rather than
    /// cycling through it.
    pub fn toggled(self) -> Status {
        if self == Status::Done {
            Status::Todo
        } else {
            Status::Done
        }
    }
}

/// A single trackable work item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque unique identifier (ULID), assigned once and never reused
    pub id: String,
    /// Task title text (non-empty, trimmed)
    pub title: String,
    /// Optional due date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<NaiveDate>,
    /// Optional effort estimate in minutes (always positive when present)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate_minutes: Option<u32>,
    pub status: Status,
    /// Keep this task out of shared/email views; set at creation
    #[serde(default)]
    pub private_email: bool,
    /// Creation time, set once
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Construct a new todo task with a fresh id. The caller is expected
    /// to have trimmed and validated the title (see `TaskRepository::add`).
    pub fn new(
        title: String,
        due: Option<NaiveDate>,
        estimate_minutes: Option<u32>,
        private_email: bool,
    ) -> Self {
        Task {
            id: Ulid::new().to_string(),
            title,
            due,
            estimate_minutes,
            status: Status::Todo,
            private_email,
            created_at: Utc::now(),
        }
    }
}
