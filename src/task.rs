//! Tasks, either personal or owned by an event

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::NaiveDateTime;

use crate::error::UnknownVariant;
use crate::utils::parse_date;

/// Where a task stands in the workflow.
///
/// Variants are declared in workflow order, so the derived `Ord` is the order used when sorting by status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Done")]
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::ToDo, TaskStatus::InProgress, TaskStatus::Done];

    pub fn is_done(&self) -> bool {
        *self == TaskStatus::Done
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::ToDo
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TaskStatus::ToDo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        };
        f.pad(name)
    }
}

impl FromStr for TaskStatus {
    type Err = UnknownVariant;

    /// Accepts the display names as well as relaxed spellings such as `todo`, `in-progress` or `DONE`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match squash(s).as_str() {
            "todo" => Ok(TaskStatus::ToDo),
            "inprogress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            _ => Err(UnknownVariant::new("status", s)),
        }
    }
}


/// How urgent a task is.
///
/// Declared from the most to the least urgent, so that the derived `Ord` puts `Urgent` first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Urgent,
    High,
    Normal,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Priority::Urgent, Priority::High, Priority::Normal, Priority::Low];
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Normal
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Priority::Urgent => "Urgent",
            Priority::High => "High",
            Priority::Normal => "Normal",
            Priority::Low => "Low",
        };
        f.pad(name)
    }
}

impl FromStr for Priority {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match squash(s).as_str() {
            "urgent" => Ok(Priority::Urgent),
            "high" => Ok(Priority::High),
            "normal" => Ok(Priority::Normal),
            "low" => Ok(Priority::Low),
            _ => Err(UnknownVariant::new("priority", s)),
        }
    }
}

/// Lowercase and drop separators, so that `In Progress`, `in-progress` and `in_progress` compare equal
fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}


/// A checklist entry inside a task
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Subtask {
    id: String,
    name: String,
    #[serde(default)]
    completed: bool,
}

impl Subtask {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_hyphenated().to_string(),
            name,
            completed: false,
        }
    }

    pub fn id(&self) -> &str        { &self.id          }
    pub fn name(&self) -> &str      { &self.name        }
    pub fn completed(&self) -> bool { self.completed    }

    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }
}


/// A to-do task
///
/// Dates are stored as the strings they were received as. They are parsed on demand, and values
/// that cannot be parsed are treated as absent by every filtering and sorting operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable identifier
    id: String,
    /// The display name of the task
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    /// Display names of the people this task is assigned to
    #[serde(default)]
    assignees: Vec<String>,

    /// Single deadline, used when the task is not scheduled over a period
    #[serde(default, skip_serializing_if = "Option::is_none")]
    due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_date: Option<String>,
    /// Time of day, for display only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_time: Option<String>,

    #[serde(default)]
    status: TaskStatus,
    #[serde(default)]
    priority: Priority,
    /// Standalone task, not owned by an event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    is_personal: Option<bool>,

    #[serde(default)]
    subtasks: Vec<Subtask>,
}


impl Task {
    /// Create a brand new task, with a random ID and no dates
    pub fn new(name: String) -> Self {
        let new_id = Uuid::new_v4().to_hyphenated().to_string();
        Self::with_id(new_id, name)
    }

    /// Create a task with a known ID
    pub fn with_id(id: String, name: String) -> Self {
        Self {
            id,
            name,
            description: None,
            assignees: Vec::new(),
            due_date: None,
            start_date: None,
            end_date: None,
            start_time: None,
            end_time: None,
            status: TaskStatus::default(),
            priority: Priority::default(),
            is_personal: None,
            subtasks: Vec::new(),
        }
    }

    pub fn id(&self) -> &str                    { &self.id          }
    pub fn name(&self) -> &str                  { &self.name        }
    pub fn description(&self) -> Option<&str>   { self.description.as_deref() }
    pub fn assignees(&self) -> &[String]        { &self.assignees   }
    pub fn due_date(&self) -> Option<&str>      { self.due_date.as_deref()   }
    pub fn start_date(&self) -> Option<&str>    { self.start_date.as_deref() }
    pub fn end_date(&self) -> Option<&str>      { self.end_date.as_deref()   }
    pub fn start_time(&self) -> Option<&str>    { self.start_time.as_deref() }
    pub fn end_time(&self) -> Option<&str>      { self.end_time.as_deref()   }
    pub fn status(&self) -> TaskStatus          { self.status       }
    pub fn priority(&self) -> Priority          { self.priority     }
    pub fn subtasks(&self) -> &[Subtask]        { &self.subtasks    }
    pub fn completed(&self) -> bool             { self.status.is_done() }
    pub fn is_personal(&self) -> bool           { self.is_personal.unwrap_or(false) }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_assignees<I, S>(mut self, assignees: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assignees = assignees.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_due_date<S: Into<String>>(mut self, due_date: S) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// Schedule this task over a period (both bounds are inclusive)
    pub fn with_period<S: Into<String>, T: Into<String>>(mut self, start_date: S, end_date: T) -> Self {
        self.start_date = Some(start_date.into());
        self.end_date = Some(end_date.into());
        self
    }

    pub fn with_start_date<S: Into<String>>(mut self, start_date: S) -> Self {
        self.start_date = Some(start_date.into());
        self
    }

    pub fn with_times<S: Into<String>, T: Into<String>>(mut self, start_time: S, end_time: T) -> Self {
        self.start_time = Some(start_time.into());
        self.end_time = Some(end_time.into());
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_personal(mut self, is_personal: bool) -> Self {
        self.is_personal = Some(is_personal);
        self
    }

    pub fn with_subtasks(mut self, subtasks: Vec<Subtask>) -> Self {
        self.subtasks = subtasks;
        self
    }

    /// Rename a task.
    pub fn set_name(&mut self, new_name: String) {
        self.name = new_name;
    }

    /// Move the task to another workflow stage
    pub fn set_status(&mut self, new_status: TaskStatus) {
        self.status = new_status;
    }

    pub fn set_priority(&mut self, new_priority: Priority) {
        self.priority = new_priority;
    }

    pub fn subtasks_mut(&mut self) -> &mut Vec<Subtask> {
        &mut self.subtasks
    }

    /// The scheduled period of this task, if both its start and end dates are valid
    pub fn period(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let start = self.start_date.as_deref().and_then(parse_date)?;
        let end = self.end_date.as_deref().and_then(parse_date)?;
        Some((start, end))
    }

    /// See [`effective_due_date`]
    pub fn effective_due_date(&self) -> Option<NaiveDateTime> {
        effective_due_date(self)
    }

    /// Returns `(completed, total)` subtasks
    pub fn subtask_progress(&self) -> (usize, usize) {
        let done = self.subtasks.iter().filter(|s| s.completed()).count();
        (done, self.subtasks.len())
    }
}

/// The date a task is compared by.
///
/// This is the end of its period for a scheduled task, or its plain due date otherwise.
/// A lone `start_date` (open-ended period) does not count as a period.
pub fn effective_due_date(task: &Task) -> Option<NaiveDateTime> {
    match task.period() {
        Some((_start, end)) => Some(end),
        None => task.due_date.as_deref().and_then(parse_date),
    }
}
