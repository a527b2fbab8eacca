//! Figures derived from task and event collections: people involved, search statistics, progress and kanban columns

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::task::{Task, TaskStatus};
use crate::event::Event;

/// Every task assignee and every event member, deduplicated and sorted
pub fn all_assignees<'a, I, J>(tasks: I, events: J) -> Vec<String>
where
    I: IntoIterator<Item = &'a Task>,
    J: IntoIterator<Item = &'a Event>,
{
    let mut people: BTreeSet<&str> = BTreeSet::new();
    for task in tasks {
        people.extend(task.assignees().iter().map(String::as_str));
    }
    for event in events {
        people.extend(event.members().iter().map(String::as_str));
    }
    people.into_iter().map(String::from).collect()
}


/// How many items a search kept out of a collection
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCount {
    pub showing: usize,
    pub total: usize,
    /// `showing / total`, as a rounded percentage. Zero for an empty collection.
    pub percentage: u32,
}

impl MatchCount {
    pub fn new(showing: usize, total: usize) -> Self {
        Self { showing, total, percentage: percentage(showing, total) }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub tasks: MatchCount,
    pub events: MatchCount,
}

/// Summarize a search, given the collection sizes before and after filtering
pub fn search_stats(total_tasks: usize, filtered_tasks: usize, total_events: usize, filtered_events: usize) -> SearchStats {
    SearchStats {
        tasks: MatchCount::new(filtered_tasks, total_tasks),
        events: MatchCount::new(filtered_events, total_events),
    }
}

fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (part as f64 / total as f64 * 100.0).round() as u32
}

/// Share of `Done` tasks, as a rounded percentage (0 when there is no task)
pub fn completion_percentage(tasks: &[Task]) -> u8 {
    let done = tasks.iter().filter(|t| t.completed()).count();
    // at most 100, cannot truncate
    percentage(done, tasks.len()) as u8
}


/// Tasks split by workflow stage, each column keeping the input order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KanbanColumns<'a> {
    pub to_do: Vec<&'a Task>,
    pub in_progress: Vec<&'a Task>,
    pub done: Vec<&'a Task>,
}

impl<'a> KanbanColumns<'a> {
    pub fn column(&self, status: TaskStatus) -> &[&'a Task] {
        match status {
            TaskStatus::ToDo => &self.to_do,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
        }
    }
}

pub fn group_by_status<'a, I>(tasks: I) -> KanbanColumns<'a>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut columns = KanbanColumns::default();
    for task in tasks {
        match task.status() {
            TaskStatus::ToDo => columns.to_do.push(task),
            TaskStatus::InProgress => columns.in_progress.push(task),
            TaskStatus::Done => columns.done.push(task),
        }
    }
    columns
}
