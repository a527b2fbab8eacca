//! Ordering of filtered tasks

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Task;
use crate::error::UnknownVariant;
use crate::utils::comparison::{compare_due_dates, compare_names, compare_priorities, compare_statuses};

/// Which property tasks are sorted by
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// The effective due date (see [`crate::task::effective_due_date`])
    DueDate,
    Priority,
    Name,
    Status,
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::DueDate
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SortKey::DueDate => "dueDate",
            SortKey::Priority => "priority",
            SortKey::Name => "name",
            SortKey::Status => "status",
        };
        f.pad(name)
    }
}

impl FromStr for SortKey {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(|c: char| c == '-' || c == '_', "").as_str() {
            "duedate" => Ok(SortKey::DueDate),
            "priority" => Ok(SortKey::Priority),
            "name" => Ok(SortKey::Name),
            "status" => Ok(SortKey::Status),
            _ => Err(UnknownVariant::new("sort key", s)),
        }
    }
}


#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn is_descending(&self) -> bool {
        *self == SortOrder::Desc
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Asc
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Asc => f.pad("asc"),
            SortOrder::Desc => f.pad("desc"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            _ => Err(UnknownVariant::new("sort order", s)),
        }
    }
}


/// Returns the tasks sorted by `sort_by`, leaving the input untouched.
///
/// The sort is stable: tasks that compare equal keep their relative order.
/// When sorting by due date, tasks without one are put last whatever `sort_order` is.
pub fn sort_tasks<'a, I>(tasks: I, sort_by: SortKey, sort_order: SortOrder) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let descending = sort_order.is_descending();
    let directed = |ord: std::cmp::Ordering| if descending { ord.reverse() } else { ord };

    let sorted: Vec<&Task> = match sort_by {
        SortKey::DueDate => {
            // Parse every date once rather than at each comparison
            let mut keyed: Vec<_> = tasks.into_iter()
                .map(|task| (task.effective_due_date(), task))
                .collect();
            keyed.sort_by(|(l, _), (r, _)| compare_due_dates(l.as_ref(), r.as_ref(), descending));
            keyed.into_iter().map(|(_, task)| task).collect()
        },
        SortKey::Priority => sorted_by(tasks, |l, r| directed(compare_priorities(l, r))),
        SortKey::Name => sorted_by(tasks, |l, r| directed(compare_names(l, r))),
        SortKey::Status => sorted_by(tasks, |l, r| directed(compare_statuses(l, r))),
    };

    log::debug!("Sorted {} tasks by {} ({})", sorted.len(), sort_by, sort_order);
    sorted
}

fn sorted_by<'a, I, F>(tasks: I, mut compare: F) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
    F: FnMut(&Task, &Task) -> std::cmp::Ordering,
{
    let mut sorted: Vec<&Task> = tasks.into_iter().collect();
    sorted.sort_by(|l, r| compare(*l, *r));
    sorted
}
