//! This crate provides the search, filtering and sorting logic of a student event planner.
//!
//! Users plan [`Event`]s and track [`Task`]s (either personal, or owned by an event).
//! A front-end fetches these collections, then uses this crate to show what the user asked for:
//!
//! * [`filter`] keeps the tasks and events matching a search term and some [`FilterOptions`](filter::FilterOptions)
//! * [`sort`] orders tasks by due date, priority, name or status
//! * [`stats`] summarizes results (people involved, share of matching items, progress, kanban columns)
//!
//! All these operations are pure functions over borrowed data. They never fail: dates that cannot be parsed
//! are treated as missing. The [`validation`] module is there for callers that would rather reject such data.
//! The [`snapshot`] module stores collections in a JSON file, which is what the `planboard` binary works on.

pub mod task;
pub use task::Task;
pub use task::{Priority, Subtask, TaskStatus};
pub mod event;
pub use event::Event;

pub mod filter;
pub use filter::{filter_events, filter_tasks, DateRange, FilterOptions};
pub mod sort;
pub use sort::{sort_tasks, SortKey, SortOrder};
pub mod stats;
pub use stats::{all_assignees, search_stats, SearchStats};

pub mod error;
pub mod validation;
pub mod snapshot;
pub use snapshot::Snapshot;

pub mod config;
pub mod utils;
