//! Search and filtering over tasks and events
//!
//! A task (or an event) is kept only if it passes every active criterion. Within a single criterion
//! (e.g. the set of wanted statuses), any listed value is enough. An empty criterion does not constrain anything.

use serde::{Deserialize, Serialize};
use chrono::NaiveDateTime;

use crate::task::{Priority, Task, TaskStatus};
use crate::event::Event;
use crate::utils::{end_of_day, parse_date, start_of_day};

/// A range of days, as picked in a date picker
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateRange {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl DateRange {
    pub fn new<S: Into<String>, T: Into<String>>(from: S, to: T) -> Self {
        Self { from: Some(from.into()), to: Some(to.into()) }
    }

    /// A range that covers a single day
    pub fn day<S: Into<String>>(day: S) -> Self {
        Self { from: Some(day.into()), to: None }
    }

    /// Resolve this range to `(start of the first day, end of the last day)`.
    ///
    /// Returns `None` when there is no usable `from` bound, in which case the range does not constrain anything.
    /// A missing or unparseable `to` bound means the range only covers the day of `from`.
    pub fn bounds(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let from = self.from.as_deref().and_then(parse_date)?.date();
        let to = self.to.as_deref()
            .and_then(parse_date)
            .map(|to| to.date())
            .unwrap_or(from);
        Some((start_of_day(from)?, end_of_day(to)?))
    }
}


/// What the user asked to see
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterOptions {
    pub status: Vec<TaskStatus>,
    pub priority: Vec<Priority>,
    /// Matched against task assignees, and against event members
    pub assignees: Vec<String>,
    pub date_range: DateRange,
    pub show_completed: bool,
    pub show_personal_tasks: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            status: Vec::new(),
            priority: Vec::new(),
            assignees: Vec::new(),
            date_range: DateRange::default(),
            show_completed: true,
            show_personal_tasks: true,
        }
    }
}

impl FilterOptions {
    /// Creates options that let everything through
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status.push(status);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority.push(priority);
        self
    }

    pub fn with_assignee<S: Into<String>>(mut self, assignee: S) -> Self {
        self.assignees.push(assignee.into());
        self
    }

    pub fn with_date_range(mut self, date_range: DateRange) -> Self {
        self.date_range = date_range;
        self
    }

    pub fn hide_completed(mut self) -> Self {
        self.show_completed = false;
        self
    }

    pub fn hide_personal_tasks(mut self) -> Self {
        self.show_personal_tasks = false;
        self
    }
}


/// A search term and filter options, prepared once to be matched against many items
#[derive(Debug)]
pub struct Query<'f> {
    /// The lowercased search term, if any
    needle: Option<String>,
    bounds: Option<(NaiveDateTime, NaiveDateTime)>,
    filters: &'f FilterOptions,
}

impl<'f> Query<'f> {
    pub fn new(search_term: &str, filters: &'f FilterOptions) -> Self {
        let needle = if search_term.is_empty() {
            None
        } else {
            Some(search_term.to_lowercase())
        };
        Self {
            needle,
            bounds: filters.date_range.bounds(),
            filters,
        }
    }

    fn mentions(&self, haystack: &str) -> bool {
        match &self.needle {
            None => true,
            Some(needle) => haystack.to_lowercase().contains(needle.as_str()),
        }
    }

    fn mentions_any(&self, haystacks: &[String]) -> bool {
        haystacks.iter().any(|h| self.mentions(h))
    }

    fn mentions_task(&self, task: &Task) -> bool {
        self.mentions(task.name())
            || task.description().map_or(false, |d| self.mentions(d))
            || self.mentions_any(task.assignees())
    }

    fn mentions_event(&self, event: &Event) -> bool {
        self.mentions(event.title())
            || event.description().map_or(false, |d| self.mentions(d))
            || event.location().map_or(false, |l| self.mentions(l))
            || self.mentions_any(event.members())
            || event.tasks().iter().any(|task| {
                self.mentions(task.name()) || task.description().map_or(false, |d| self.mentions(d))
            })
    }

    fn has_wanted_person(&self, people: &[String]) -> bool {
        self.filters.assignees.is_empty()
            || people.iter().any(|p| self.filters.assignees.contains(p))
    }

    /// Returns true if the task matches the search term and every active filter
    pub fn matches_task(&self, task: &Task) -> bool {
        if self.needle.is_some() && !self.mentions_task(task) {
            return false;
        }

        if !self.filters.status.is_empty() && !self.filters.status.contains(&task.status()) {
            return false;
        }

        if !self.filters.priority.is_empty() && !self.filters.priority.contains(&task.priority()) {
            return false;
        }

        if !self.has_wanted_person(task.assignees()) {
            return false;
        }

        if let Some((from, to)) = self.bounds {
            let in_range = match task.period() {
                Some((start, end)) => start <= to && end >= from,
                None => match task.effective_due_date() {
                    Some(due) => from <= due && due <= to,
                    None => false,
                },
            };
            if !in_range {
                return false;
            }
        }

        if !self.filters.show_completed && task.completed() {
            return false;
        }

        if !self.filters.show_personal_tasks && task.is_personal() {
            return false;
        }

        true
    }

    /// Returns true if the event matches the search term, the wanted members and the date range.
    ///
    /// Status, priority and visibility toggles only apply to tasks.
    pub fn matches_event(&self, event: &Event) -> bool {
        if self.needle.is_some() && !self.mentions_event(event) {
            return false;
        }

        if !self.has_wanted_person(event.members()) {
            return false;
        }

        if let Some((from, to)) = self.bounds {
            let overlaps = match event.interval() {
                Some((start, end)) => start <= to && end >= from,
                None => false,
            };
            if !overlaps {
                return false;
            }
        }

        true
    }
}


/// Keep the tasks that match `search_term` and `filters`, in their original order
pub fn filter_tasks<'a, I>(tasks: I, search_term: &str, filters: &FilterOptions) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let query = Query::new(search_term, filters);
    let mut total = 0;
    let kept: Vec<&Task> = tasks.into_iter()
        .inspect(|_| total += 1)
        .filter(|task| query.matches_task(task))
        .collect();
    log::debug!("Search {:?} kept {} of {} tasks", search_term, kept.len(), total);
    kept
}

/// Keep the events that match `search_term` and `filters`, in their original order
pub fn filter_events<'a, I>(events: I, search_term: &str, filters: &FilterOptions) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    let query = Query::new(search_term, filters);
    let mut total = 0;
    let kept: Vec<&Event> = events.into_iter()
        .inspect(|_| total += 1)
        .filter(|event| query.matches_event(event))
        .collect();
    log::debug!("Search {:?} kept {} of {} events", search_term, kept.len(), total);
    kept
}


#[cfg(test)]
mod test {
    use super::*;

    fn names<'a>(tasks: &[&'a Task]) -> Vec<&'a str> {
        tasks.iter().map(|t| t.name()).collect()
    }

    fn sample_tasks() -> Vec<Task> {
        vec![
            Task::with_id("1".to_string(), "Book venue".to_string())
                .with_description("Call the student union")
                .with_assignees(vec!["Alice"])
                .with_due_date("2025-03-04")
                .with_priority(Priority::Urgent),
            Task::with_id("2".to_string(), "Design poster".to_string())
                .with_assignees(vec!["Bob", "Carol"])
                .with_period("2025-03-01", "2025-03-10")
                .with_status(TaskStatus::InProgress),
            Task::with_id("3".to_string(), "Buy snacks".to_string())
                .with_status(TaskStatus::Done)
                .with_priority(Priority::Low),
            Task::with_id("4".to_string(), "Laundry".to_string())
                .with_assignees(vec!["Alice"])
                .with_due_date("2025-03-20")
                .with_personal(true),
        ]
    }

    #[test]
    fn empty_filters_keep_everything() {
        let tasks = sample_tasks();
        let kept = filter_tasks(&tasks, "", &FilterOptions::new());
        assert_eq!(names(&kept), vec!["Book venue", "Design poster", "Buy snacks", "Laundry"]);

        assert!(filter_tasks(&Vec::<Task>::new(), "venue", &FilterOptions::new()).is_empty());
    }

    #[test]
    fn search_looks_at_name_description_and_assignees() {
        let tasks = sample_tasks();
        let filters = FilterOptions::new();

        assert_eq!(names(&filter_tasks(&tasks, "POSTER", &filters)), vec!["Design poster"]);
        assert_eq!(names(&filter_tasks(&tasks, "union", &filters)), vec!["Book venue"]);
        assert_eq!(names(&filter_tasks(&tasks, "carol", &filters)), vec!["Design poster"]);
        assert_eq!(names(&filter_tasks(&tasks, "ali", &filters)), vec!["Book venue", "Laundry"]);
        assert!(filter_tasks(&tasks, "venues", &filters).is_empty());
    }

    #[test]
    fn status_and_priority_sets() {
        let tasks = sample_tasks();

        let filters = FilterOptions::new()
            .with_status(TaskStatus::InProgress)
            .with_status(TaskStatus::Done);
        assert_eq!(names(&filter_tasks(&tasks, "", &filters)), vec!["Design poster", "Buy snacks"]);

        let filters = FilterOptions::new().with_priority(Priority::Urgent).with_priority(Priority::Low);
        assert_eq!(names(&filter_tasks(&tasks, "", &filters)), vec!["Book venue", "Buy snacks"]);

        let filters = FilterOptions::new().with_priority(Priority::Urgent).with_status(TaskStatus::Done);
        assert!(filter_tasks(&tasks, "", &filters).is_empty());
    }

    #[test]
    fn assignee_set() {
        let tasks = sample_tasks();
        let filters = FilterOptions::new().with_assignee("Carol").with_assignee("Dave");
        assert_eq!(names(&filter_tasks(&tasks, "", &filters)), vec!["Design poster"]);
    }

    #[test]
    fn date_range_uses_periods_and_due_dates() {
        let tasks = sample_tasks();

        let filters = FilterOptions::new().with_date_range(DateRange::new("2025-03-04", "2025-03-05"));
        assert_eq!(names(&filter_tasks(&tasks, "", &filters)), vec!["Book venue", "Design poster"]);

        // Undated tasks never match an active date range
        let filters = FilterOptions::new().with_date_range(DateRange::new("2025-01-01", "2025-12-31"));
        assert_eq!(names(&filter_tasks(&tasks, "", &filters)), vec!["Book venue", "Design poster", "Laundry"]);
    }

    #[test]
    fn single_bound_covers_one_day() {
        let tasks = vec![
            Task::new("Morning".to_string()).with_due_date("2025-03-20T08:00"),
            Task::new("Late".to_string()).with_due_date("2025-03-20T23:59:59.500"),
            Task::new("Next day".to_string()).with_due_date("2025-03-21"),
        ];
        let filters = FilterOptions::new().with_date_range(DateRange::day("2025-03-20"));
        assert_eq!(names(&filter_tasks(&tasks, "", &filters)), vec!["Morning", "Late"]);

        // A time of day on the bounds is ignored
        let filters = FilterOptions::new().with_date_range(DateRange::new("2025-03-20T12:00", "2025-03-20T13:00"));
        assert_eq!(names(&filter_tasks(&tasks, "", &filters)), vec!["Morning", "Late"]);
    }

    #[test]
    fn unusable_bounds() {
        let tasks = sample_tasks();

        let filters = FilterOptions::new().with_date_range(DateRange { from: None, to: Some("2025-03-04".to_string()) });
        assert_eq!(filter_tasks(&tasks, "", &filters).len(), 4);

        let filters = FilterOptions::new().with_date_range(DateRange::new("garbage", "2025-03-04"));
        assert_eq!(filter_tasks(&tasks, "", &filters).len(), 4);

        let filters = FilterOptions::new().with_date_range(DateRange::new("2025-03-04", "garbage"));
        assert_eq!(names(&filter_tasks(&tasks, "", &filters)), vec!["Book venue", "Design poster"]);
    }

    #[test]
    fn visibility_toggles() {
        let tasks = sample_tasks();

        let filters = FilterOptions::new().hide_completed();
        assert_eq!(names(&filter_tasks(&tasks, "", &filters)), vec!["Book venue", "Design poster", "Laundry"]);

        let filters = FilterOptions::new().hide_personal_tasks();
        assert_eq!(names(&filter_tasks(&tasks, "", &filters)), vec!["Book venue", "Design poster", "Buy snacks"]);
    }

    #[test]
    fn options_deserialize_with_inclusive_defaults() {
        let filters: FilterOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(filters, FilterOptions::new());
        assert!(filters.show_completed);
        assert!(filters.show_personal_tasks);

        let json = r#"{
            "status": ["To Do", "Done"],
            "priority": ["High"],
            "dateRange": {"from": "2025-03-01"},
            "showPersonalTasks": false
        }"#;
        let filters: FilterOptions = serde_json::from_str(json).unwrap();
        assert_eq!(filters.status, vec![TaskStatus::ToDo, TaskStatus::Done]);
        assert_eq!(filters.priority, vec![Priority::High]);
        assert_eq!(filters.date_range, DateRange::day("2025-03-01"));
        assert!(filters.show_completed);
        assert!(!filters.show_personal_tasks);
    }

    fn sample_events() -> Vec<Event> {
        vec![
            Event::with_id("e1".to_string(), "Spring concert".to_string(), "2025-04-10")
                .with_end_date("2025-04-12")
                .with_location("Main hall")
                .with_members(vec!["Bob", "Carol"])
                .with_tasks(vec![
                    Task::new("Tune piano".to_string()).with_description("Call the tuner"),
                ]),
            Event::with_id("e2".to_string(), "Chess club".to_string(), "2025-04-15")
                .with_description("Weekly meeting")
                .with_members(vec!["Alice"]),
        ]
    }

    fn titles<'a>(events: &[&'a Event]) -> Vec<&'a str> {
        events.iter().map(|e| e.title()).collect()
    }

    #[test]
    fn event_search_reaches_into_tasks() {
        let events = sample_events();
        let filters = FilterOptions::new();

        assert_eq!(titles(&filter_events(&events, "hall", &filters)), vec!["Spring concert"]);
        assert_eq!(titles(&filter_events(&events, "weekly", &filters)), vec!["Chess club"]);
        assert_eq!(titles(&filter_events(&events, "ALICE", &filters)), vec!["Chess club"]);
        assert_eq!(titles(&filter_events(&events, "piano", &filters)), vec!["Spring concert"]);
        assert_eq!(titles(&filter_events(&events, "tuner", &filters)), vec!["Spring concert"]);
        assert!(filter_events(&events, "football", &filters).is_empty());
    }

    #[test]
    fn event_members_and_dates() {
        let events = sample_events();

        let filters = FilterOptions::new().with_assignee("Carol");
        assert_eq!(titles(&filter_events(&events, "", &filters)), vec!["Spring concert"]);

        let filters = FilterOptions::new().with_date_range(DateRange::day("2025-04-12"));
        assert_eq!(titles(&filter_events(&events, "", &filters)), vec!["Spring concert"]);

        let filters = FilterOptions::new().with_date_range(DateRange::new("2025-04-13", "2025-04-30"));
        assert_eq!(titles(&filter_events(&events, "", &filters)), vec!["Chess club"]);
    }

    #[test]
    fn events_with_malformed_dates_fail_active_ranges() {
        let mut events = sample_events();
        events.push(Event::with_id("e3".to_string(), "Open day".to_string(), "soon"));
        events.push(Event::with_id("e4".to_string(), "Hackathon".to_string(), "2025-04-20").with_end_date("whenever"));

        // No range: dates are not looked at
        let titles_all = titles(&filter_events(&events, "", &FilterOptions::new()));
        assert_eq!(titles_all, vec!["Spring concert", "Chess club", "Open day", "Hackathon"]);

        // A bad end date falls back to the start date, a bad start date never matches
        let filters = FilterOptions::new().with_date_range(DateRange::new("2025-04-01", "2025-04-30"));
        assert_eq!(titles(&filter_events(&events, "", &filters)), vec!["Spring concert", "Chess club", "Hackathon"]);

        let filters = FilterOptions::new().with_date_range(DateRange::day("2025-04-21"));
        assert!(filter_events(&events, "", &filters).is_empty());
    }

    #[test]
    fn task_only_filters_do_not_apply_to_events() {
        let events = sample_events();
        let filters = FilterOptions::new()
            .with_status(TaskStatus::Done)
            .with_priority(Priority::Low)
            .hide_completed()
            .hide_personal_tasks();
        assert_eq!(filter_events(&events, "", &filters).len(), 2);
    }
}
