//! Some utility functions

use std::fmt::Write;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::Task;
use crate::Event;

pub mod comparison;

/// Naive formats tried, in order, after plain dates and RFC 3339 timestamps
const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse a date as sent by the API.
///
/// Accepts `YYYY-MM-DD` (midnight), naive `YYYY-MM-DDTHH:MM[:SS[.fff]]` timestamps, and RFC 3339 timestamps
/// (converted to UTC). Anything else, including an empty string, is treated as no date at all.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return start_of_day(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.naive_utc());
    }
    for format in NAIVE_DATETIME_FORMATS.iter() {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(datetime);
        }
    }

    log::debug!("Ignoring malformed date {:?}", raw);
    None
}

/// 00:00:00.000 on the given day
pub fn start_of_day(date: NaiveDate) -> Option<NaiveDateTime> {
    date.and_hms_milli_opt(0, 0, 0, 0)
}

/// 23:59:59.999 on the given day
pub fn end_of_day(date: NaiveDate) -> Option<NaiveDateTime> {
    date.and_hms_milli_opt(23, 59, 59, 999)
}

fn format_date(date: Option<NaiveDateTime>) -> String {
    format_date_with(date, &crate::config::display_date_format())
}

/// Formats `date`, falling back to the default display format if chrono cannot render `format`
fn format_date_with(date: Option<NaiveDateTime>, format: &str) -> String {
    let date = match date {
        None => return "-".to_string(),
        Some(d) => d,
    };

    let mut out = String::new();
    if write!(out, "{}", date.format(format)).is_err() {
        log::warn!("Unable to format a date with {:?}", format);
        out.clear();
        let _ = write!(out, "{}", date.format(crate::config::DEFAULT_DISPLAY_DATE_FORMAT));
    }
    out
}

/// A debug utility that pretty-prints a task
pub fn print_task(task: &Task) {
    let completion = if task.completed() { "✓" } else { " " };
    let personal = if task.is_personal() { "*" } else { " " };
    println!("    {}{} [{:<6}] {:<11} {}\t{}\t{}",
        completion, personal,
        task.priority(), task.status(),
        format_date(task.effective_due_date()),
        task.name(), task.assignees().join(", "));
}

/// A debug utility that pretty-prints an event, followed by its tasks
pub fn print_event(event: &Event) {
    let (start, end) = match event.interval() {
        Some((start, end)) => (Some(start), Some(end)),
        None => (None, None),
    };
    let days = if start == end {
        format_date(start)
    } else {
        format!("{} → {}", format_date(start), format_date(end))
    };
    println!("EVENT {} ({}) {}%\t{}", event.title(), days, event.computed_progress(), event.members().join(", "));
    for task in event.tasks() {
        print_task(task);
    }
}
