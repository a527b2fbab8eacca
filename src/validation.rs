//! Strict checks that can be run before filtering
//!
//! Filtering and sorting tolerate bad data (a malformed date is simply treated as missing).
//! Callers that would rather reject such data up front can run these checks first.

use crate::error::ValidationError;
use crate::event::Event;
use crate::filter::FilterOptions;
use crate::task::Task;
use crate::utils::parse_date;

fn check_date(field: &'static str, value: Option<&str>) -> Result<(), ValidationError> {
    match value {
        Some(raw) if parse_date(raw).is_none() => Err(ValidationError::MalformedDate {
            field,
            value: raw.to_string(),
        }),
        _ => Ok(()),
    }
}

fn check_order(start: Option<&str>, end: Option<&str>) -> Result<(), ValidationError> {
    if let (Some(start), Some(end)) = (start, end) {
        if let (Some(s), Some(e)) = (parse_date(start), parse_date(end)) {
            if e < s {
                return Err(ValidationError::InvertedPeriod {
                    start: start.to_string(),
                    end: end.to_string(),
                });
            }
        }
    }
    Ok(())
}

pub fn validate_task(task: &Task) -> Result<(), ValidationError> {
    if task.name().trim().is_empty() {
        return Err(ValidationError::EmptyName { kind: "task", id: task.id().to_string(), field: "name" });
    }
    check_date("dueDate", task.due_date())?;
    check_date("startDate", task.start_date())?;
    check_date("endDate", task.end_date())?;
    check_order(task.start_date(), task.end_date())
}

/// Checks the event itself, then every task it owns
pub fn validate_event(event: &Event) -> Result<(), ValidationError> {
    if event.title().trim().is_empty() {
        return Err(ValidationError::EmptyName { kind: "event", id: event.id().to_string(), field: "title" });
    }
    check_date("date", Some(event.date()))?;
    check_date("endDate", event.end_date())?;
    check_order(Some(event.date()), event.end_date())?;

    event.tasks().iter().try_for_each(validate_task)
}

/// Rejects malformed bounds and ranges that end before they start.
///
/// A `to` bound without `from` is accepted: it does not constrain anything.
pub fn validate_filter_options(filters: &FilterOptions) -> Result<(), ValidationError> {
    let range = &filters.date_range;
    check_date("dateRange.from", range.from.as_deref())?;
    check_date("dateRange.to", range.to.as_deref())?;

    if let Some((from, to)) = range.bounds() {
        if to < from {
            return Err(ValidationError::InvertedPeriod {
                start: range.from.clone().unwrap_or_default(),
                end: range.to.clone().unwrap_or_default(),
            });
        }
    }
    Ok(())
}
