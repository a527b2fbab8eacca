//! Planned events, and the tasks they own

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;
use chrono::NaiveDateTime;

use crate::task::Task;
use crate::utils::parse_date;

/// An event, such as a club meeting or a trip.
///
/// `date` is the first day of the event. Multi-day events also carry an `end_date`, that is never before `date`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    id: String,
    title: String,
    date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_time: Option<String>,
    #[serde(default)]
    is_multi_day: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,

    #[serde(default)]
    members: Vec<String>,
    #[serde(default)]
    tasks: Vec<Task>,
    /// Completion percentage, as last stored by whoever owns this event
    #[serde(default, deserialize_with = "lenient_progress")]
    progress: u8,
}

/// Reads a stored progress without failing the whole event over it.
///
/// Numbers (and numeric strings) are rounded and clamped to `0..=100`. Anything else reads as 0.
fn lenient_progress<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let number = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match number {
        Some(p) if p.is_finite() => Ok(p.round().max(0.0).min(100.0) as u8),
        _ => {
            log::debug!("Ignoring unusable event progress {}", value);
            Ok(0)
        },
    }
}

impl Event {
    /// Create a new single-day event with a random ID
    pub fn new<S: Into<String>>(title: String, date: S) -> Self {
        let new_id = Uuid::new_v4().to_hyphenated().to_string();
        Self::with_id(new_id, title, date)
    }

    pub fn with_id<S: Into<String>>(id: String, title: String, date: S) -> Self {
        Self {
            id,
            title,
            date: date.into(),
            end_date: None,
            time: None,
            end_time: None,
            is_multi_day: false,
            location: None,
            description: None,
            members: Vec::new(),
            tasks: Vec::new(),
            progress: 0,
        }
    }

    pub fn id(&self) -> &str                    { &self.id          }
    pub fn title(&self) -> &str                 { &self.title       }
    pub fn date(&self) -> &str                  { &self.date        }
    pub fn end_date(&self) -> Option<&str>      { self.end_date.as_deref()    }
    pub fn time(&self) -> Option<&str>          { self.time.as_deref()        }
    pub fn end_time(&self) -> Option<&str>      { self.end_time.as_deref()    }
    pub fn is_multi_day(&self) -> bool          { self.is_multi_day }
    pub fn location(&self) -> Option<&str>      { self.location.as_deref()    }
    pub fn description(&self) -> Option<&str>   { self.description.as_deref() }
    pub fn members(&self) -> &[String]          { &self.members     }
    pub fn tasks(&self) -> &[Task]              { &self.tasks       }
    pub fn progress(&self) -> u8                { self.progress     }

    /// Make this event span several days
    pub fn with_end_date<S: Into<String>>(mut self, end_date: S) -> Self {
        self.end_date = Some(end_date.into());
        self.is_multi_day = true;
        self
    }

    pub fn with_times<S: Into<String>, T: Into<String>>(mut self, time: S, end_time: T) -> Self {
        self.time = Some(time.into());
        self.end_time = Some(end_time.into());
        self
    }

    pub fn with_location<S: Into<String>>(mut self, location: S) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_members<I, S>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.members = members.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }

    pub fn tasks_mut(&mut self) -> &mut Vec<Task> {
        &mut self.tasks
    }

    /// Store a new completion percentage (clamped to 100)
    pub fn set_progress(&mut self, progress: u8) {
        self.progress = progress.min(100);
    }

    /// The completion percentage derived from the tasks this event currently owns.
    ///
    /// Unlike [`Event::progress`], this is always up to date.
    pub fn computed_progress(&self) -> u8 {
        crate::stats::completion_percentage(&self.tasks)
    }

    /// The days this event covers, as `(first day, last day)`.
    ///
    /// Returns `None` if the start date cannot be parsed. An unparseable end date falls back to the start date.
    pub fn interval(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let start = parse_date(&self.date)?;
        let end = self.end_date.as_deref()
            .and_then(parse_date)
            .unwrap_or(start);
        Some((start, end))
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::task::TaskStatus;

    #[test]
    fn interval_of_single_and_multi_day_events() {
        let single = Event::new("Bake sale".to_string(), "2025-04-02");
        let (start, end) = single.interval().unwrap();
        assert_eq!(start, end);
        assert!(!single.is_multi_day());

        let trip = Event::new("Field trip".to_string(), "2025-04-02").with_end_date("2025-04-04");
        let (start, end) = trip.interval().unwrap();
        assert_eq!(start, parse_date("2025-04-02").unwrap());
        assert_eq!(end, parse_date("2025-04-04").unwrap());
        assert!(trip.is_multi_day());
    }

    #[test]
    fn interval_tolerates_bad_dates() {
        let broken_end = Event::new("Gala".to_string(), "2025-04-02").with_end_date("??");
        let (start, end) = broken_end.interval().unwrap();
        assert_eq!(start, end);

        let broken_start = Event::new("Gala".to_string(), "soon");
        assert_eq!(broken_start.interval(), None);
    }

    #[test]
    fn computed_progress_follows_tasks() {
        let mut event = Event::new("Hackathon".to_string(), "2025-05-10").with_tasks(vec![
            Task::new("Sponsors".to_string()).with_status(TaskStatus::Done),
            Task::new("Judges".to_string()),
            Task::new("Prizes".to_string()),
        ]);
        assert_eq!(event.computed_progress(), 33);

        for task in event.tasks_mut() {
            task.set_status(TaskStatus::Done);
        }
        assert_eq!(event.computed_progress(), 100);
        assert_eq!(event.progress(), 0);

        event.set_progress(250);
        assert_eq!(event.progress(), 100);
    }

    #[test]
    fn deserialize_from_api_shape() {
        let json = r#"{
            "id": "e1",
            "title": "Spring concert",
            "date": "2025-04-10",
            "endDate": "2025-04-11",
            "isMultiDay": true,
            "members": ["Bob", "Carol"],
            "tasks": [{"id": "t1", "name": "Tune piano", "status": "Done", "priority": "High"}],
            "progress": 100
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.title(), "Spring concert");
        assert_eq!(event.members(), &["Bob".to_string(), "Carol".to_string()]);
        assert_eq!(event.tasks().len(), 1);
        assert_eq!(event.location(), None);
        assert_eq!(event.computed_progress(), 100);
    }

    #[test]
    fn stored_progress_is_read_leniently() {
        let progress_of = |raw: &str| {
            let json = format!(r#"{{"id": "e1", "title": "Bake sale", "date": "2025-04-10", "progress": {}}}"#, raw);
            serde_json::from_str::<Event>(&json).unwrap().progress()
        };
        assert_eq!(progress_of("42.6"), 43);
        assert_eq!(progress_of("250"), 100);
        assert_eq!(progress_of("-5"), 0);
        assert_eq!(progress_of("\"75\""), 75);
        assert_eq!(progress_of("null"), 0);
        assert_eq!(progress_of("\"half\""), 0);

        let missing: Event = serde_json::from_str(r#"{"id": "e2", "title": "Bake sale", "date": "2025-04-10"}"#).unwrap();
        assert_eq!(missing.progress(), 0);
    }
}
