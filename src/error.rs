//! Error types
//!
//! The filtering and sorting operations never fail. Errors only come out of the optional
//! [`validation`](crate::validation) layer, out of parsing user-facing enum names, and out of the
//! [`config`](crate::config) setters.

use thiserror::Error;

/// Reasons why a task, an event or a set of filter options is rejected by the strict validation layer
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A task name or an event title is empty (or only whitespace)
    #[error("{kind} {id} has an empty {field}")]
    EmptyName {
        kind: &'static str,
        id: String,
        field: &'static str,
    },

    /// A date field is present but cannot be parsed
    #[error("malformed date in field `{field}`: {value:?}")]
    MalformedDate { field: &'static str, value: String },

    /// An interval whose end lies before its start
    #[error("period ends ({end}) before it starts ({start})")]
    InvertedPeriod { start: String, end: String },
}

/// Returned when a status, priority or sort option name is not recognised
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown {kind} {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self { kind, value: value.to_string() }
    }
}

/// Returned when a display format is not a valid chrono format string
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid date format {0:?}")]
pub struct InvalidDateFormat(pub String);
