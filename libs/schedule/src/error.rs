//! Error types for schedule tag parsing.

use thiserror::Error;

/// Errors that can occur when parsing a `schedule` tag value.
///
/// These are caught per instance by the caller: one malformed tag is logged
/// and skipped, and must never abort the rest of the pass.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// A `;`-separated segment did not contain exactly one `=`.
    #[error("malformed segment '{0}': expected key=value")]
    MalformedSegment(String),

    /// A required key (`start`, `stop`, or `days`) was absent.
    #[error("missing required key '{0}'")]
    MissingKey(&'static str),

    /// A time field was not a valid HHMM integer.
    #[error("invalid time '{value}' for '{key}': expected HHMM")]
    InvalidTime { key: &'static str, value: String },

    /// The `days` value was not of the form `D0-D1`.
    #[error("invalid day range '{0}': expected D0-D1")]
    InvalidDayRange(String),
}
