//! Error types for the reminder capture library

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the reminder capture library
///
/// Date extraction itself never fails; these errors come from building,
/// storing and exporting capture records.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Captured text is empty after trimming
    #[error("Reminder text is empty")]
    EmptyText,

    /// Captured text exceeds the storage limit
    #[error("Reminder text too long ({len} chars, max {max})")]
    TextTooLong { len: usize, max: usize },

    /// Source title and URL exceed the bridge notes limit
    #[error("Source information too long ({len} chars, max {max})")]
    NotesTooLong { len: usize, max: usize },

    /// Export target requires a due date
    #[error("Set a date/time before sending to {0}")]
    MissingDueDate(&'static str),

    /// The reminders store already holds the maximum number of entries
    #[error("Maximum {max} reminders reached, delete some first")]
    StoreFull { max: usize },

    /// No stored reminder has this id
    #[error("No reminder with id {0}")]
    NotFound(String),

    /// Event duration is not positive or out of range
    #[error("Invalid event duration: {0} minutes")]
    InvalidDuration(i64),

    /// Date/time string could not be parsed
    #[error("Invalid date/time: {0}")]
    InvalidDateTime(String),
}
