//! Export payloads
//!
//! Builds the JSON request bodies for the two places a capture can be sent:
//! a calendar events API and the local reminders bridge. Transport is left to
//! the caller.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::capture::CaptureRecord;
use crate::error::{Error, Result};

/// Reminders list used when none is configured
pub const DEFAULT_LIST_NAME: &str = "Create Reminders";

/// Calendar event length when none is configured
pub const DEFAULT_EVENT_MINUTES: i64 = 60;

/// Maximum length of the combined source title and URL sent to the bridge
pub const MAX_NOTES_LENGTH: usize = 2000;

/// Export destinations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTarget {
    Calendar,
    Bridge,
}

impl ExportTarget {
    pub fn name(&self) -> &'static str {
        match self {
            ExportTarget::Calendar => "Google Calendar",
            ExportTarget::Bridge => "Apple Reminders",
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSettings {
    pub list_name: String,
    pub event_duration: Duration,
}

impl ExportSettings {
    /// Settings with an event length given in minutes
    pub fn new(list_name: impl Into<String>, event_minutes: i64) -> Result<Self> {
        if event_minutes <= 0 {
            return Err(Error::InvalidDuration(event_minutes));
        }
        let event_duration =
            Duration::try_minutes(event_minutes).ok_or(Error::InvalidDuration(event_minutes))?;
        Ok(Self {
            list_name: list_name.into(),
            event_duration,
        })
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            list_name: DEFAULT_LIST_NAME.to_string(),
            event_duration: Duration::minutes(DEFAULT_EVENT_MINUTES),
        }
    }
}

/// Start or end of a calendar event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    pub date_time: DateTime<Utc>,
}

/// Body of a calendar "insert event" request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub summary: String,
    pub description: String,
    pub start: EventTime,
    pub end: EventTime,
}

impl CalendarEvent {
    /// Event starting at the record's due time
    pub fn from_record(record: &CaptureRecord, duration: Duration) -> Result<Self> {
        let start = record
            .due_at
            .ok_or(Error::MissingDueDate(ExportTarget::Calendar.name()))?
            .with_timezone(&Utc);

        let summary = if record.text.is_empty() {
            "Reminder".to_string()
        } else {
            record.text.clone()
        };

        let description = if record.source_url.is_empty() {
            "Saved from Reminder Capture".to_string()
        } else {
            let title = if record.source_title.is_empty() {
                "Source"
            } else {
                record.source_title.as_str()
            };
            format!("{}: {}", title, record.source_url)
        };

        let end = start
            .checked_add_signed(duration)
            .ok_or_else(|| Error::InvalidDateTime(format!("{start} + {duration}")))?;

        Ok(Self {
            summary,
            description,
            start: EventTime { date_time: start },
            end: EventTime { date_time: end },
        })
    }
}

/// Body of a reminders bridge request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeReminder {
    pub text: String,
    pub due_at: Option<DateTime<Utc>>,
    pub source_url: String,
    pub source_title: String,
    pub list_name: String,
}

impl BridgeReminder {
    pub fn from_record(record: &CaptureRecord, list_name: &str) -> Result<Self> {
        let notes = format!("{} {}", record.source_title, record.source_url);
        let len = notes.trim().chars().count();
        if len > MAX_NOTES_LENGTH {
            return Err(Error::NotesTooLong {
                len,
                max: MAX_NOTES_LENGTH,
            });
        }

        let list_name = if list_name.trim().is_empty() {
            DEFAULT_LIST_NAME
        } else {
            list_name
        };

        Ok(Self {
            text: record.text.clone(),
            due_at: record.due_at.map(|due| due.with_timezone(&Utc)),
            source_url: record.source_url.clone(),
            source_title: record.source_title.clone(),
            list_name: list_name.to_string(),
        })
    }
}

/// Request body for `target` as JSON
pub fn export_payload(
    record: &CaptureRecord,
    target: ExportTarget,
    settings: &ExportSettings,
) -> Result<serde_json::Value> {
    let payload = match target {
        ExportTarget::Calendar => {
            serde_json::to_value(CalendarEvent::from_record(record, settings.event_duration)?)?
        }
        ExportTarget::Bridge => {
            serde_json::to_value(BridgeReminder::from_record(record, &settings.list_name)?)?
        }
    };
    Ok(payload)
}
