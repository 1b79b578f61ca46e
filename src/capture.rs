//! Capture records
//!
//! A capture is the selected text plus an optional due time. The due time is
//! pre-filled from [`suggest`] and can be overridden before the record is
//! built.

use std::fmt;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, TimeZone, Timelike};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::clock::Clock;
use crate::date::{detect, format_detected, Detection};
use crate::error::{Error, Result};
use crate::reminder::{lead_time_label, reminder_time};

/// Maximum captured text length, in characters
pub const MAX_TEXT_LENGTH: usize = 1000;

/// Characters of captured text shown in a preview
pub const PREVIEW_LENGTH: usize = 150;

/// Where the captured text came from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Source {
    pub url: String,
    pub title: String,
}

/// A captured reminder as stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureRecord {
    pub id: String,
    pub text: String,
    pub due_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub source_title: String,
    pub created_at: DateTime<FixedOffset>,
}

impl CaptureRecord {
    /// Build a record, trimming and validating the text
    pub fn new<Tz: TimeZone>(
        text: &str,
        due_at: Option<DateTime<Tz>>,
        source: Source,
        created_at: DateTime<Tz>,
    ) -> Result<Self> {
        let text = validate_text(text)?;
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            due_at: due_at.map(|due| due.fixed_offset()),
            source_url: source.url,
            source_title: source.title,
            created_at: created_at.fixed_offset(),
        })
    }

    /// Load a record from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let record: CaptureRecord = serde_json::from_str(&content)?;
        validate_text(&record.text)?;
        Ok(record)
    }

    /// Save the record as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        debug!("saved capture record to {}", path.display());
        Ok(())
    }
}

/// Trimmed text, or an error if it is empty or too long
pub fn validate_text(text: &str) -> Result<&str> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::EmptyText);
    }
    let len = text.chars().count();
    if len > MAX_TEXT_LENGTH {
        return Err(Error::TextTooLong {
            len,
            max: MAX_TEXT_LENGTH,
        });
    }
    Ok(text)
}

/// Shorten text for display, marking truncation with `...`
pub fn preview(text: &str) -> String {
    if text.chars().count() > PREVIEW_LENGTH {
        let head: String = text.chars().take(PREVIEW_LENGTH).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

/// Suggested event and reminder times for a piece of captured text
#[derive(Debug, Clone)]
pub struct CaptureSuggestion<Tz: TimeZone> {
    pub detection: Option<Detection<Tz>>,
    pub remind_at: Option<DateTime<Tz>>,
}

impl<Tz: TimeZone> CaptureSuggestion<Tz> {
    /// Detected event time
    pub fn event(&self) -> Option<&DateTime<Tz>> {
        self.detection.as_ref().map(|d| &d.at)
    }

    /// How far ahead of the event the reminder fires ("1 day before")
    pub fn lead_time(&self) -> Option<String> {
        lead_time_label(self.event()?, self.remind_at.as_ref()?)
    }

    /// Default due time: the reminder time, or `now` if nothing was detected
    ///
    /// Truncated to whole minutes.
    pub fn default_due(&self, now: DateTime<Tz>) -> DateTime<Tz> {
        let due = self.remind_at.clone().unwrap_or(now);
        let seconds = Duration::seconds(due.second().into())
            + Duration::nanoseconds(due.nanosecond().into());
        due - seconds
    }
}

impl<Tz: TimeZone> fmt::Display for CaptureSuggestion<Tz>
where
    Tz::Offset: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(event) = self.event() else {
            return write!(f, "No date detected");
        };
        write!(f, "Event detected: {}", format_detected(event))?;
        if let Some(lead) = self.lead_time() {
            write!(f, "\nReminder set: {lead}")?;
        }
        Ok(())
    }
}

/// Run date extraction and reminder offset over captured text
pub fn suggest<C: Clock>(text: &str, clock: &C) -> CaptureSuggestion<C::Tz> {
    let detection = detect(text, clock);
    let remind_at = reminder_time(detection.as_ref().map(|d| d.at.clone()), clock);
    CaptureSuggestion {
        detection,
        remind_at,
    }
}

/// Parse a due time given as RFC 3339 or as a `YYYY-MM-DDTHH:MM` local time in `tz`
pub fn parse_due<Tz: TimeZone>(value: &str, tz: &Tz) -> Result<DateTime<Tz>> {
    let value = value.trim();
    if let Ok(due) = DateTime::parse_from_rfc3339(value) {
        return Ok(due.with_timezone(tz));
    }

    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M"))
        .map_err(|_| Error::InvalidDateTime(value.to_string()))?;
    tz.from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| Error::InvalidDateTime(value.to_string()))
}
