//! Clock-time expressions (`3:30 pm`, `15:00`, `08:40 Uhr`)

use std::ops::Range;

use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::Regex;

static TIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d{1,2}):(\d{2})(?:\s*(uhr|am|pm)\b)?").expect("time pattern must compile")
});

/// A time expression found in free text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeMatch {
    /// Byte range of the expression in the searched text
    pub range: Range<usize>,
    /// Parsed 24-hour time, `None` when out of range (`25:00`, `10:75`)
    pub time: Option<NaiveTime>,
}

impl TimeMatch {
    /// `text` with the time expression removed and trimmed
    pub fn strip_from(&self, text: &str) -> String {
        format!("{}{}", &text[..self.range.start], &text[self.range.end..])
            .trim()
            .to_string()
    }
}

/// Find the first time expression in `text`
pub fn find_time(text: &str) -> Option<TimeMatch> {
    let caps = TIME_PATTERN.captures(text)?;
    let whole = caps.get(0)?;

    let hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps[2].parse().ok()?;
    let marker = caps.get(3).map(|m| m.as_str().to_lowercase());

    Some(TimeMatch {
        range: whole.range(),
        time: to_24_hour(hour, minute, marker.as_deref()),
    })
}

/// Convert a (possibly 12-hour) clock reading to a `NaiveTime`
///
/// A meridiem only shifts hours it can apply to: `13:00 pm` stays 13:00 and
/// `0:30 am` stays 00:30.
fn to_24_hour(hour: u32, minute: u32, marker: Option<&str>) -> Option<NaiveTime> {
    let hour = match marker {
        Some("pm") if hour < 12 => hour + 12,
        Some("am") if hour == 12 => 0,
        _ => hour,
    };
    NaiveTime::from_hms_opt(hour, minute, 0)
}
