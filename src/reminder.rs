//! Reminder offset calculation
//!
//! Suggests when to be reminded of an event, looking back further the more
//! distant the event is.

use chrono::{DateTime, Duration, TimeZone};

use crate::clock::Clock;

/// Lookback tiers as (hours until event must exceed, minutes to subtract)
const TIERS: [(f64, i64); 4] = [(24.0, 24 * 60), (4.0, 4 * 60), (2.0, 2 * 60), (0.5, 30)];

/// Suggested reminder time for an event, `None` in gives `None` out
pub fn reminder_time<C: Clock>(
    event: Option<DateTime<C::Tz>>,
    clock: &C,
) -> Option<DateTime<C::Tz>> {
    event.map(|event| remind_before(&event, &clock.now()))
}

/// Reminder time for `event` as seen from `now`
///
/// Never later than `event` while the event is more than half an hour away.
/// Closer or past events are reminded of at `now`.
pub fn remind_before<Tz: TimeZone>(event: &DateTime<Tz>, now: &DateTime<Tz>) -> DateTime<Tz> {
    let until = event.clone().signed_duration_since(now.clone());
    let hours = until.num_milliseconds() as f64 / 3_600_000.0;

    TIERS
        .iter()
        .find(|(threshold, _)| hours > *threshold)
        .map(|(_, minutes)| event.clone() - Duration::minutes(*minutes))
        .unwrap_or_else(|| now.clone())
}

/// Human description of how far ahead of the event the reminder fires
///
/// Returns `None` if the reminder would fire after the event.
pub fn lead_time_label<Tz: TimeZone>(
    event: &DateTime<Tz>,
    reminder: &DateTime<Tz>,
) -> Option<String> {
    if reminder > event {
        return None;
    }
    let lead = event.clone().signed_duration_since(reminder.clone());
    let hours = lead.num_hours();
    let minutes = lead.num_minutes();

    let label = if hours >= 24 {
        plural(hours / 24, "day")
    } else if hours > 0 {
        plural(hours, "hour")
    } else if minutes > 0 {
        plural(minutes, "minute")
    } else {
        return Some("now".to_string());
    };
    Some(format!("{label} before"))
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("{n} {unit}")
    } else {
        format!("{n} {unit}s")
    }
}
