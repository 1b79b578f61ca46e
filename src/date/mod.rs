//! Date extraction module
//!
//! Finds the first recognizable date expression in free-form text and
//! resolves it to an absolute, future point in time. Supported forms:
//! - ISO (`2025-12-25`), US (`12/25/2025`) and European (`25.12.2025`, `25.12.`)
//! - English month names with or without a year (`Dec 25th, 2026`, `25 December 2025`, `Dec 25`)
//! - Relative terms (`tomorrow`, `next week`, `next month`, `next friday`)
//! - German relative terms (`morgen`, `übermorgen`, `nächste Woche`)
//! - An optional clock time anywhere in the text (`3:30 pm`, `15:00`, `08:40 Uhr`)
//!
//! Without a clock time the result is 09:00 local.

mod rules;
mod time_of_day;

pub use rules::{parse_month, PatternRule, RuleKind, RULES};
pub use time_of_day::{find_time, TimeMatch};

use std::fmt;

use chrono::{
    DateTime, Datelike, Days, Months, NaiveDate, NaiveTime, TimeZone, Timelike, Weekday,
};
use regex::Captures;
use tracing::{debug, trace};

use crate::clock::Clock;

/// Hour used when the text names a date but no time
pub const DEFAULT_HOUR: u32 = 9;

/// A date found in text
#[derive(Debug, Clone, PartialEq)]
pub struct Detection<Tz: TimeZone> {
    /// Resolved event time, always after "now"
    pub at: DateTime<Tz>,
    /// Rule that produced the date
    pub rule: RuleKind,
    /// Text matched by the rule
    pub matched: String,
    /// Clock time taken from the text, if one was applied
    pub time: Option<NaiveTime>,
}

/// Extract the first future date from `text`
///
/// Returns `None` when no rule matches or every match resolves to the past.
pub fn extract_date<C: Clock>(text: &str, clock: &C) -> Option<DateTime<C::Tz>> {
    detect(text, clock).map(|detection| detection.at)
}

/// Like [`extract_date`], but also reports how the date was found
pub fn detect<C: Clock>(text: &str, clock: &C) -> Option<Detection<C::Tz>> {
    let now = clock.now();

    // One augmentation pass: strip the clock time, find the date in what is left.
    if let Some(found) = find_time(text) {
        match found.time {
            Some(time) => {
                let remainder = found.strip_from(text);
                if let Some(detection) = with_time(match_rules(&remainder, &now), time, &now) {
                    return Some(detection);
                }
                debug!("time {} did not yield a future date, ignoring it", time);
            }
            None => debug!("ignoring out-of-range time {:?}", &text[found.range.clone()]),
        }
    }

    match_rules(text, &now)
}

/// Overlay a clock time onto a date detection
///
/// Midnight counts as "no time given" and keeps the 09:00 default.
fn with_time<Tz: TimeZone>(
    detection: Option<Detection<Tz>>,
    time: NaiveTime,
    now: &DateTime<Tz>,
) -> Option<Detection<Tz>> {
    let mut detection = detection?;
    if time.hour() == 0 && time.minute() == 0 {
        return Some(detection);
    }

    let date = detection.at.date_naive();
    let at = local_datetime(&now.timezone(), date, time)?;
    if at <= *now {
        return None;
    }
    detection.at = at;
    detection.time = Some(time);
    Some(detection)
}

/// Try each rule in order, first future resolution wins
fn match_rules<Tz: TimeZone>(text: &str, now: &DateTime<Tz>) -> Option<Detection<Tz>> {
    for rule in RULES.iter() {
        let Some(caps) = rule.find(text) else {
            continue;
        };
        let matched = caps[0].to_string();

        match resolve(rule.kind, &caps, now) {
            Some(at) if at > *now => {
                debug!(rule = rule.kind.as_str(), %matched, "date detected");
                return Some(Detection {
                    at,
                    rule: rule.kind,
                    matched,
                    time: None,
                });
            }
            Some(_) => trace!(
                rule = rule.kind.as_str(),
                %matched,
                explicit_year = rule.kind.has_explicit_year(),
                "date is in the past"
            ),
            None => trace!(rule = rule.kind.as_str(), %matched, "not a valid date"),
        }
    }
    None
}

/// Resolve a rule match to a timestamp at 09:00 local
fn resolve<Tz: TimeZone>(
    kind: RuleKind,
    caps: &Captures,
    now: &DateTime<Tz>,
) -> Option<DateTime<Tz>> {
    let today = now.date_naive();
    let number = |i: usize| caps.get(i)?.as_str().parse::<u32>().ok();
    let year = |i: usize| caps.get(i)?.as_str().parse::<i32>().ok();
    let month_name = |i: usize| parse_month(caps.get(i)?.as_str());

    let date = match kind {
        RuleKind::IsoDate => NaiveDate::from_ymd_opt(year(1)?, number(2)?, number(3)?),
        RuleKind::EuropeanDot => NaiveDate::from_ymd_opt(year(3)?, number(2)?, number(1)?),
        RuleKind::EuropeanDotNoYear => roll_forward(number(2)?, number(1)?, today),
        RuleKind::MonthDayYear => NaiveDate::from_ymd_opt(year(3)?, month_name(1)?, number(2)?),
        RuleKind::DayMonthYear => NaiveDate::from_ymd_opt(year(3)?, month_name(2)?, number(1)?),
        RuleKind::UsDate => NaiveDate::from_ymd_opt(year(3)?, number(1)?, number(2)?),
        RuleKind::MonthDay => roll_forward(month_name(1)?, number(2)?, today),
        RuleKind::Relative | RuleKind::GermanRelative => resolve_relative(&caps[0], today),
    }?;

    local_datetime(&now.timezone(), date, default_time()?)
}

/// This year's month/day, or next year's if it is already behind `today`
fn roll_forward(month: u32, day: u32, today: NaiveDate) -> Option<NaiveDate> {
    let date = NaiveDate::from_ymd_opt(today.year(), month, day)?;
    if date < today {
        NaiveDate::from_ymd_opt(today.year() + 1, month, day)
    } else {
        Some(date)
    }
}

/// Resolve an English or German relative term against `today`
fn resolve_relative(term: &str, today: NaiveDate) -> Option<NaiveDate> {
    let term = term.to_lowercase();
    let mut words = term.split_whitespace();

    match (words.next()?, words.next()) {
        ("tomorrow", None) | ("morgen", None) => today.checked_add_days(Days::new(1)),
        ("übermorgen", None) => today.checked_add_days(Days::new(2)),
        ("next", Some("week")) | ("nächste", Some("woche")) => {
            today.checked_add_days(Days::new(7))
        }
        ("next", Some("month")) => today.checked_add_months(Months::new(1)),
        ("next", Some(day)) => {
            let target = parse_weekday(day)?;
            today.checked_add_days(Days::new(days_until_next(today.weekday(), target).into()))
        }
        _ => None,
    }
}

/// Parse a weekday name (case-insensitive)
fn parse_weekday(s: &str) -> Option<Weekday> {
    match s.trim().to_lowercase().as_str() {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Days until the next occurrence of `target`, counting today as a week away
fn days_until_next(today: Weekday, target: Weekday) -> u32 {
    let today_num = today.num_days_from_monday();
    let target_num = target.num_days_from_monday();

    match (target_num + 7 - today_num) % 7 {
        0 => 7,
        n => n,
    }
}

fn default_time() -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(DEFAULT_HOUR, 0, 0)
}

/// Place a wall-clock date and time in `tz`
///
/// Times skipped by a DST transition do not exist; ambiguous ones take the
/// earlier instant.
fn local_datetime<Tz: TimeZone>(
    tz: &Tz,
    date: NaiveDate,
    time: NaiveTime,
) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&date.and_time(time)).earliest()
}

/// Format a detected date the way the capture prompt shows it
/// Example: "Fri, Dec 25, 2026, 9:00 AM"
pub fn format_detected<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    at.format("%a, %b %-d, %Y, %-I:%M %p").to_string()
}
