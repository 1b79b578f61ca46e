//! Ordered date pattern table
//!
//! Rules are tried top to bottom. Numeric forms carrying a year come before
//! the year-less forms that would otherwise match a prefix of them.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Classification of a date rule, which also selects its resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// `2025-12-25`, `2025/12/25`
    IsoDate,
    /// `09.01.2026`, `9.1.2026`
    EuropeanDot,
    /// `09.01.`
    EuropeanDotNoYear,
    /// `December 25, 2025`, `Dec 25th 2026`
    MonthDayYear,
    /// `25 December 2025`
    DayMonthYear,
    /// `12/25/2025`, `12-25-2025`
    UsDate,
    /// `December 18th`, `Dec 25`
    MonthDay,
    /// `tomorrow`, `next week`, `next month`, `next friday`
    Relative,
    /// `morgen`, `übermorgen`, `nächste Woche`
    GermanRelative,
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::IsoDate => "iso",
            RuleKind::EuropeanDot => "european_dot",
            RuleKind::EuropeanDotNoYear => "european_dot_no_year",
            RuleKind::MonthDayYear => "month_day_year",
            RuleKind::DayMonthYear => "day_month_year",
            RuleKind::UsDate => "us",
            RuleKind::MonthDay => "month_day",
            RuleKind::Relative => "relative",
            RuleKind::GermanRelative => "german_relative",
        }
    }

    /// Whether the text itself carries the year (no rollover applies)
    pub fn has_explicit_year(&self) -> bool {
        matches!(
            self,
            RuleKind::IsoDate
                | RuleKind::EuropeanDot
                | RuleKind::MonthDayYear
                | RuleKind::DayMonthYear
                | RuleKind::UsDate
        )
    }
}

/// A compiled rule: a match expression plus the resolver it dispatches to
pub struct PatternRule {
    pub kind: RuleKind,
    regex: Regex,
    /// A candidate immediately followed by this is skipped
    not_followed_by: Option<Regex>,
}

impl PatternRule {
    fn new(kind: RuleKind, pattern: &str) -> Self {
        Self {
            kind,
            regex: Regex::new(pattern).expect("date rule pattern must compile"),
            not_followed_by: None,
        }
    }

    fn not_followed_by(mut self, pattern: &str) -> Self {
        self.not_followed_by = Some(Regex::new(pattern).expect("guard pattern must compile"));
        self
    }

    /// First acceptable match anywhere in `text`
    pub fn find<'t>(&self, text: &'t str) -> Option<Captures<'t>> {
        self.regex.captures_iter(text).find(|caps| {
            let Some(guard) = &self.not_followed_by else {
                return true;
            };
            let end = caps.get(0).map_or(0, |m| m.end());
            !guard.is_match(&text[end..])
        })
    }
}

const MONTH: &str = concat!(
    r"(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?",
    r"|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)",
);

const WEEKDAY: &str = r"(?:monday|tuesday|wednesday|thursday|friday|saturday|sunday)";

/// All rules in priority order
pub static RULES: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    vec![
        PatternRule::new(RuleKind::IsoDate, r"(\d{4})[-/](\d{1,2})[-/](\d{1,2})"),
        PatternRule::new(RuleKind::EuropeanDot, r"(\d{1,2})\.(\d{1,2})\.(\d{4})"),
        PatternRule::new(RuleKind::EuropeanDotNoYear, r"(\d{1,2})\.(\d{1,2})\.")
            .not_followed_by(r"^\d"),
        PatternRule::new(
            RuleKind::MonthDayYear,
            &format!(r"(?i)\b{MONTH}\b\.?\s+(\d{{1,2}})(?:st|nd|rd|th)?,?\s+(\d{{4}})"),
        ),
        PatternRule::new(
            RuleKind::DayMonthYear,
            &format!(r"(?i)(\d{{1,2}})\s+{MONTH}\b\.?\s+(\d{{4}})"),
        ),
        PatternRule::new(RuleKind::UsDate, r"(\d{1,2})[-/](\d{1,2})[-/](\d{4})"),
        PatternRule::new(
            RuleKind::MonthDay,
            &format!(r"(?i)\b{MONTH}\b\.?\s+(\d{{1,2}})(?:st|nd|rd|th)?\b"),
        )
        .not_followed_by(r"^\s*,?\s*\d{4}"),
        PatternRule::new(
            RuleKind::Relative,
            &format!(r"(?i)\b(tomorrow|next\s+(week|month|{WEEKDAY}))\b"),
        ),
        PatternRule::new(RuleKind::GermanRelative, r"(?i)\b(übermorgen|morgen|nächste\s+woche)\b"),
    ]
});

/// Month number from an English month name or abbreviation
pub fn parse_month(name: &str) -> Option<u32> {
    let prefix: String = name.chars().take(3).collect::<String>().to_lowercase();
    let month = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}
