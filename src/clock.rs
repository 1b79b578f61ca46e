//! Clock abstraction
//!
//! Date extraction and reminder offsets are relative to "now". The current
//! time is injected through [`Clock`] so callers (and tests) decide which
//! instant and which time zone "local" means.

use chrono::{DateTime, Local, TimeZone};

/// Source of the current time
pub trait Clock {
    /// Time zone that "local" resolves to (09:00 defaults, calendar dates)
    type Tz: TimeZone;

    /// The current instant in [`Clock::Tz`]
    fn now(&self) -> DateTime<Self::Tz>;
}

/// Wall clock in the system's local time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Tz = Local;

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock pinned to a single instant
#[derive(Debug, Clone)]
pub struct FixedClock<Tz: TimeZone> {
    now: DateTime<Tz>,
}

impl<Tz: TimeZone> FixedClock<Tz> {
    pub fn new(now: DateTime<Tz>) -> Self {
        Self { now }
    }
}

impl<Tz: TimeZone> Clock for FixedClock<Tz> {
    type Tz = Tz;

    fn now(&self) -> DateTime<Tz> {
        self.now.clone()
    }
}
