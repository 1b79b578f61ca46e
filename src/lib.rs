//! Reminder Capture Library
//!
//! Turns a piece of selected text into a reminder. This library provides
//! functionality to:
//! - Detect a due date in free-form text (ISO, US, European, month names,
//!   English and German relative terms, clock times)
//! - Suggest a reminder time ahead of the detected event
//! - Build, validate, load and save capture records
//! - Keep a capped list of saved reminders to review, reschedule or delete
//! - Produce calendar event and reminders bridge payloads
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use reminder_capture::clock::FixedClock;
//! use reminder_capture::capture::suggest;
//!
//! let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 10, 16, 14, 30, 0).unwrap());
//! let suggestion = suggest("Dentist tomorrow at 3:30 pm", &clock);
//!
//! assert_eq!(suggestion.event(), Some(&Utc.with_ymd_and_hms(2026, 10, 17, 15, 30, 0).unwrap()));
//! assert_eq!(suggestion.lead_time().as_deref(), Some("1 day before"));
//! ```

pub mod capture;
pub mod clock;
pub mod date;
pub mod error;
pub mod export;
pub mod reminder;
pub mod store;

// Re-export commonly used items
pub use capture::{suggest, CaptureRecord, CaptureSuggestion, Source};
pub use clock::{Clock, FixedClock, SystemClock};
pub use date::{detect, extract_date, Detection, RuleKind};
pub use error::{Error, Result};
pub use export::{export_payload, ExportSettings, ExportTarget};
pub use reminder::{reminder_time, remind_before};
pub use store::CaptureStore;
