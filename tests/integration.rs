//! Integration tests for the reminder capture library

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use reminder_capture::capture::{suggest, CaptureRecord, Source};
use reminder_capture::clock::FixedClock;
use reminder_capture::export::{export_payload, ExportSettings, ExportTarget};
use reminder_capture::store::CaptureStore;
use reminder_capture::{extract_date, reminder_time, Error};
use tempfile::TempDir;

/// Test helper: a clock in Central European Time
fn cet_clock(y: i32, m: u32, d: u32, h: u32, min: u32) -> FixedClock<FixedOffset> {
    let cet = FixedOffset::east_opt(3600).unwrap();
    FixedClock::new(cet.with_ymd_and_hms(y, m, d, h, min, 0).unwrap())
}

#[test]
fn test_capture_save_load_export() {
    let clock = cet_clock(2026, 11, 20, 10, 15);
    let text = "Zahnarzt am 09.01.2027 08:40 Uhr, bitte Karte mitbringen";

    let suggestion = suggest(text, &clock);
    let event = suggestion.event().cloned().expect("date should be detected");
    assert_eq!(event.to_rfc3339(), "2027-01-09T08:40:00+01:00");
    assert_eq!(suggestion.lead_time().as_deref(), Some("1 day before"));

    let now = now_of(&clock);
    let due = suggestion.default_due(now);
    let source = Source {
        url: "https://praxis.example/termine".to_string(),
        title: "Praxis".to_string(),
    };
    let record = CaptureRecord::new(text, Some(due), source, now).unwrap();

    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("capture.json");
    record.save(&path).expect("Failed to save capture");
    assert!(path.exists(), "Capture file was not created");

    let loaded = CaptureRecord::load(&path).expect("Failed to load capture");
    assert_eq!(loaded, record);

    let event_payload =
        export_payload(&loaded, ExportTarget::Calendar, &ExportSettings::default()).unwrap();
    assert_eq!(event_payload["summary"], text);
    assert_eq!(event_payload["description"], "Praxis: https://praxis.example/termine");
    assert_eq!(event_payload["start"]["dateTime"], "2027-01-08T07:40:00Z");
    assert_eq!(event_payload["end"]["dateTime"], "2027-01-08T08:40:00Z");

    let bridge_payload =
        export_payload(&loaded, ExportTarget::Bridge, &ExportSettings::default()).unwrap();
    assert_eq!(bridge_payload["listName"], "Create Reminders");
    assert_eq!(bridge_payload["dueAt"], "2027-01-08T07:40:00Z");
}

fn now_of(clock: &FixedClock<FixedOffset>) -> DateTime<FixedOffset> {
    use reminder_capture::Clock;
    clock.now()
}

#[test]
fn test_capture_without_date_exports_only_to_bridge() {
    let clock = cet_clock(2026, 11, 20, 10, 15);
    let record = CaptureRecord::new(
        "Read the article about sourdough",
        None::<DateTime<FixedOffset>>,
        Source::default(),
        now_of(&clock),
    )
    .unwrap();
    assert!(suggest(&record.text, &clock).detection.is_none());

    let calendar = export_payload(&record, ExportTarget::Calendar, &ExportSettings::default());
    assert!(matches!(calendar, Err(Error::MissingDueDate(_))));

    let bridge = export_payload(&record, ExportTarget::Bridge, &ExportSettings::default()).unwrap();
    assert!(bridge["dueAt"].is_null());
}

#[test]
fn test_store_capture_reschedule_export_delete() {
    let clock = cet_clock(2026, 11, 20, 10, 15);
    let now = now_of(&clock);
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("reminders.json");

    let mut store = CaptureStore::open(&path).expect("Failed to open store");
    for text in ["Zahnarzt am 09.01.2027 08:40 Uhr", "Call the plumber"] {
        let due = suggest(text, &clock).remind_at;
        let record = CaptureRecord::new(text, due, Source::default(), now).unwrap();
        store.add(record).expect("Failed to add reminder");
    }
    store.save(&path).expect("Failed to save store");

    let mut store = CaptureStore::load(&path).expect("Failed to load store");
    assert_eq!(store.len(), 2);
    let plumber = store.records()[0].clone();
    let dentist = store.records()[1].clone();
    assert_eq!(plumber.text, "Call the plumber");
    assert_eq!(plumber.due_at, None);
    assert_eq!(
        dentist.due_at.map(|due| due.to_rfc3339()).as_deref(),
        Some("2027-01-08T08:40:00+01:00")
    );

    let calendar = export_payload(
        store.find(&plumber.id).unwrap(),
        ExportTarget::Calendar,
        &ExportSettings::default(),
    );
    assert!(matches!(calendar, Err(Error::MissingDueDate(_))));

    let due = FixedOffset::east_opt(3600)
        .unwrap()
        .with_ymd_and_hms(2026, 11, 21, 8, 0, 0)
        .unwrap();
    store.set_due(&plumber.id, Some(due)).unwrap();
    let payload = export_payload(
        store.find(&plumber.id).unwrap(),
        ExportTarget::Calendar,
        &ExportSettings::default(),
    )
    .unwrap();
    assert_eq!(payload["start"]["dateTime"], "2026-11-21T07:00:00Z");

    store.remove(&dentist.id).unwrap();
    store.save(&path).unwrap();

    let reloaded = CaptureStore::load(&path).unwrap();
    assert_eq!(reloaded.len(), 1);
    assert!(reloaded.get(&dentist.id).is_none());
    assert_eq!(reloaded.get(&plumber.id).unwrap().due_at, Some(due));
    assert!(matches!(reloaded.find(&dentist.id), Err(Error::NotFound(_))));
}

#[test]
fn test_load_rejects_invalid_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    let missing = temp_dir.path().join("missing.json");
    assert!(matches!(CaptureRecord::load(&missing), Err(Error::Io(_))));

    let garbage = temp_dir.path().join("garbage.json");
    std::fs::write(&garbage, "not json").unwrap();
    assert!(matches!(CaptureRecord::load(&garbage), Err(Error::Json(_))));

    let blank = temp_dir.path().join("blank.json");
    std::fs::write(
        &blank,
        r#"{"id":"b1","text":"   ","dueAt":null,"createdAt":"2026-11-20T10:15:00+01:00"}"#,
    )
    .unwrap();
    assert!(matches!(CaptureRecord::load(&blank), Err(Error::EmptyText)));
}

#[test]
fn test_extracted_dates_are_always_future() {
    let samples = vec![
        "Meeting on 2025-12-25 at the office",
        "Conference December 25, 2025 in NYC",
        "Party on December 25th, 2027",
        "Deadline is 12/25/2026",
        "Event on March 15th",
        "Meeting August 10th",
        "Due tomorrow",
        "Meeting next week",
        "next Friday 7:15 am",
        "Abgabe 24.12.",
        "Treffen nächste Woche um 14:00 Uhr",
        "Just some random text with no date",
    ];

    for hour in [0, 6, 12, 18, 23] {
        let clock = cet_clock(2026, 11, 20, hour, 59);
        let now = now_of(&clock);
        for text in &samples {
            if let Some(found) = extract_date(text, &clock) {
                assert!(found > now, "{:?} at hour {} gave {}", text, hour, found);
            }
        }
    }
}

#[test]
fn test_reminder_never_after_event() {
    let clock = cet_clock(2026, 11, 20, 10, 15);
    let now = now_of(&clock);

    for minutes in [-120, 0, 10, 29, 31, 59, 121, 239, 241, 1439, 1441, 10_000] {
        let event = now + Duration::minutes(minutes);
        let reminder = reminder_time(Some(event), &clock).unwrap();
        if minutes > 30 {
            assert!(reminder <= event, "{} minutes out", minutes);
        } else {
            assert_eq!(reminder, now, "{} minutes out", minutes);
        }
    }
}

#[test]
fn test_reminder_tiers_from_now() {
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 10, 16, 14, 30, 0).unwrap());
    let now = Utc.with_ymd_and_hms(2026, 10, 16, 14, 30, 0).unwrap();

    let cases = vec![
        (Duration::hours(48), now + Duration::hours(24)),
        (Duration::hours(8), now + Duration::hours(4)),
        (Duration::hours(1), now + Duration::minutes(30)),
        (Duration::minutes(10), now),
    ];

    for (until, expected) in cases {
        assert_eq!(reminder_time(Some(now + until), &clock), Some(expected));
    }
}
