//! Saved reminders
//!
//! Captures accumulate in a single JSON file, newest first, until they are
//! sent or deleted. The store is capped at [`MAX_REMINDERS`] entries.

use std::fs;
use std::path::Path;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::capture::{validate_text, CaptureRecord};
use crate::error::{Error, Result};

/// Maximum number of stored reminders
pub const MAX_REMINDERS: usize = 1000;

/// Store file used when none is given
pub const DEFAULT_STORE_FILE: &str = "reminders.json";

/// The list of saved reminders
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptureStore {
    reminders: Vec<CaptureRecord>,
}

impl CaptureStore {
    /// Load the store from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let store: CaptureStore = serde_json::from_str(&content)?;
        for record in &store.reminders {
            validate_text(&record.text)?;
        }
        Ok(store)
    }

    /// Load the store, or start an empty one if the file does not exist yet
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("no store at {}, starting empty", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Save the store as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        debug!("saved {} reminders to {}", self.len(), path.display());
        Ok(())
    }

    /// Stored reminders, newest first
    pub fn records(&self) -> &[CaptureRecord] {
        &self.reminders
    }

    pub fn len(&self) -> usize {
        self.reminders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CaptureRecord> {
        self.reminders.iter().find(|r| r.id == id)
    }

    /// Like [`CaptureStore::get`], but a missing id is an error
    pub fn find(&self, id: &str) -> Result<&CaptureRecord> {
        self.get(id).ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Insert a record at the front
    ///
    /// Refused once the store holds [`MAX_REMINDERS`] entries.
    pub fn add(&mut self, record: CaptureRecord) -> Result<&CaptureRecord> {
        if self.reminders.len() >= MAX_REMINDERS {
            return Err(Error::StoreFull { max: MAX_REMINDERS });
        }
        self.reminders.insert(0, record);
        Ok(&self.reminders[0])
    }

    /// Remove and return the record with `id`
    pub fn remove(&mut self, id: &str) -> Result<CaptureRecord> {
        let index = self
            .reminders
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        Ok(self.reminders.remove(index))
    }

    /// Set or clear the due time of the record with `id`
    pub fn set_due<Tz: TimeZone>(
        &mut self,
        id: &str,
        due_at: Option<DateTime<Tz>>,
    ) -> Result<&CaptureRecord> {
        let record = self
            .reminders
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        record.due_at = due_at.map(|due| due.fixed_offset());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::Source;
    use chrono::Utc;
    use tempfile::TempDir;

    fn record(text: &str) -> CaptureRecord {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 14, 30, 0).unwrap();
        CaptureRecord::new(text, None, Source::default(), now).unwrap()
    }

    #[test]
    fn test_add_puts_newest_first() {
        let mut store = CaptureStore::default();
        store.add(record("first")).unwrap();
        store.add(record("second")).unwrap();

        let texts: Vec<&str> = store.records().iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["second", "first"]);
    }

    #[test]
    fn test_add_refuses_when_full() {
        let mut store = CaptureStore::default();
        for i in 0..MAX_REMINDERS {
            store.add(record(&format!("item {}", i))).unwrap();
        }
        assert_eq!(store.len(), MAX_REMINDERS);

        let result = store.add(record("one too many"));
        assert!(matches!(result, Err(Error::StoreFull { max: MAX_REMINDERS })));
        assert_eq!(store.len(), MAX_REMINDERS);
        assert_eq!(store.records()[0].text, format!("item {}", MAX_REMINDERS - 1));
    }

    #[test]
    fn test_get_and_remove() {
        let mut store = CaptureStore::default();
        let id = store.add(record("Call mom")).unwrap().id.clone();
        store.add(record("Buy milk")).unwrap();

        assert_eq!(store.get(&id).unwrap().text, "Call mom");
        assert!(store.get("missing").is_none());
        assert!(matches!(store.find("missing"), Err(Error::NotFound(_))));

        let removed = store.remove(&id).unwrap();
        assert_eq!(removed.text, "Call mom");
        assert_eq!(store.len(), 1);
        assert!(matches!(store.remove(&id), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_set_due_and_clear() {
        let mut store = CaptureStore::default();
        let id = store.add(record("Renew passport")).unwrap().id.clone();

        let due = Utc.with_ymd_and_hms(2026, 12, 1, 9, 0, 0).unwrap();
        let updated = store.set_due(&id, Some(due)).unwrap();
        assert_eq!(updated.due_at, Some(due.fixed_offset()));

        let cleared = store.set_due(&id, None::<DateTime<Utc>>).unwrap();
        assert_eq!(cleared.due_at, None);

        let missing = store.set_due("missing", Some(due));
        assert!(matches!(missing, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("reminders.json");

        let opened = CaptureStore::open(&path).unwrap();
        assert!(opened.is_empty());
        assert!(matches!(CaptureStore::load(&path), Err(Error::Io(_))));

        let mut store = CaptureStore::default();
        store.add(record("Call mom")).unwrap();
        store.add(record("Buy milk")).unwrap();
        store.save(&path).unwrap();

        let loaded = CaptureStore::open(&path).unwrap();
        assert_eq!(loaded, store);

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["reminders"][0]["text"], "Buy milk");
    }

    #[test]
    fn test_load_rejects_blank_entry() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("reminders.json");
        fs::write(
            &path,
            r#"{"reminders": [
                {"id": "x", "text": " ", "dueAt": null, "createdAt": "2026-10-16T14:30:00Z"}
            ]}"#,
        )
        .unwrap();
        assert!(matches!(CaptureStore::load(&path), Err(Error::EmptyText)));
    }
}
