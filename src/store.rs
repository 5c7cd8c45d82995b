//! Durable, per-date storage of completion records.
//!
//! Storage is best-effort: a missing or unreadable record is the normal
//! "not yet completed" state, and a failed write is logged but never blocks
//! the summary the learner just earned (the in-memory record stays
//! authoritative for the current view).

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::CompletionRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored record is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Narrow key-value contract the completion store runs on, so tests can
/// swap the file backend for an in-memory one.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

const DATE_INDEX_KEY: &str = "completions:index";

fn record_key(date: &str) -> String {
    format!("completions:{date}")
}

/// One JSON-serialized [`CompletionRecord`] per date key, plus an index of
/// all known dates. `save` is an upsert by date: a second completion for
/// the same date overwrites the first.
pub struct CompletionStore {
    storage: Box<dyn KeyValueStorage>,
}

impl CompletionStore {
    pub fn new(storage: Box<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    pub fn save(&mut self, record: &CompletionRecord) {
        if let Err(err) = self.try_save(record) {
            log::warn!("could not persist completion for {}: {err}", record.date);
        }
    }

    fn try_save(&mut self, record: &CompletionRecord) -> Result<(), StoreError> {
        // Serialize the whole record before the single write call, so a
        // reader never observes a half-written value.
        let value = serde_json::to_string(record)?;
        self.storage.set(&record_key(&record.date), value)?;

        let mut dates = self.known_dates();
        if !dates.iter().any(|d| d == &record.date) {
            dates.push(record.date.clone());
            dates.sort();
            self.storage
                .set(DATE_INDEX_KEY, serde_json::to_string(&dates)?)?;
        }
        Ok(())
    }

    /// `None` means "not yet completed" — including the case where the
    /// stored value failed to parse, which is logged and treated the same.
    pub fn load(&self, date: &str) -> Option<CompletionRecord> {
        let raw = self.storage.get(&record_key(date))?;
        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(err) => {
                log::warn!("discarding unreadable completion for {date}: {err}");
                None
            }
        }
    }

    /// All dates with a stored completion, oldest first.
    pub fn known_dates(&self) -> Vec<String> {
        self.storage
            .get(DATE_INDEX_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    /// Wipes every stored completion. Debug builds only.
    #[cfg(debug_assertions)]
    pub fn clear(&mut self) {
        for date in self.known_dates() {
            if let Err(err) = self.storage.remove(&record_key(&date)) {
                log::warn!("could not remove completion for {date}: {err}");
            }
        }
        if let Err(err) = self.storage.remove(DATE_INDEX_KEY) {
            log::warn!("could not remove completion index: {err}");
        }
    }
}

/// File-backed storage: the whole key space is one JSON object on disk,
/// rewritten on every set.
pub struct FileStorage {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStorage {
    /// Opens the backing file, starting empty when it is missing. A
    /// corrupt file is logged and treated as empty rather than failing
    /// startup.
    pub fn open(path: PathBuf) -> Self {
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                log::warn!("ignoring corrupt storage file {}: {err}", path.display());
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };
        Self { path, entries }
    }

    fn persist(&self) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&self.entries)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value);
        self.persist()
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        self.persist()
    }
}

/// In-memory storage for tests.
#[derive(Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(date: &str, total_score: u32) -> CompletionRecord {
        CompletionRecord {
            date: date.into(),
            completed_at: Utc::now(),
            total_score,
            correct_answers: 2,
            total_challenges: 2,
            accuracy: 100,
            time_spent_secs: 45,
            challenge_ids: vec!["a".into(), "b".into()],
            correct_challenge_ids: vec!["a".into(), "b".into()],
        }
    }

    fn store() -> CompletionStore {
        CompletionStore::new(Box::new(MemoryStorage::default()))
    }

    #[test]
    fn missing_date_loads_as_none() {
        let store = store();
        assert!(store.load("2025-01-01").is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut store = store();
        let rec = record("2025-01-01", 30);
        store.save(&rec);
        assert_eq!(store.load("2025-01-01"), Some(rec));
        assert_eq!(store.known_dates(), vec!["2025-01-01"]);
    }

    #[test]
    fn saving_twice_for_one_date_keeps_the_second_record() {
        let mut store = store();
        store.save(&record("2025-01-01", 10));
        let second = record("2025-01-01", 30);
        store.save(&second);
        assert_eq!(store.load("2025-01-01"), Some(second));
        assert_eq!(store.known_dates().len(), 1);
    }

    #[test]
    fn index_keeps_dates_sorted() {
        let mut store = store();
        store.save(&record("2025-02-01", 10));
        store.save(&record("2025-01-15", 10));
        assert_eq!(store.known_dates(), vec!["2025-01-15", "2025-02-01"]);
    }

    #[test]
    fn unreadable_record_is_treated_as_not_completed() {
        let mut storage = MemoryStorage::default();
        storage
            .set(&record_key("2025-01-01"), "{not json".into())
            .unwrap();
        let store = CompletionStore::new(Box::new(storage));
        assert!(store.load("2025-01-01").is_none());
    }

    #[cfg(debug_assertions)]
    #[test]
    fn clear_removes_every_record_and_the_index() {
        let mut store = store();
        store.save(&record("2025-01-01", 10));
        store.save(&record("2025-01-02", 20));
        store.clear();
        assert!(store.load("2025-01-01").is_none());
        assert!(store.load("2025-01-02").is_none());
        assert!(store.known_dates().is_empty());
    }
}
