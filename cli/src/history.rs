use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

/// One persisted quiz attempt. `result` is whatever word the relay returned,
/// usually "Correct" or "Wrong".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttemptRecord {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub result: String,
    pub timestamp: DateTime<Utc>,
}

impl AttemptRecord {
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        result: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            question: question.into(),
            answer: answer.into(),
            result: result.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Whole-file JSON store of the attempt list, ordered oldest-first. The list
/// grows unboundedly and is never pruned; concurrent processes race with
/// last-write-wins.
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kanga")
            .join("history.json")
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Missing or unreadable file means an empty history, never an error.
    pub fn load(&self) -> Vec<AttemptRecord> {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    pub fn append(&self, record: AttemptRecord) -> anyhow::Result<()> {
        let mut attempts = self.load();
        attempts.push(record);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&attempts)?;
        fs::write(&self.path, json)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> HistoryStore {
        HistoryStore::new(dir.path().join("history.json"))
    }

    #[test]
    fn missing_file_loads_as_empty_history() {
        let dir = TempDir::new().unwrap();
        assert!(store_in(&dir).load().is_empty());
    }

    #[test]
    fn append_then_load_preserves_order() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store
            .append(AttemptRecord::new("What is 7 - 3?", "4", "Correct"))
            .unwrap();
        store
            .append(AttemptRecord::new("What is 9 - 5?", "3", "Wrong"))
            .unwrap();

        let attempts = store.load();
        assert_eq!(attempts.len(), 2);
        assert_eq!(attempts[0].question, "What is 7 - 3?");
        assert_eq!(attempts[0].result, "Correct");
        assert_eq!(attempts[1].question, "What is 9 - 5?");
        assert_eq!(attempts[1].result, "Wrong");
    }

    #[test]
    fn history_survives_a_fresh_store_on_the_same_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");

        let first = HistoryStore::new(path.clone());
        first
            .append(AttemptRecord::new("What is 6 - 2?", "4", "Correct"))
            .unwrap();
        let before = first.load();

        // Simulates the page reload: a brand-new store reads the same file.
        let second = HistoryStore::new(path);
        let after = second.load();

        assert_eq!(before, after);
    }

    #[test]
    fn corrupted_file_loads_as_empty_history() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        fs::write(store.path(), "not json at all").unwrap();

        assert!(store.load().is_empty());
    }

    #[test]
    fn unexpected_verdict_words_are_stored_as_is() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store
            .append(AttemptRecord::new("What is 5 - 1?", "4", "Maybe"))
            .unwrap();

        assert_eq!(store.load()[0].result, "Maybe");
    }
}
