//! Durable app data: profile, daily logs, vocabulary.
//!
//! One JSON document on disk, rewritten atomically on every change. This is
//! the append-only collaborator the finish pipeline commits into; the
//! session core never mutates past entries except through
//! [`AppDataStore::update_last_log`].

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use tempfile::NamedTempFile;

use crate::error::{CoreError, Result};
use crate::types::{AppState, LogEntry, VocabEntry};

/// Fields the finish pipeline supplies for a new log entry. Reflection
/// fields are intentionally absent; they stay empty until the reflection
/// step updates the entry.
#[derive(Debug, Clone)]
pub struct NewLogEntry {
    pub module: String,
    pub duration: u32,
    pub content: String,
    pub source_url: String,
    pub screenshot: String,
}

pub struct AppDataStore {
    file_path: PathBuf,
}

impl AppDataStore {
    pub fn new(file_path: PathBuf) -> Self {
        AppDataStore { file_path }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Loads the document. A missing file yields defaults; corrupt JSON is
    /// an error the caller decides how to surface.
    pub fn load(&self) -> Result<AppState> {
        let content = match fs_err::read_to_string(&self.file_path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(AppState::default())
            }
            Err(err) => return Err(CoreError::io("read app data", err)),
        };
        serde_json::from_str(&content).map_err(|e| CoreError::json("parse app data", e))
    }

    pub fn save(&self, state: &AppState) -> Result<()> {
        let parent_dir = self
            .file_path
            .parent()
            .ok_or_else(|| CoreError::FileNotFound(self.file_path.clone()))?;
        fs_err::create_dir_all(parent_dir).map_err(|e| CoreError::io("create data dir", e))?;

        let content = serde_json::to_string_pretty(state)
            .map_err(|e| CoreError::json("serialize app data", e))?;
        let mut temp_file =
            NamedTempFile::new_in(parent_dir).map_err(|e| CoreError::io("create temp file", e))?;
        temp_file
            .write_all(content.as_bytes())
            .map_err(|e| CoreError::io("write app data", e))?;
        temp_file
            .flush()
            .map_err(|e| CoreError::io("flush app data", e))?;
        temp_file
            .persist(&self.file_path)
            .map_err(|e| CoreError::io("persist app data", e.error))?;
        Ok(())
    }

    /// Appends a finished-session log entry. The only write path for
    /// finished sessions.
    pub fn append_log(&self, new: NewLogEntry) -> Result<LogEntry> {
        let now = Local::now();
        self.append_log_at(
            new,
            &now.format("%Y-%m-%d").to_string(),
            &now.format("%H:%M").to_string(),
        )
    }

    /// As [`Self::append_log`] with an explicit day/time, for tests and replays.
    pub fn append_log_at(&self, new: NewLogEntry, date: &str, time: &str) -> Result<LogEntry> {
        let mut state = self.load()?;
        let entry = LogEntry {
            id: next_id(),
            date: date.to_string(),
            module: new.module,
            duration: new.duration,
            score: 0.0,
            reflection: String::new(),
            homework: String::new(),
            learnings: String::new(),
            content: new.content,
            source_url: new.source_url,
            screenshot: new.screenshot,
            time: time.to_string(),
        };
        state.daily_logs.push(entry.clone());
        self.save(&state)?;
        Ok(entry)
    }

    /// Fills the reflection fields of the most recent log entry.
    pub fn update_last_log(
        &self,
        reflection: &str,
        score: f64,
        homework: &str,
        learnings: &str,
    ) -> Result<()> {
        let mut state = self.load()?;
        let last = state.daily_logs.last_mut().ok_or(CoreError::NoLogEntries)?;
        last.reflection = reflection.to_string();
        last.score = score;
        last.homework = homework.to_string();
        last.learnings = learnings.to_string();
        self.save(&state)
    }

    pub fn add_vocabulary(&self, word: &str, def: &str, sentences: &str) -> Result<VocabEntry> {
        let now = Local::now();
        self.add_vocabulary_at(
            word,
            def,
            sentences,
            &now.format("%Y-%m-%d").to_string(),
            &now.format("%H:%M").to_string(),
        )
    }

    pub fn add_vocabulary_at(
        &self,
        word: &str,
        def: &str,
        sentences: &str,
        date: &str,
        time: &str,
    ) -> Result<VocabEntry> {
        let mut state = self.load()?;
        let entry = VocabEntry {
            id: next_id(),
            word: word.to_string(),
            def: def.to_string(),
            sentences: sentences.to_string(),
            date_added: date.to_string(),
            time: time.to_string(),
        };
        state.vocabulary.push(entry.clone());
        self.save(&state)?;
        Ok(entry)
    }

    /// Vocabulary entries added on the given day, in insertion order.
    pub fn vocabulary_for_day(&self, date: &str) -> Result<Vec<VocabEntry>> {
        let state = self.load()?;
        Ok(state
            .vocabulary
            .into_iter()
            .filter(|v| v.date_added == date)
            .collect())
    }

    /// Sum of logged minutes for the given day.
    pub fn minutes_for_day(&self, date: &str) -> Result<u32> {
        let state = self.load()?;
        Ok(state
            .daily_logs
            .iter()
            .filter(|l| l.date == date)
            .map(|l| l.duration)
            .sum())
    }

    /// Today's logged minutes, the dashboard aggregate refreshed after a
    /// finish commits.
    pub fn today_minutes(&self) -> Result<u32> {
        self.minutes_for_day(&Local::now().format("%Y-%m-%d").to_string())
    }
}

fn next_id() -> String {
    chrono::Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_in(dir: &Path) -> AppDataStore {
        AppDataStore::new(dir.join("data.json"))
    }

    fn new_log(module: &str, duration: u32) -> NewLogEntry {
        NewLogEntry {
            module: module.to_string(),
            duration,
            content: "content".to_string(),
            source_url: String::new(),
            screenshot: String::new(),
        }
    }

    #[test]
    fn load_missing_file_returns_defaults() {
        let temp = tempdir().unwrap();
        let state = store_in(temp.path()).load().unwrap();
        assert!(state.daily_logs.is_empty());
        assert!(!state.user_profile.is_setup_complete);
    }

    #[test]
    fn load_corrupt_file_is_an_error() {
        let temp = tempdir().unwrap();
        let store = store_in(temp.path());
        fs_err::write(store.path(), "][").unwrap();
        assert!(store.load().is_err());
    }

    #[test]
    fn append_log_persists_entry() {
        let temp = tempdir().unwrap();
        let store = store_in(temp.path());
        let entry = store
            .append_log_at(new_log("WRITING", 15), "2026-02-01", "09:30")
            .unwrap();
        assert_eq!(entry.duration, 15);
        assert_eq!(entry.reflection, "");

        let state = store.load().unwrap();
        assert_eq!(state.daily_logs.len(), 1);
        assert_eq!(state.daily_logs[0].module, "WRITING");
    }

    #[test]
    fn update_last_log_fills_reflection_fields() {
        let temp = tempdir().unwrap();
        let store = store_in(temp.path());
        store
            .append_log_at(new_log("SPEAKING", 10), "2026-02-01", "10:00")
            .unwrap();
        store
            .update_last_log("went fine", 6.5, "drill part 2", "linking words")
            .unwrap();

        let state = store.load().unwrap();
        let last = state.daily_logs.last().unwrap();
        assert_eq!(last.reflection, "went fine");
        assert_eq!(last.score, 6.5);
        assert_eq!(last.homework, "drill part 2");
    }

    #[test]
    fn update_last_log_without_entries_errors() {
        let temp = tempdir().unwrap();
        let store = store_in(temp.path());
        assert!(store.update_last_log("", 0.0, "", "").is_err());
    }

    #[test]
    fn vocabulary_for_day_filters_and_keeps_order() {
        let temp = tempdir().unwrap();
        let store = store_in(temp.path());
        store
            .add_vocabulary_at("ubiquitous", "everywhere", "", "2026-02-01", "09:00")
            .unwrap();
        store
            .add_vocabulary_at("obsolete", "out of use", "", "2026-01-31", "21:00")
            .unwrap();
        store
            .add_vocabulary_at("tenacious", "persistent", "", "2026-02-01", "09:05")
            .unwrap();

        let today = store.vocabulary_for_day("2026-02-01").unwrap();
        assert_eq!(today.len(), 2);
        assert_eq!(today[0].word, "ubiquitous");
        assert_eq!(today[1].word, "tenacious");
    }

    #[test]
    fn minutes_for_day_sums_matching_logs() {
        let temp = tempdir().unwrap();
        let store = store_in(temp.path());
        store
            .append_log_at(new_log("WRITING", 15), "2026-02-01", "09:30")
            .unwrap();
        store
            .append_log_at(new_log("READING", 30), "2026-02-01", "11:00")
            .unwrap();
        store
            .append_log_at(new_log("SPEAKING", 45), "2026-01-31", "19:00")
            .unwrap();

        assert_eq!(store.minutes_for_day("2026-02-01").unwrap(), 45);
        assert_eq!(store.minutes_for_day("2026-02-02").unwrap(), 0);
    }
}
