//! Domain types shared across the crate: categories, log entries, and the
//! durable app-data document.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Study category of a focus session.
///
/// Reading and listening share the same module shape but are distinct
/// categories for logging and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Writing,
    Speaking,
    Reading,
    Listening,
    Vocabulary,
    Mockup,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Writing => "writing",
            Category::Speaking => "speaking",
            Category::Reading => "reading",
            Category::Listening => "listening",
            Category::Vocabulary => "vocabulary",
            Category::Mockup => "mockup",
        }
    }

    /// Uppercase label used for display and the overlay HUD.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Writing => "WRITING",
            Category::Speaking => "SPEAKING",
            Category::Reading => "READING",
            Category::Listening => "LISTENING",
            Category::Vocabulary => "VOCABULARY",
            Category::Mockup => "MOCKUP",
        }
    }

    /// The mock exam drives its own finer-grained phase label on the HUD;
    /// the generic category push must not overwrite it.
    pub fn manages_own_hud_label(&self) -> bool {
        matches!(self, Category::Mockup)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finished study session, append-only.
///
/// `reflection`, `score`, `homework`, and `learnings` are written empty at
/// finish time and filled in by the later reflection step via
/// [`crate::appdata::AppDataStore::update_last_log`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    /// Day key, `YYYY-MM-DD`.
    pub date: String,
    /// Category label, free text by convention.
    pub module: String,
    /// Duration in minutes, rounded up.
    pub duration: u32,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub reflection: String,
    #[serde(default)]
    pub homework: String,
    #[serde(default)]
    pub learnings: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub source_url: String,
    /// Base64 data URI of the question screenshot, if any.
    #[serde(default)]
    pub screenshot: String,
    /// Time of day, `HH:MM`.
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabEntry {
    pub id: String,
    pub word: String,
    pub def: String,
    /// Newline-separated usage sentences.
    #[serde(default)]
    pub sentences: String,
    pub date_added: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub test_date: String,
    #[serde(default)]
    pub target_score: f64,
    /// Day key of the last app open, used for the daily briefing.
    #[serde(default)]
    pub last_open_date: String,
    #[serde(default)]
    pub is_setup_complete: bool,
    /// Reminder clock times, e.g. `["10:00", "22:00"]`.
    #[serde(default)]
    pub reminder_times: Vec<String>,
    #[serde(default)]
    pub reminder_enabled: bool,
    #[serde(default)]
    pub tutorial_seen: bool,
}

impl Default for UserProfile {
    fn default() -> Self {
        UserProfile {
            name: String::new(),
            test_date: "2026-03-01".to_string(),
            target_score: 7.5,
            last_open_date: String::new(),
            is_setup_complete: false,
            reminder_times: vec!["10:00".to_string(), "22:00".to_string()],
            reminder_enabled: true,
            tutorial_seen: false,
        }
    }
}

/// The durable app-data document, one JSON file on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppState {
    #[serde(default)]
    pub user_profile: UserProfile,
    #[serde(default)]
    pub daily_logs: Vec<LogEntry>,
    #[serde(default)]
    pub vocabulary: Vec<VocabEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Category::Mockup).unwrap(),
            "\"mockup\""
        );
        let parsed: Category = serde_json::from_str("\"listening\"").unwrap();
        assert_eq!(parsed, Category::Listening);
    }

    #[test]
    fn category_labels_are_uppercase() {
        assert_eq!(Category::Writing.label(), "WRITING");
        assert_eq!(Category::Vocabulary.label(), "VOCABULARY");
    }

    #[test]
    fn only_mockup_manages_its_own_hud_label() {
        assert!(Category::Mockup.manages_own_hud_label());
        assert!(!Category::Writing.manages_own_hud_label());
        assert!(!Category::Listening.manages_own_hud_label());
    }

    #[test]
    fn app_state_defaults_are_setup_incomplete() {
        let state = AppState::default();
        assert!(!state.user_profile.is_setup_complete);
        assert_eq!(state.user_profile.test_date, "2026-03-01");
        assert_eq!(state.user_profile.reminder_times.len(), 2);
        assert!(state.daily_logs.is_empty());
    }

    #[test]
    fn log_entry_tolerates_missing_optional_fields() {
        let entry: LogEntry = serde_json::from_str(
            r#"{"id":"1","date":"2026-02-01","module":"Writing","duration":15,"time":"09:30"}"#,
        )
        .unwrap();
        assert_eq!(entry.duration, 15);
        assert_eq!(entry.content, "");
        assert_eq!(entry.score, 0.0);
    }
}
