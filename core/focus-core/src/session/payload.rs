//! Per-category session payloads.
//!
//! Each category module owns one variant and always emits its full slice;
//! the core never diffs inside a variant. The union is internally tagged with
//! the category so the durable form stays self-describing.

use serde::{Deserialize, Serialize};

use crate::types::Category;

/// One in-progress writing task: the draft plus its question context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TaskDraft {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub premise: String,
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub screenshot: String,
}

impl TaskDraft {
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// An essay the user explicitly submitted during the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Essay {
    pub title: String,
    pub content: String,
    /// `TASK1` or `TASK2`.
    pub kind: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Task1,
    #[default]
    Task2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WritingPayload {
    #[serde(default)]
    pub duration_secs: u64,
    #[serde(default)]
    pub task_kind: TaskKind,
    #[serde(default)]
    pub submitted_essays: Vec<Essay>,
    #[serde(default)]
    pub task1: TaskDraft,
    #[serde(default)]
    pub task2: TaskDraft,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SpeakingPayload {
    #[serde(default)]
    pub duration_secs: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub has_recording: bool,
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub screenshot: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExamMode {
    #[default]
    Academic,
    General,
}

/// Shared by the reading and listening modules (score calculator + notes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ReadingPayload {
    #[serde(default)]
    pub duration_secs: u64,
    #[serde(default)]
    pub raw_score: u32,
    #[serde(default)]
    pub exam_mode: ExamMode,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub screenshot: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct VocabularyPayload {
    #[serde(default)]
    pub duration_secs: u64,
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub sentences: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct MockScores {
    #[serde(default)]
    pub listening: f64,
    #[serde(default)]
    pub reading: f64,
    #[serde(default)]
    pub writing: f64,
    #[serde(default)]
    pub speaking: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MockupPayload {
    #[serde(default)]
    pub duration_secs: u64,
    /// 0 = preparation, then listening, reading, writing, speaking.
    #[serde(default)]
    pub step: u8,
    #[serde(default)]
    pub scores: MockScores,
    #[serde(default)]
    pub notes: String,
}

/// The session's category-owned data, one variant per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum SessionPayload {
    Writing(WritingPayload),
    Speaking(SpeakingPayload),
    Reading(ReadingPayload),
    Listening(ReadingPayload),
    Vocabulary(VocabularyPayload),
    Mockup(MockupPayload),
}

impl SessionPayload {
    /// Category this payload belongs to.
    pub fn category(&self) -> Category {
        match self {
            SessionPayload::Writing(_) => Category::Writing,
            SessionPayload::Speaking(_) => Category::Speaking,
            SessionPayload::Reading(_) => Category::Reading,
            SessionPayload::Listening(_) => Category::Listening,
            SessionPayload::Vocabulary(_) => Category::Vocabulary,
            SessionPayload::Mockup(_) => Category::Mockup,
        }
    }

    /// Empty payload for a category, used when a session starts before the
    /// module has emitted anything.
    pub fn empty_for(category: Category) -> Self {
        match category {
            Category::Writing => SessionPayload::Writing(WritingPayload::default()),
            Category::Speaking => SessionPayload::Speaking(SpeakingPayload::default()),
            Category::Reading => SessionPayload::Reading(ReadingPayload::default()),
            Category::Listening => SessionPayload::Listening(ReadingPayload::default()),
            Category::Vocabulary => SessionPayload::Vocabulary(VocabularyPayload::default()),
            Category::Mockup => SessionPayload::Mockup(MockupPayload::default()),
        }
    }

    /// Elapsed seconds reported by the category module's timer.
    pub fn duration_secs(&self) -> u64 {
        match self {
            SessionPayload::Writing(p) => p.duration_secs,
            SessionPayload::Speaking(p) => p.duration_secs,
            SessionPayload::Reading(p) | SessionPayload::Listening(p) => p.duration_secs,
            SessionPayload::Vocabulary(p) => p.duration_secs,
            SessionPayload::Mockup(p) => p.duration_secs,
        }
    }

    pub fn set_duration_secs(&mut self, secs: u64) {
        match self {
            SessionPayload::Writing(p) => p.duration_secs = secs,
            SessionPayload::Speaking(p) => p.duration_secs = secs,
            SessionPayload::Reading(p) | SessionPayload::Listening(p) => p.duration_secs = secs,
            SessionPayload::Vocabulary(p) => p.duration_secs = secs,
            SessionPayload::Mockup(p) => p.duration_secs = secs,
        }
    }

    /// Scratchpad text, where the category has one.
    pub fn notes(&self) -> Option<&str> {
        match self {
            SessionPayload::Speaking(p) => Some(&p.notes),
            SessionPayload::Reading(p) | SessionPayload::Listening(p) => Some(&p.notes),
            SessionPayload::Mockup(p) => Some(&p.notes),
            SessionPayload::Writing(_) | SessionPayload::Vocabulary(_) => None,
        }
    }

    /// Scratchpad field the overlay's notes feed into, where the category
    /// has one. Writing and vocabulary keep no scratchpad.
    pub fn notes_mut(&mut self) -> Option<&mut String> {
        match self {
            SessionPayload::Speaking(p) => Some(&mut p.notes),
            SessionPayload::Reading(p) | SessionPayload::Listening(p) => Some(&mut p.notes),
            SessionPayload::Mockup(p) => Some(&mut p.notes),
            SessionPayload::Writing(_) | SessionPayload::Vocabulary(_) => None,
        }
    }

    /// Source URL captured by the module, if its shape carries one.
    pub fn source_url(&self) -> &str {
        match self {
            SessionPayload::Writing(p) => {
                let active = match p.task_kind {
                    TaskKind::Task1 => &p.task1,
                    TaskKind::Task2 => &p.task2,
                };
                &active.source_url
            }
            SessionPayload::Speaking(p) => &p.source_url,
            SessionPayload::Reading(p) | SessionPayload::Listening(p) => &p.source_url,
            SessionPayload::Vocabulary(_) | SessionPayload::Mockup(_) => "",
        }
    }

    /// Screenshot data URI captured by the module, if any.
    pub fn screenshot(&self) -> &str {
        match self {
            SessionPayload::Writing(p) => {
                let active = match p.task_kind {
                    TaskKind::Task1 => &p.task1,
                    TaskKind::Task2 => &p.task2,
                };
                &active.screenshot
            }
            SessionPayload::Speaking(p) => &p.screenshot,
            SessionPayload::Reading(p) | SessionPayload::Listening(p) => &p.screenshot,
            SessionPayload::Vocabulary(_) | SessionPayload::Mockup(_) => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_for_matches_category() {
        for category in [
            Category::Writing,
            Category::Speaking,
            Category::Reading,
            Category::Listening,
            Category::Vocabulary,
            Category::Mockup,
        ] {
            assert_eq!(SessionPayload::empty_for(category).category(), category);
        }
    }

    #[test]
    fn serialized_form_carries_category_tag() {
        let payload = SessionPayload::Listening(ReadingPayload {
            raw_score: 32,
            ..Default::default()
        });
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["category"], "listening");
        assert_eq!(json["raw_score"], 32);
    }

    #[test]
    fn deserializes_by_tag() {
        let payload: SessionPayload =
            serde_json::from_str(r#"{"category":"vocabulary","word":"obsequious"}"#).unwrap();
        match payload {
            SessionPayload::Vocabulary(p) => assert_eq!(p.word, "obsequious"),
            other => panic!("wrong variant: {:?}", other),
        }
    }

    #[test]
    fn notes_mut_only_for_scratchpad_categories() {
        assert!(SessionPayload::empty_for(Category::Speaking)
            .notes_mut()
            .is_some());
        assert!(SessionPayload::empty_for(Category::Mockup)
            .notes_mut()
            .is_some());
        assert!(SessionPayload::empty_for(Category::Writing)
            .notes_mut()
            .is_none());
        assert!(SessionPayload::empty_for(Category::Vocabulary)
            .notes_mut()
            .is_none());
    }

    #[test]
    fn notes_reader_agrees_with_notes_mut() {
        for category in [
            Category::Writing,
            Category::Speaking,
            Category::Reading,
            Category::Listening,
            Category::Vocabulary,
            Category::Mockup,
        ] {
            let mut payload = SessionPayload::empty_for(category);
            assert_eq!(payload.notes().is_some(), payload.notes_mut().is_some());
        }
    }

    #[test]
    fn writing_source_url_follows_active_task() {
        let mut p = WritingPayload::default();
        p.task_kind = TaskKind::Task1;
        p.task1.source_url = "https://example.org/q1".to_string();
        p.task2.source_url = "https://example.org/q2".to_string();
        let payload = SessionPayload::Writing(p);
        assert_eq!(payload.source_url(), "https://example.org/q1");
    }

    #[test]
    fn set_duration_round_trips() {
        let mut payload = SessionPayload::empty_for(Category::Reading);
        payload.set_duration_secs(301);
        assert_eq!(payload.duration_secs(), 301);
    }
}
