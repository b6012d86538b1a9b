//! Flat-content extraction for finished sessions.
//!
//! Each category owns the rule that turns its payload into the `content`
//! string of a log entry. Pure over the payload plus, for vocabulary, the
//! day's durable entries; the finish pipeline supplies both.

use serde_json::json;

use crate::session::payload::SessionPayload;
use crate::types::VocabEntry;

const SEPARATOR: &str = "\n\n---\n\n";
const FALLBACK: &str = "No specific content recorded.";

/// Derives the log-entry content for a finished session.
///
/// `vocab_today` is the same-day slice of the durable vocabulary collection;
/// only the vocabulary rule reads it.
pub fn extract_content(payload: &SessionPayload, vocab_today: &[VocabEntry]) -> String {
    match payload {
        SessionPayload::Writing(p) => {
            let mut content = p
                .submitted_essays
                .iter()
                .map(|e| format!("TITLE: {}\n{}", e.title, e.content))
                .collect::<Vec<_>>()
                .join(SEPARATOR);

            for (n, draft) in [(1, &p.task1), (2, &p.task2)] {
                if draft.is_empty() || content.contains(&draft.text) {
                    continue;
                }
                if !content.is_empty() {
                    content.push_str(SEPARATOR);
                }
                let premise = if draft.premise.is_empty() {
                    "N/A"
                } else {
                    &draft.premise
                };
                content.push_str(&format!(
                    "UNFINISHED TASK {}:\nPREMISE: {}\n{}",
                    n, premise, draft.text
                ));
            }
            content
        }
        SessionPayload::Speaking(p) => {
            let title = if p.title.is_empty() {
                "Untitled Speaking Task"
            } else {
                &p.title
            };
            json!({
                "title": title,
                "notes": p.notes,
                "audioUrl": p.audio_url,
            })
            .to_string()
        }
        SessionPayload::Vocabulary(_) => {
            if vocab_today.is_empty() {
                return "Vocabulary session.".to_string();
            }
            let lines: Vec<String> = vocab_today
                .iter()
                .map(|w| format!("- {}: {}", w.word.to_uppercase(), w.def))
                .collect();
            format!("WORDS FORGED:\n{}", lines.join("\n"))
        }
        SessionPayload::Reading(p) | SessionPayload::Listening(p) => {
            if p.notes.trim().is_empty() {
                FALLBACK.to_string()
            } else {
                p.notes.clone()
            }
        }
        SessionPayload::Mockup(p) => {
            if p.notes.trim().is_empty() {
                FALLBACK.to_string()
            } else {
                p.notes.clone()
            }
        }
    }
}
