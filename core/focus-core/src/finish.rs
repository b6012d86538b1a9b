//! The two-phase finish pipeline.
//!
//! Phase one closes the live session synchronously: snapshot, compute the
//! duration, clear the store. Phase two commits the log entry to durable app
//! data. Keeping the phases separate means the session is already cleared
//! and the UI already moved on before any extraction or disk work runs, and
//! a commit failure can never leave a half-finished session behind.

use chrono::Local;
use tracing::info;

use crate::appdata::{AppDataStore, NewLogEntry};
use crate::extract::extract_content;
use crate::session::payload::SessionPayload;
use crate::session::store::SessionStore;
use crate::types::{Category, LogEntry};

/// Snapshot of a session at the moment it closed, everything the commit
/// phase needs.
#[derive(Debug, Clone)]
pub struct ClosedSession {
    pub category: Category,
    pub duration_minutes: u32,
    pub payload: Option<SessionPayload>,
    pub source_url: String,
    pub screenshot: String,
}

/// Closes the live session. Returns `None` when the store is already idle,
/// which is what makes a second finish (overlay stop racing the UI button)
/// a no-op.
///
/// Duration is `ceil(elapsed / 60)`, preferring the module-reported elapsed
/// seconds over wall clock, and at least one minute when any time passed.
pub fn close_session(store: &mut SessionStore, now_ms: i64) -> Option<ClosedSession> {
    let taken = store.take()?;
    let category = taken.category?;
    let secs = taken.elapsed_secs(now_ms);
    let duration_minutes = secs.div_ceil(60) as u32;

    info!(
        category = category.as_str(),
        duration_minutes, "Session closed"
    );

    let source_url = taken
        .payload
        .as_ref()
        .map(|p| p.source_url().to_string())
        .unwrap_or_default();
    let screenshot = taken
        .payload
        .as_ref()
        .map(|p| p.screenshot().to_string())
        .unwrap_or_default();

    Some(ClosedSession {
        category,
        duration_minutes,
        payload: taken.payload,
        source_url,
        screenshot,
    })
}

/// Commits a closed session as a log entry. Extraction runs here, against
/// the snapshot; the vocabulary rule reads today's durable entries.
pub fn commit_log(closed: &ClosedSession, app_data: &AppDataStore) -> crate::Result<LogEntry> {
    let content = match closed.payload.as_ref() {
        Some(payload) => {
            let vocab_today = if closed.category == Category::Vocabulary {
                let today = Local::now().format("%Y-%m-%d").to_string();
                app_data.vocabulary_for_day(&today)?
            } else {
                Vec::new()
            };
            extract_content(payload, &vocab_today)
        }
        None => String::new(),
    };

    app_data.append_log(NewLogEntry {
        module: closed.category.label().to_string(),
        duration: closed.duration_minutes,
        content,
        source_url: closed.source_url.clone(),
        screenshot: closed.screenshot.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::payload::SpeakingPayload;
    use crate::session::types::SessionUpdate;
    use tempfile::tempdir;

    const T0: i64 = 1_700_000_000_000;

    #[test]
    fn close_on_idle_is_none() {
        let mut store = SessionStore::new_in_memory();
        assert!(close_session(&mut store, T0).is_none());
    }

    #[test]
    fn close_rounds_duration_up() {
        let mut store = SessionStore::new_in_memory();
        store.apply(SessionUpdate::start(Category::Reading), None, T0);
        // 61 seconds of wall clock → 2 minutes
        let closed = close_session(&mut store, T0 + 61_000).unwrap();
        assert_eq!(closed.duration_minutes, 2);
    }

    #[test]
    fn close_prefers_module_reported_seconds() {
        let mut store = SessionStore::new_in_memory();
        store.apply(SessionUpdate::start(Category::Speaking), None, T0);
        store.with_payload(|p| p.set_duration_secs(900));
        // Wall clock disagrees; the module's 900 s wins → 15 minutes.
        let closed = close_session(&mut store, T0 + 3_000_000).unwrap();
        assert_eq!(closed.duration_minutes, 15);
    }

    #[test]
    fn any_elapsed_time_is_at_least_one_minute() {
        let mut store = SessionStore::new_in_memory();
        store.apply(SessionUpdate::start(Category::Writing), None, T0);
        let closed = close_session(&mut store, T0 + 1_000).unwrap();
        assert_eq!(closed.duration_minutes, 1);
    }

    #[test]
    fn double_close_yields_one_snapshot() {
        let mut store = SessionStore::new_in_memory();
        store.apply(SessionUpdate::start(Category::Speaking), None, T0);
        assert!(close_session(&mut store, T0 + 60_000).is_some());
        assert!(close_session(&mut store, T0 + 60_000).is_none());
    }

    #[test]
    fn commit_writes_the_log_entry() {
        let temp = tempdir().unwrap();
        let app_data = AppDataStore::new(temp.path().join("data.json"));

        let mut store = SessionStore::new_in_memory();
        store.apply(SessionUpdate::start(Category::Speaking), None, T0);
        store.with_payload(|p| {
            if let SessionPayload::Speaking(s) = p {
                s.title = "Describe a teacher".to_string();
                s.duration_secs = 600;
            }
        });

        let closed = close_session(&mut store, T0 + 600_000).unwrap();
        let entry = commit_log(&closed, &app_data).unwrap();
        assert_eq!(entry.module, "SPEAKING");
        assert_eq!(entry.duration, 10);
        assert!(entry.content.contains("Describe a teacher"));

        let state = app_data.load().unwrap();
        assert_eq!(state.daily_logs.len(), 1);
    }

    #[test]
    fn commit_failure_leaves_session_cleared() {
        // Point app data at an unwritable path; the close already happened.
        let app_data = AppDataStore::new(std::path::PathBuf::from("/"));

        let mut store = SessionStore::new_in_memory();
        store.apply(SessionUpdate::start(Category::Reading), None, T0);
        let closed = close_session(&mut store, T0 + 60_000).unwrap();

        assert!(commit_log(&closed, &app_data).is_err());
        assert!(store.session().category.is_none());
    }

    #[test]
    fn speaking_payload_default_drops_nothing() {
        let temp = tempdir().unwrap();
        let app_data = AppDataStore::new(temp.path().join("data.json"));

        let closed = ClosedSession {
            category: Category::Speaking,
            duration_minutes: 1,
            payload: Some(SessionPayload::Speaking(SpeakingPayload::default())),
            source_url: String::new(),
            screenshot: String::new(),
        };
        let entry = commit_log(&closed, &app_data).unwrap();
        assert!(entry.content.contains("Untitled Speaking Task"));
    }
}
