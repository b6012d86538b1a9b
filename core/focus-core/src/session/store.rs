//! File-backed persistence for the active session.
//!
//! The store owns the authoritative in-memory `Session` and mirrors every
//! accepted change to `active-session.json` synchronously. Rehydration is
//! defensive: a missing, empty, or corrupt file yields an idle session with
//! a logged warning, never a startup failure.
//!
//! Callers that need "the latest state at call time" (the overlay stop
//! handler) go through this store rather than holding their own snapshot.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::warn;

use super::transition::apply_update;
use super::types::{Session, SessionPhase, SessionUpdate};
use crate::types::Category;

pub struct SessionStore {
    session: Session,
    file_path: Option<PathBuf>,
}

impl SessionStore {
    pub fn new_in_memory() -> Self {
        SessionStore {
            session: Session::idle(),
            file_path: None,
        }
    }

    /// Loads the persisted session, falling back to idle on any problem.
    pub fn load(file_path: &Path) -> Self {
        let session = match fs_err::read_to_string(file_path) {
            Ok(content) if content.trim().is_empty() => Session::idle(),
            Ok(content) => match serde_json::from_str::<Session>(&content) {
                Ok(session) if session.is_consistent() => session,
                Ok(_) => {
                    warn!(
                        path = %file_path.display(),
                        "Persisted session violates the field invariant, starting idle"
                    );
                    Session::idle()
                }
                Err(err) => {
                    warn!(
                        path = %file_path.display(),
                        error = %err,
                        "Failed to parse persisted session, starting idle"
                    );
                    Session::idle()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Session::idle(),
            Err(err) => {
                warn!(path = %file_path.display(), error = %err, "Failed to read persisted session");
                Session::idle()
            }
        };

        SessionStore {
            session,
            file_path: Some(file_path.to_path_buf()),
        }
    }

    /// The current session. Always reflects the latest accepted update.
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    /// Applies an update through the transition rules. Returns true when the
    /// update was accepted; a guarded update leaves the store untouched.
    pub fn apply(
        &mut self,
        update: SessionUpdate,
        default_category: Option<Category>,
        now_ms: i64,
    ) -> bool {
        match apply_update(&self.session, update, default_category, now_ms) {
            Some(next) => {
                if next != self.session {
                    self.session = next;
                    self.persist();
                }
                true
            }
            None => false,
        }
    }

    /// Mutates the payload in place (timer ticks, scratchpad merges) and
    /// mirrors the result. No-op while idle.
    pub fn with_payload<F: FnOnce(&mut super::payload::SessionPayload)>(&mut self, f: F) -> bool {
        match self.session.payload.as_mut() {
            Some(payload) => {
                f(payload);
                self.persist();
                true
            }
            None => false,
        }
    }

    /// Atomically snapshots and clears the session. Returns `None` when
    /// already idle, which is what makes a double finish a no-op.
    pub fn take(&mut self) -> Option<Session> {
        if self.session.category.is_none() {
            return None;
        }
        let taken = std::mem::replace(&mut self.session, Session::idle());
        self.persist();
        Some(taken)
    }

    /// Writes the session to disk via temp file + rename. Persistence is
    /// best-effort: a failed write is logged and the in-memory state stays
    /// authoritative for this process lifetime.
    fn persist(&self) {
        let Some(file_path) = self.file_path.as_ref() else {
            return;
        };
        if let Err(err) = write_atomic(file_path, &self.session) {
            warn!(path = %file_path.display(), error = %err, "Failed to persist session");
        }
    }
}

fn write_atomic(file_path: &Path, session: &Session) -> std::io::Result<()> {
    let parent_dir = file_path.parent().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "session path has no parent")
    })?;
    fs_err::create_dir_all(parent_dir)?;
    let content = serde_json::to_string_pretty(session)?;
    let mut temp_file = NamedTempFile::new_in(parent_dir)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.flush()?;
    temp_file.persist(file_path).map_err(|e| e.error)?;
    Ok(())
}
