//! The active-session record and the updates category modules emit.

use serde::{Deserialize, Serialize};

use super::payload::SessionPayload;
use crate::types::Category;

/// The singleton active session. Durable across restarts.
///
/// Invariant: either all four fields are empty (`Idle`) or `category`,
/// `payload`, and `started_at_ms` are all set. [`Session::is_consistent`]
/// checks this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub category: Option<Category>,
    /// Milliseconds since epoch when the session first activated; 0 when idle.
    #[serde(default)]
    pub started_at_ms: i64,
    #[serde(default)]
    pub payload: Option<SessionPayload>,
    /// True while the timer counts. False while parked.
    #[serde(default)]
    pub is_active: bool,
}

impl Default for Session {
    fn default() -> Self {
        Session::idle()
    }
}

/// Lifecycle phase derived from the session fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    /// Category chosen but the timer is not counting (user navigated away).
    Parked,
    Running,
}

impl Session {
    pub fn idle() -> Self {
        Session {
            category: None,
            started_at_ms: 0,
            payload: None,
            is_active: false,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        match (self.category, self.is_active) {
            (None, _) => SessionPhase::Idle,
            (Some(_), false) => SessionPhase::Parked,
            (Some(_), true) => SessionPhase::Running,
        }
    }

    /// The all-empty-or-all-set invariant over the quadruple.
    pub fn is_consistent(&self) -> bool {
        match self.category {
            None => self.started_at_ms == 0 && self.payload.is_none() && !self.is_active,
            Some(category) => {
                self.started_at_ms != 0
                    && self
                        .payload
                        .as_ref()
                        .is_some_and(|p| p.category() == category)
            }
        }
    }

    /// Elapsed seconds, preferring the module-reported timer over wall clock.
    pub fn elapsed_secs(&self, now_ms: i64) -> u64 {
        let reported = self.payload.as_ref().map_or(0, |p| p.duration_secs());
        if reported > 0 {
            return reported;
        }
        if self.started_at_ms > 0 && now_ms > self.started_at_ms {
            ((now_ms - self.started_at_ms) / 1000) as u64
        } else {
            0
        }
    }
}

/// A partial update emitted by a category module (or the navigation layer).
///
/// Fields left `None` fall back to the previous state; see
/// [`super::transition::apply_update`] for the merge and guard rules.
#[derive(Debug, Clone, Default)]
pub struct SessionUpdate {
    pub category: Option<Category>,
    pub is_active: Option<bool>,
    pub payload: Option<SessionPayload>,
}

impl SessionUpdate {
    /// Explicit session start for a category.
    pub fn start(category: Category) -> Self {
        SessionUpdate {
            category: Some(category),
            is_active: Some(true),
            payload: None,
        }
    }

    /// Park: keep category and payload, stop the timer.
    pub fn park() -> Self {
        SessionUpdate {
            category: None,
            is_active: Some(false),
            payload: None,
        }
    }

    /// A module pushing its full payload slice, tagged with its category.
    pub fn payload(payload: SessionPayload) -> Self {
        SessionUpdate {
            category: Some(payload.category()),
            is_active: None,
            payload: Some(payload),
        }
    }
}
