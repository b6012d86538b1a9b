//! Pure session transition logic: guard, category fallback, payload merge.
//!
//! Kept free of IO so every rule is directly testable; [`super::store`] wires
//! the result to durable storage.

use super::payload::SessionPayload;
use super::types::{Session, SessionUpdate};
use crate::types::Category;

/// Applies an update against the previous session, returning the next
/// session or `None` when the update is rejected.
///
/// Rules:
/// - **Guard**: when the timer is not running and the update neither starts
///   a session (`is_active = Some(true)`) nor names a category, it is
///   rejected. This stops a stale update from a just-finished module from
///   reviving a cleared session.
/// - `category` resolves through a fallback chain: explicit update value,
///   then the payload's own tag, then the previous session, then
///   `default_category` (the currently mounted vault category).
/// - `is_active` left unset means "running": modules push payload updates
///   only while their timer counts.
/// - A payload replaces the previous one wholesale when its variant matches
///   the resolved category; a mismatched payload (late push from a module
///   the user already left) is dropped in favor of the previous data.
/// - `started_at_ms` is stamped on first activation and preserved afterward.
pub fn apply_update(
    prev: &Session,
    update: SessionUpdate,
    default_category: Option<Category>,
    now_ms: i64,
) -> Option<Session> {
    let starts_session = update.is_active == Some(true);
    let names_category = update.category.is_some() || update.payload.is_some();
    if !prev.is_active && !starts_session && !names_category {
        return None;
    }

    let category = update
        .category
        .or_else(|| update.payload.as_ref().map(|p| p.category()))
        .or(prev.category)
        .or(default_category)?;

    let payload = match update.payload {
        Some(incoming) if incoming.category() == category => Some(incoming),
        _ => match prev.payload.clone() {
            Some(kept) if kept.category() == category => Some(kept),
            _ => Some(SessionPayload::empty_for(category)),
        },
    };

    let started_at_ms = if prev.started_at_ms > 0 {
        prev.started_at_ms
    } else {
        now_ms
    };

    Some(Session {
        category: Some(category),
        started_at_ms,
        payload,
        is_active: update.is_active.unwrap_or(true),
    })
}
