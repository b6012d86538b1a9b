//! Active session lifecycle: payloads, transition rules, durable store.

pub mod payload;
pub mod store;
pub mod transition;
pub mod types;

pub use payload::SessionPayload;
pub use store::SessionStore;
pub use transition::apply_update;
pub use types::{Session, SessionPhase, SessionUpdate};
