//! # focus-core
//!
//! Core library for Focusdeck: the active-session lifecycle controller of a
//! study-progress tracker, shared by every shell that hosts it.
//!
//! ## Design Principles
//!
//! - **Synchronous**: No async runtime dependency. Shells drive a plain
//!   event loop and can wrap with async if needed.
//! - **Not thread-safe**: Shells provide their own synchronization.
//! - **Graceful degradation**: A missing or corrupt session file yields an
//!   idle session, not a startup error.
//! - **Single source of truth**: the [`SessionStore`] owns the live session;
//!   every consumer, the overlay stop handler included, reads through it.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use focus_core::{SessionController, StorageConfig};
//!
//! let config = StorageConfig::default_root()?;
//! let mut controller = SessionController::new(&config, sink);
//! controller.start_session(Category::Writing, now_ms);
//! ```

// Public modules
pub mod appdata;
pub mod clock;
pub mod controller;
pub mod error;
pub mod extract;
pub mod finish;
pub mod hud;
pub mod nav;
pub mod session;
pub mod storage;
pub mod types;

// Re-export commonly used items at crate root
pub use appdata::{AppDataStore, NewLogEntry};
pub use clock::{format_elapsed, SessionClock};
pub use controller::{SessionController, SessionSummary};
pub use error::{CoreError, Result};
pub use extract::extract_content;
pub use finish::{close_session, commit_log, ClosedSession};
pub use hud::{mockup_phase_label, HudBridge, OverlayEvent, OverlaySink};
pub use nav::{Navigation, Page};
pub use session::{Session, SessionPayload, SessionPhase, SessionStore, SessionUpdate};
pub use storage::StorageConfig;
pub use types::{AppState, Category, LogEntry, UserProfile, VocabEntry};
