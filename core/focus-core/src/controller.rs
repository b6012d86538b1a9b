//! The session controller: one object owning the store, navigation, clock,
//! and HUD bridge, exposing the operations the UI and the shell call.
//!
//! Everything here is synchronous and single-threaded; the shell's event
//! loop serializes ticks, overlay events, and UI calls.

use tracing::{info, warn};

use crate::appdata::AppDataStore;
use crate::clock::SessionClock;
use crate::finish::{close_session, commit_log};
use crate::hud::{mockup_phase_label, HudBridge, OverlayEvent, OverlaySink};
use crate::nav::{Navigation, Page};
use crate::session::store::SessionStore;
use crate::session::types::{SessionPhase, SessionUpdate};
use crate::storage::StorageConfig;
use crate::types::{Category, LogEntry};

/// What the summary page shows after a finish.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub category: Category,
    pub duration_minutes: u32,
}

pub struct SessionController {
    store: SessionStore,
    app_data: AppDataStore,
    nav: Navigation,
    hud: HudBridge,
    clock: SessionClock,
    last_summary: Option<SessionSummary>,
    last_active_url: String,
}

impl SessionController {
    /// Builds the controller over the given storage root, rehydrating any
    /// persisted session. A session that was running when the process died
    /// comes back parked; the user resumes it explicitly.
    pub fn new(config: &StorageConfig, sink: Box<dyn OverlaySink>) -> Self {
        let mut store = SessionStore::load(&config.session_file());
        if store.phase() == SessionPhase::Running {
            let now_ms = chrono::Utc::now().timestamp_millis();
            store.apply(SessionUpdate::park(), None, now_ms);
            info!("Rehydrated a running session as parked");
        }

        let mut controller = SessionController {
            store,
            app_data: AppDataStore::new(config.data_file()),
            nav: Navigation::default(),
            hud: HudBridge::new(sink),
            clock: SessionClock::default(),
            last_summary: None,
            last_active_url: String::new(),
        };
        controller.hud.set_paused(true);
        controller
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn nav(&self) -> &Navigation {
        &self.nav
    }

    pub fn app_data(&self) -> &AppDataStore {
        &self.app_data
    }

    pub fn last_summary(&self) -> Option<&SessionSummary> {
        self.last_summary.as_ref()
    }

    pub fn last_active_url(&self) -> &str {
        &self.last_active_url
    }

    /// Opens a category module in the vault. A parked session for the same
    /// category stays parked until the module starts its timer.
    pub fn open_module(&mut self, category: Category) {
        self.nav.open_vault(Some(category));
    }

    /// Starts (or resumes) the session for a category. Collapses the
    /// sidebar, announces the category to the overlay, and clears the host
    /// paused flag.
    pub fn start_session(&mut self, category: Category, now_ms: i64) {
        if !self.store.apply(SessionUpdate::start(category), None, now_ms) {
            return;
        }
        let resumed_secs = self
            .store
            .session()
            .payload
            .as_ref()
            .map_or(0, |p| p.duration_secs());
        self.clock = SessionClock::start_at(resumed_secs);
        self.nav.open_vault(Some(category));
        self.nav.on_session_started();
        self.hud.announce_category(category);
        self.hud.set_paused(false);
        info!(category = category.as_str(), "Session started");
    }

    /// A category module pushing its payload slice. The mounted vault
    /// category is the fallback when the update carries none. Scratchpad
    /// changes are mirrored down to the overlay.
    pub fn module_update(&mut self, update: SessionUpdate, now_ms: i64) -> bool {
        let prev_notes = self.current_notes();
        if !self.store.apply(update, self.nav.vault_category(), now_ms) {
            return false;
        }
        if let Some(notes) = self.current_notes() {
            if prev_notes.as_deref() != Some(notes.as_str()) {
                self.hud.push_notes(&notes);
            }
        }
        true
    }

    fn current_notes(&self) -> Option<String> {
        self.store
            .session()
            .payload
            .as_ref()
            .and_then(|p| p.notes())
            .map(str::to_string)
    }

    /// Navigation away from the vault parks a running session instead of
    /// clearing it.
    pub fn navigate(&mut self, page: Page, now_ms: i64) {
        if self.store.phase() == SessionPhase::Running && !matches!(page, Page::Vault(Some(_))) {
            self.store.apply(SessionUpdate::park(), None, now_ms);
            self.clock.set_running(false);
            self.hud.set_paused(true);
            info!("Session parked on navigation");
        }
        self.nav.go_to(page);
    }

    /// Pause or resume in place, the overlay's toggle. No-op while idle.
    pub fn set_paused(&mut self, paused: bool, now_ms: i64) {
        let update = match (self.store.phase(), paused) {
            (SessionPhase::Running, true) => SessionUpdate::park(),
            (SessionPhase::Parked, false) => {
                let Some(category) = self.store.session().category else {
                    return;
                };
                SessionUpdate::start(category)
            }
            _ => return,
        };
        if self.store.apply(update, None, now_ms) {
            self.clock.set_running(!paused);
            self.hud.set_paused(paused);
        }
    }

    /// One second of the shell's clock. Advances the module timer, mirrors
    /// it into the payload, and pushes the elapsed readout (plus the mock
    /// exam's phase label) to the overlay.
    pub fn tick(&mut self, _now_ms: i64) {
        if self.store.phase() != SessionPhase::Running {
            return;
        }
        let secs = self.clock.tick();
        self.store.with_payload(|p| p.set_duration_secs(secs));
        self.hud.push_elapsed(secs, true);
        if self.store.session().category == Some(Category::Mockup) {
            self.hud.set_label(mockup_phase_label(secs));
        }
    }

    /// Window blur shows the overlay scratchpad; focus hides it.
    pub fn window_blurred(&mut self) {
        self.hud.set_scratchpad_visible(true);
    }

    pub fn window_focused(&mut self) {
        self.hud.set_scratchpad_visible(false);
    }

    /// An event polled from the host overlay. Stop runs the same finish as
    /// the UI button, against the store's current value.
    pub fn handle_overlay_event(&mut self, event: OverlayEvent, now_ms: i64) {
        match event {
            OverlayEvent::StopRequested => {
                if let Err(err) = self.finish(now_ms) {
                    warn!(error = %err, "Overlay stop: failed to commit log entry");
                }
            }
            OverlayEvent::TogglePauseRequested => {
                let paused = self.store.phase() == SessionPhase::Running;
                self.set_paused(paused, now_ms);
            }
            OverlayEvent::NotesUpdated(notes) => {
                let mut merged = false;
                self.store.with_payload(|p| {
                    if let Some(slot) = p.notes_mut() {
                        *slot = notes.clone();
                        merged = true;
                    }
                });
                // Echo the merge back so both sides hold the same text.
                if merged {
                    self.hud.push_notes(&notes);
                }
            }
            OverlayEvent::ActiveUrl(url) => {
                self.last_active_url = url;
            }
            OverlayEvent::HideScratchpadRequested => {
                self.hud.set_scratchpad_visible(false);
            }
        }
    }

    /// Finishes the session: close synchronously, then commit the log entry
    /// and refresh the minutes aggregate. Returns the committed entry, or
    /// `None` when there was nothing to finish.
    pub fn finish(&mut self, now_ms: i64) -> crate::Result<Option<LogEntry>> {
        let Some(closed) = close_session(&mut self.store, now_ms) else {
            return Ok(None);
        };

        // Phase one: the UI moves on immediately.
        self.last_summary = Some(SessionSummary {
            category: closed.category,
            duration_minutes: closed.duration_minutes,
        });
        self.nav.on_session_finished();
        self.clock.reset();
        self.hud.clear_label();
        self.hud.set_paused(true);

        // Phase two: extraction and the durable append.
        let entry = commit_log(&closed, &self.app_data)?;
        match self.app_data.today_minutes() {
            Ok(minutes) => info!(minutes, "Today's total updated"),
            Err(err) => warn!(error = %err, "Failed to refresh today's minutes"),
        }
        Ok(Some(entry))
    }
}
