//! File-backed side of the overlay contract: the status-line sink the core
//! writes through, and the poller that turns command/notes files into events.

use std::path::PathBuf;

use focus_core::hud::{OverlayEvent, OverlaySink};
use focus_core::StorageConfig;
use focusdeck_overlay_protocol::{OverlayCommand, StatusLine};
use tracing::{debug, info, warn};

/// Writes the overlay picture to the status and notes files. Holds the last
/// pushed fields so every setter can re-emit the full line.
pub struct FileOverlaySink {
    status_path: PathBuf,
    notes_path: PathBuf,
    label: String,
    elapsed: String,
    paused: bool,
    scratchpad_visible: bool,
}

impl FileOverlaySink {
    pub fn new(config: &StorageConfig) -> Self {
        FileOverlaySink {
            status_path: config.overlay_status_file(),
            notes_path: config.overlay_notes_file(),
            label: String::new(),
            elapsed: String::new(),
            paused: true,
            scratchpad_visible: false,
        }
    }

    fn write_status(&self) -> std::io::Result<()> {
        let line = if self.paused || self.label.is_empty() {
            StatusLine::Hidden
        } else {
            StatusLine::visible(
                self.elapsed.clone(),
                self.label.clone(),
                self.scratchpad_visible,
            )
        };
        fs_err::write(&self.status_path, line.encode())
    }

    /// Resets the overlay to hidden, used on startup and shutdown.
    pub fn reset(&mut self) -> std::io::Result<()> {
        self.label.clear();
        self.elapsed.clear();
        self.paused = true;
        self.write_status()
    }
}

impl OverlaySink for FileOverlaySink {
    fn set_label(&mut self, label: &str) -> std::io::Result<()> {
        self.label = label.to_string();
        self.write_status()
    }

    fn set_elapsed(&mut self, elapsed: &str) -> std::io::Result<()> {
        self.elapsed = elapsed.to_string();
        self.write_status()
    }

    fn set_paused(&mut self, paused: bool) -> std::io::Result<()> {
        self.paused = paused;
        self.write_status()
    }

    fn set_scratchpad_visible(&mut self, visible: bool) -> std::io::Result<()> {
        self.scratchpad_visible = visible;
        self.write_status()
    }

    fn push_notes(&mut self, notes: &str) -> std::io::Result<()> {
        fs_err::write(&self.notes_path, notes)
    }
}

/// Polls the files the overlay writes. Command files are consumed (deleted)
/// once read; notes are forwarded only when they change.
///
/// `OverlayEvent::ActiveUrl` is never produced here: the browser watcher
/// behind it belongs to desktop hosts, and this headless shell covers
/// commands and notes only.
pub struct OverlayPoller {
    command_path: PathBuf,
    notes_from_path: PathBuf,
    last_notes: String,
}

impl OverlayPoller {
    pub fn new(config: &StorageConfig) -> Self {
        OverlayPoller {
            command_path: config.overlay_command_file(),
            notes_from_path: config.overlay_notes_from_file(),
            last_notes: String::new(),
        }
    }

    pub fn poll(&mut self) -> Vec<OverlayEvent> {
        let mut events = Vec::new();

        match fs_err::read_to_string(&self.command_path) {
            Ok(raw) => {
                if let Err(err) = fs_err::remove_file(&self.command_path) {
                    warn!(error = %err, "Failed to consume overlay command file");
                }
                match OverlayCommand::parse(&raw) {
                    Some(OverlayCommand::TogglePause) => {
                        events.push(OverlayEvent::TogglePauseRequested)
                    }
                    Some(OverlayCommand::Stop) => events.push(OverlayEvent::StopRequested),
                    Some(OverlayCommand::HideScratchpad) => {
                        events.push(OverlayEvent::HideScratchpadRequested)
                    }
                    Some(OverlayCommand::Open) => {
                        // Headless shell has no window to raise.
                        info!("Overlay requested app open");
                    }
                    None => debug!(raw = raw.trim(), "Unknown overlay command ignored"),
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => warn!(error = %err, "Failed to read overlay command file"),
        }

        match fs_err::read_to_string(&self.notes_from_path) {
            Ok(notes) => {
                if notes != self.last_notes {
                    self.last_notes = notes.clone();
                    events.push(OverlayEvent::NotesUpdated(notes));
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => warn!(error = %err, "Failed to read overlay notes file"),
        }

        events
    }
}
