//! IPC contract with the host-owned overlay HUD.
//!
//! The overlay is a separate always-on-top process. Communication is
//! file-based and deliberately dumb: the app writes a single status line the
//! overlay polls, and the overlay writes single-token command files the app
//! polls and deletes. This crate is shared by focus-core and the shell so
//! both sides agree on the format.

use serde::{Deserialize, Serialize};

/// File the app writes and the overlay reads (status line).
pub const STATUS_FILE: &str = "overlay-status.txt";
/// File the overlay writes and the app consumes (single command token).
pub const COMMAND_FILE: &str = "overlay-cmd.txt";
/// Scratchpad text pushed down to the overlay.
pub const NOTES_FILE: &str = "overlay-notes.txt";
/// Scratchpad text typed into the overlay, polled back by the app.
pub const NOTES_FROM_OVERLAY_FILE: &str = "overlay-notes-hud.txt";

/// Sentinel status line that hides the overlay readout entirely.
pub const HIDDEN: &str = "HIDDEN";

/// One frame of overlay state: `ELAPSED|LABEL|SCRATCHPAD`.
///
/// `Hidden` is written while no session is running or the timer is paused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusLine {
    Hidden,
    Visible {
        /// Formatted elapsed time, e.g. `4:05` or `1:02:09`.
        elapsed: String,
        /// Uppercase category or phase label.
        label: String,
        /// Whether the overlay should show its note-taking affordance.
        scratchpad_visible: bool,
    },
}

impl StatusLine {
    pub fn visible(elapsed: impl Into<String>, label: impl Into<String>, scratchpad: bool) -> Self {
        StatusLine::Visible {
            elapsed: elapsed.into(),
            label: label.into(),
            scratchpad_visible: scratchpad,
        }
    }

    /// Encodes the line the overlay parses.
    pub fn encode(&self) -> String {
        match self {
            StatusLine::Hidden => HIDDEN.to_string(),
            StatusLine::Visible {
                elapsed,
                label,
                scratchpad_visible,
            } => format!(
                "{}|{}|{}",
                elapsed,
                label,
                if *scratchpad_visible { "1" } else { "0" }
            ),
        }
    }

    /// Parses a status line. Unknown or empty input maps to `Hidden`, since
    /// that is always a safe display state for the overlay.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case(HIDDEN) || raw.eq_ignore_ascii_case("HIDE") {
            return StatusLine::Hidden;
        }
        let mut parts = raw.splitn(3, '|');
        let elapsed = parts.next().unwrap_or_default().to_string();
        let label = parts.next().unwrap_or_default().to_string();
        let scratchpad_visible = parts.next() == Some("1");
        StatusLine::Visible {
            elapsed,
            label,
            scratchpad_visible,
        }
    }
}

/// Commands the overlay can issue back to the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverlayCommand {
    TogglePause,
    Stop,
    Open,
    HideScratchpad,
}

impl OverlayCommand {
    /// The token written to the command file.
    pub fn token(&self) -> &'static str {
        match self {
            OverlayCommand::TogglePause => "TOGGLE_PAUSE",
            OverlayCommand::Stop => "STOP",
            OverlayCommand::Open => "OPEN",
            OverlayCommand::HideScratchpad => "HIDE_SCRATCHPAD",
        }
    }

    /// Parses a command token; unknown tokens are dropped (None) rather than
    /// failing, so a newer overlay cannot wedge an older app.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "TOGGLE_PAUSE" => Some(OverlayCommand::TogglePause),
            "STOP" => Some(OverlayCommand::Stop),
            "OPEN" => Some(OverlayCommand::Open),
            "HIDE_SCRATCHPAD" => Some(OverlayCommand::HideScratchpad),
            _ => None,
        }
    }
}
