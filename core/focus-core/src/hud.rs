//! Outbound overlay synchronization and inbound overlay events.
//!
//! The overlay itself is owned by a separate host process; this bridge only
//! maintains the picture that process renders. Every push is fire-and-forget:
//! a sink failure is logged and swallowed so ticking and navigation never
//! stall on the overlay.

use tracing::warn;

use crate::clock::format_elapsed;
use crate::types::Category;

/// Where the overlay picture is written. The shell implements this over the
/// status file; tests use an in-memory recorder.
pub trait OverlaySink {
    fn set_label(&mut self, label: &str) -> std::io::Result<()>;
    fn set_elapsed(&mut self, elapsed: &str) -> std::io::Result<()>;
    fn set_paused(&mut self, paused: bool) -> std::io::Result<()>;
    fn set_scratchpad_visible(&mut self, visible: bool) -> std::io::Result<()>;
    fn push_notes(&mut self, notes: &str) -> std::io::Result<()>;
}

/// Inbound events polled from the host overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayEvent {
    /// The overlay's stop button. Must finish the session exactly as the UI
    /// button would.
    StopRequested,
    TogglePauseRequested,
    /// Scratchpad text typed into the overlay while the app is unfocused.
    NotesUpdated(String),
    /// Browser URL the overlay observed; display only.
    ActiveUrl(String),
    HideScratchpadRequested,
}

/// Phase label the mockup module shows instead of its category name.
///
/// Listening runs 0-30 min, reading 30-90 min, writing from 90 min. The
/// first 60 s after each boundary shows a switch alert instead.
pub fn mockup_phase_label(duration_secs: u64) -> &'static str {
    if duration_secs < 1800 {
        "MOCKUP: LISTENING"
    } else if duration_secs < 5400 {
        if duration_secs < 1860 {
            ">>> SWITCH PHASE <<<"
        } else {
            "MOCKUP: READING"
        }
    } else if duration_secs < 5460 {
        ">>> SWITCH PHASE <<<"
    } else {
        "MOCKUP: WRITING"
    }
}

pub struct HudBridge {
    sink: Box<dyn OverlaySink>,
}

impl HudBridge {
    pub fn new(sink: Box<dyn OverlaySink>) -> Self {
        HudBridge { sink }
    }

    /// Pushes the label for a newly active session. Categories that manage
    /// their own label (mockup) are skipped here; they call
    /// [`Self::set_label`] with their phase label directly.
    pub fn announce_category(&mut self, category: Category) {
        if category.manages_own_hud_label() {
            return;
        }
        self.set_label(category.label());
    }

    pub fn set_label(&mut self, label: &str) {
        if let Err(err) = self.sink.set_label(label) {
            warn!(error = %err, "Failed to push overlay label");
        }
    }

    pub fn clear_label(&mut self) {
        self.set_label("");
    }

    /// Per-tick elapsed push. Paused sessions push an empty string, which
    /// hides the readout.
    pub fn push_elapsed(&mut self, secs: u64, running: bool) {
        let elapsed = if running {
            format_elapsed(secs)
        } else {
            String::new()
        };
        if let Err(err) = self.sink.set_elapsed(&elapsed) {
            warn!(error = %err, "Failed to push overlay elapsed time");
        }
    }

    pub fn set_paused(&mut self, paused: bool) {
        if let Err(err) = self.sink.set_paused(paused) {
            warn!(error = %err, "Failed to push overlay paused flag");
        }
    }

    /// Window blur/focus toggles this directly, no debounce.
    pub fn set_scratchpad_visible(&mut self, visible: bool) {
        if let Err(err) = self.sink.set_scratchpad_visible(visible) {
            warn!(error = %err, "Failed to push overlay scratchpad visibility");
        }
    }

    pub fn push_notes(&mut self, notes: &str) {
        if let Err(err) = self.sink.push_notes(notes) {
            warn!(error = %err, "Failed to push overlay notes");
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Recorded sink state shared with the test body.
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct SinkState {
        pub label: String,
        pub elapsed: String,
        pub paused: bool,
        pub scratchpad_visible: bool,
        pub notes: String,
        pub fail: bool,
    }

    #[derive(Default, Clone)]
    pub struct RecordingSink(pub Rc<RefCell<SinkState>>);

    impl RecordingSink {
        fn check(&self) -> std::io::Result<()> {
            if self.0.borrow().fail {
                Err(std::io::Error::other("sink down"))
            } else {
                Ok(())
            }
        }
    }

    impl OverlaySink for RecordingSink {
        fn set_label(&mut self, label: &str) -> std::io::Result<()> {
            self.check()?;
            self.0.borrow_mut().label = label.to_string();
            Ok(())
        }

        fn set_elapsed(&mut self, elapsed: &str) -> std::io::Result<()> {
            self.check()?;
            self.0.borrow_mut().elapsed = elapsed.to_string();
            Ok(())
        }

        fn set_paused(&mut self, paused: bool) -> std::io::Result<()> {
            self.check()?;
            self.0.borrow_mut().paused = paused;
            Ok(())
        }

        fn set_scratchpad_visible(&mut self, visible: bool) -> std::io::Result<()> {
            self.check()?;
            self.0.borrow_mut().scratchpad_visible = visible;
            Ok(())
        }

        fn push_notes(&mut self, notes: &str) -> std::io::Result<()> {
            self.check()?;
            self.0.borrow_mut().notes = notes.to_string();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingSink;
    use super::*;

    fn bridge() -> (HudBridge, RecordingSink) {
        let sink = RecordingSink::default();
        (HudBridge::new(Box::new(sink.clone())), sink)
    }

    #[test]
    fn announce_pushes_uppercase_label() {
        let (mut hud, sink) = bridge();
        hud.announce_category(Category::Speaking);
        assert_eq!(sink.0.borrow().label, "SPEAKING");
    }

    #[test]
    fn announce_skips_mockup() {
        let (mut hud, sink) = bridge();
        hud.set_label("MOCKUP: LISTENING");
        hud.announce_category(Category::Mockup);
        assert_eq!(sink.0.borrow().label, "MOCKUP: LISTENING");
    }

    #[test]
    fn paused_tick_pushes_empty_elapsed() {
        let (mut hud, sink) = bridge();
        hud.push_elapsed(95, true);
        assert_eq!(sink.0.borrow().elapsed, "1:35");
        hud.push_elapsed(95, false);
        assert_eq!(sink.0.borrow().elapsed, "");
    }

    #[test]
    fn sink_failure_is_swallowed() {
        let (mut hud, sink) = bridge();
        sink.0.borrow_mut().fail = true;
        hud.set_label("READING");
        hud.push_elapsed(10, true);
        hud.set_paused(true);
        assert_eq!(sink.0.borrow().label, "");
    }

    #[test]
    fn phase_label_follows_exam_timeline() {
        assert_eq!(mockup_phase_label(0), "MOCKUP: LISTENING");
        assert_eq!(mockup_phase_label(1799), "MOCKUP: LISTENING");
        assert_eq!(mockup_phase_label(1800), ">>> SWITCH PHASE <<<");
        assert_eq!(mockup_phase_label(1859), ">>> SWITCH PHASE <<<");
        assert_eq!(mockup_phase_label(1860), "MOCKUP: READING");
        assert_eq!(mockup_phase_label(5399), "MOCKUP: READING");
        assert_eq!(mockup_phase_label(5400), ">>> SWITCH PHASE <<<");
        assert_eq!(mockup_phase_label(5459), ">>> SWITCH PHASE <<<");
        assert_eq!(mockup_phase_label(5460), "MOCKUP: WRITING");
        assert_eq!(mockup_phase_label(9000), "MOCKUP: WRITING");
    }
}
