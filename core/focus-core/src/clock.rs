//! Session clock: the seconds counter behind the timer readout.

/// Formats elapsed seconds as `M:SS` under an hour, `H:MM:SS` from there.
/// Minutes and hours are unpadded.
pub fn format_elapsed(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// A 1 Hz counter the shell drives. Pausing freezes it without losing the
/// accumulated value.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionClock {
    seconds: u64,
    running: bool,
}

impl SessionClock {
    pub fn start_at(seconds: u64) -> Self {
        SessionClock {
            seconds,
            running: true,
        }
    }

    pub fn seconds(&self) -> u64 {
        self.seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advances one second if running. Returns the new count.
    pub fn tick(&mut self) -> u64 {
        if self.running {
            self.seconds += 1;
        }
        self.seconds
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    pub fn reset(&mut self) {
        *self = SessionClock::default();
    }
}
