/// Default session length in seconds
pub const DEFAULT_DURATION_SECS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTick {
    pub remaining: u32,
    pub expired: bool,
}

/// Countdown in whole seconds. It does not drive itself: each call to
/// `tick` stands for one elapsed second.
#[derive(Debug, Default, Clone)]
pub struct SessionClock {
    remaining: u32,
    running: bool,
}

impl SessionClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, duration_secs: u32) {
        self.remaining = duration_secs;
        self.running = true;
    }

    pub fn tick(&mut self) -> ClockTick {
        if !self.running {
            return ClockTick {
                remaining: self.remaining,
                expired: false,
            };
        }

        self.remaining = self.remaining.saturating_sub(1);
        let expired = self.remaining == 0;
        if expired {
            self.running = false;
        }

        ClockTick {
            remaining: self.remaining,
            expired,
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
