/// Default countdown length, one tick per second.
pub const DEFAULT_COUNTDOWN_SECS: u32 = 3;

/// Explicit countdown state: how many ticks remain before the capture fires.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Countdown {
    remaining: Option<u32>,
}

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownTick {
    /// No countdown was running.
    Idle,
    /// Still counting; the value is what to display next.
    Remaining(u32),
    /// Reached zero on this tick: capture now. The countdown is already cleared.
    Fire,
}

impl Countdown {
    /// A countdown that is not running.
    pub const fn idle() -> Self {
        Self { remaining: None }
    }

    /// Start counting down from `seconds` (at least one tick).
    pub fn started(seconds: u32) -> Self {
        Self {
            remaining: Some(seconds.max(1)),
        }
    }

    /// Return `true` while counting.
    pub fn is_running(self) -> bool {
        self.remaining.is_some()
    }

    /// Value currently displayed, if counting.
    pub fn remaining(self) -> Option<u32> {
        self.remaining
    }

    /// Advance by one tick.
    pub fn tick(self) -> (Self, CountdownTick) {
        match self.remaining {
            None => (self, CountdownTick::Idle),
            Some(n) if n <= 1 => (Self::idle(), CountdownTick::Fire),
            Some(n) => (
                Self {
                    remaining: Some(n - 1),
                },
                CountdownTick::Remaining(n - 1),
            ),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/countdown.rs"]
mod tests;
