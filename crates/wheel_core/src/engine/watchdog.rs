//! Safety watchdog
//!
//! A single cancellable deferred deadline. The simulator arms it on spin start
//! and cancels it on a normal stop; if it comes due first the spin is forced
//! to end.

use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SafetyWatchdog {
    deadline: Option<Duration>,
}

impl SafetyWatchdog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) the deadline at `now + timeout`.
    pub fn arm(&mut self, now: Duration, timeout: Duration) {
        self.deadline = Some(now.saturating_add(timeout));
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn is_due(&self, now: Duration) -> bool {
        matches!(self.deadline, Some(deadline) if now >= deadline)
    }

    /// Time left before the deadline, `None` when disarmed.
    pub fn remaining(&self, now: Duration) -> Option<Duration> {
        self.deadline.map(|deadline| deadline.saturating_sub(now))
    }
}
