//! Display auto-off deadline

use super::is_after;

/// Inactivity deadline for the display
///
/// A zero period disables auto-off entirely.
#[derive(Debug, Clone)]
pub struct AutoOff {
    period_ms: u32,
    deadline: u32,
}

impl AutoOff {
    pub fn new(period_ms: u32, now_ms: u32) -> Self {
        Self {
            period_ms,
            deadline: now_ms.wrapping_add(period_ms),
        }
    }

    /// Restart the inactivity period from `now_ms`
    pub fn extend(&mut self, now_ms: u32) {
        self.deadline = now_ms.wrapping_add(self.period_ms);
    }

    /// Push the deadline to `now_ms + ms`
    pub fn extend_by(&mut self, now_ms: u32, ms: u32) {
        self.deadline = now_ms.wrapping_add(ms);
    }

    pub fn is_due(&self, now_ms: u32) -> bool {
        self.period_ms > 0 && is_after(now_ms, self.deadline)
    }

    pub fn deadline(&self) -> u32 {
        self.deadline
    }
}
