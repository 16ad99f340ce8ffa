//! Status LED heartbeat

use super::is_after;

/// Heartbeat period
pub const LED_CYCLE_MS: u32 = 4000;
/// Blink length while idle
pub const LED_ON_MS: u32 = 20;
/// Blink length while unread messages are waiting
pub const LED_ON_MSG_MS: u32 = 200;

/// Short blink every cycle, longer while messages are unread
#[derive(Debug, Clone, Default)]
pub struct Heartbeat {
    lit: bool,
    on_ms: u32,
    next_change: u32,
}

impl Heartbeat {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance; returns the new LED level when it changes
    pub fn update(&mut self, now_ms: u32, unread: bool) -> Option<bool> {
        if !is_after(now_ms, self.next_change) {
            return None;
        }
        if self.lit {
            self.lit = false;
            self.next_change = now_ms.wrapping_add(LED_CYCLE_MS - self.on_ms);
        } else {
            self.lit = true;
            self.on_ms = if unread { LED_ON_MSG_MS } else { LED_ON_MS };
            self.next_change = now_ms.wrapping_add(self.on_ms);
        }
        Some(self.lit)
    }
}
