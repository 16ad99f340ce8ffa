//! Transient alert overlay

use heapless::String;

use super::is_after;

/// Longest alert text
pub const MAX_ALERT: usize = 48;

/// Text drawn over the current screen until its expiry
#[derive(Debug, Clone, Default)]
pub struct Alert {
    text: String<MAX_ALERT>,
    expiry: u32,
    shown: bool,
}

impl Alert {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `text` for `duration_ms` from `now_ms`, replacing any current alert
    pub fn show(&mut self, text: &str, now_ms: u32, duration_ms: u32) {
        self.text.clear();
        for c in text.chars() {
            if self.text.push(c).is_err() {
                break;
            }
        }
        self.expiry = now_ms.wrapping_add(duration_ms);
        self.shown = true;
    }

    pub fn is_active(&self, now_ms: u32) -> bool {
        self.shown && is_after(self.expiry, now_ms)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn expiry(&self) -> u32 {
        self.expiry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expires_at_deadline() {
        let mut alert = Alert::new();
        assert!(!alert.is_active(0));

        alert.show("Advert sent!", 1000, 1000);
        assert!(alert.is_active(1000));
        assert!(alert.is_active(1999));
        assert!(!alert.is_active(2000));
        assert_eq!(alert.expiry(), 2000);
        assert_eq!(alert.text(), "Advert sent!");
    }

    #[test]
    fn test_newer_alert_replaces() {
        let mut alert = Alert::new();
        alert.show("Buzzer: OFF", 0, 800);
        alert.show("GPS: Enabled", 100, 800);
        assert_eq!(alert.text(), "GPS: Enabled");
        assert_eq!(alert.expiry(), 900);
    }
}
