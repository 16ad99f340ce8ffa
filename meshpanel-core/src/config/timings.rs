//! UI timing configuration
//!
//! All durations are milliseconds unless the name says otherwise.

use meshpanel_hal::button::ButtonTimings;

use super::ConfigError;

/// Upper bound for the recent-contacts list
pub const MAX_RECENT: usize = 8;

/// UI timings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UiTimings {
    /// Inactivity before the display powers down; 0 keeps it on
    pub auto_off_ms: u32,
    /// Splash screen duration
    pub boot_screen_ms: u32,
    /// Hold time before the power-off warning
    pub long_press_ms: u32,
    /// Further hold time after the warning that cancels power-off
    pub hibernate_cancel_ms: u32,
    /// Hibernation is not armed before this uptime
    pub hibernate_min_uptime_ms: u32,
    /// A long press this soon after boot enters CLI rescue instead
    pub rescue_window_ms: u32,
    /// Low-battery poll interval
    pub battery_check_ms: u32,
    /// Cap on waiting for the buzzer before shutting down
    pub shutdown_audio_wait_ms: u32,
    /// Minimum interval between analogue button samples
    pub analog_poll_ms: u32,
    /// Offset added to RTC time for the clock, in seconds
    pub timezone_offset_s: i32,
    /// Entries shown on the recent-contacts and sensors pages
    pub recent_list_size: usize,
    /// Shut down below this battery voltage; `None` disables the watch
    pub low_battery_mv: Option<u16>,
}

impl Default for UiTimings {
    fn default() -> Self {
        Self {
            auto_off_ms: 10_000,
            boot_screen_ms: 3000,
            long_press_ms: 5000,
            hibernate_cancel_ms: 3000,
            hibernate_min_uptime_ms: 10_000,
            rescue_window_ms: 8000,
            battery_check_ms: 8000,
            shutdown_audio_wait_ms: 2500,
            analog_poll_ms: 10,
            timezone_offset_s: 10_800,
            recent_list_size: 4,
            low_battery_mv: None,
        }
    }
}

impl UiTimings {
    pub fn auto_off_enabled(&self) -> bool {
        self.auto_off_ms > 0
    }

    /// Check the timings against each other and the button classifier
    pub fn validate(&self, button: &ButtonTimings) -> Result<(), ConfigError> {
        if self.boot_screen_ms == 0 || self.hibernate_cancel_ms == 0 || self.battery_check_ms == 0
        {
            return Err(ConfigError::ZeroDuration);
        }
        // The classifier's long press must fire well before the hold warning
        if self.long_press_ms <= button.long_press_ms {
            return Err(ConfigError::HibernateHoldTooShort);
        }
        if self.recent_list_size == 0 || self.recent_list_size > MAX_RECENT {
            return Err(ConfigError::RecentListSize);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let timings = UiTimings::default();
        assert!(timings.validate(&ButtonTimings::default()).is_ok());
        assert!(timings.auto_off_enabled());
    }

    #[test]
    fn test_hold_must_exceed_classifier_long_press() {
        let timings = UiTimings {
            long_press_ms: 800,
            ..Default::default()
        };
        assert_eq!(
            timings.validate(&ButtonTimings::default()),
            Err(ConfigError::HibernateHoldTooShort)
        );
    }

    #[test]
    fn test_recent_list_bounds() {
        for size in [0, MAX_RECENT + 1] {
            let timings = UiTimings {
                recent_list_size: size,
                ..Default::default()
            };
            assert_eq!(
                timings.validate(&ButtonTimings::default()),
                Err(ConfigError::RecentListSize)
            );
        }
    }

    #[test]
    fn test_zero_auto_off_is_allowed() {
        let timings = UiTimings {
            auto_off_ms: 0,
            ..Default::default()
        };
        assert!(timings.validate(&ButtonTimings::default()).is_ok());
        assert!(!timings.auto_off_enabled());
    }
}
