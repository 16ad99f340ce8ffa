//! Configuration types
//!
//! Board capabilities and UI timings are fixed per firmware image and
//! validated once at startup. Node preferences are user settings persisted
//! by the platform's store as postcard binary data.

pub mod battery;
pub mod caps;
pub mod prefs;
pub mod timings;

pub use battery::BatteryRange;
pub use caps::{BoardCapabilities, DisplayTech, InputLayout};
pub use prefs::{NodePrefs, PrefsError, MAX_NODE_NAME};
pub use timings::{UiTimings, MAX_RECENT};

use meshpanel_hal::button::ButtonTimings;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Joystick layout declared without a centre (enter) button
    JoystickWithoutEnter,
    /// Hibernation hold is not longer than the classifier's long press
    HibernateHoldTooShort,
    /// A timing that must be non-zero is zero
    ZeroDuration,
    /// Recent list size is zero or above the supported maximum
    RecentListSize,
    /// Battery range has min >= max
    BatteryRange,
}

/// Startup configuration of the UI task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UiConfig {
    pub caps: BoardCapabilities,
    pub timings: UiTimings,
    /// Timings the button classifiers were built with
    pub button: ButtonTimings,
}

impl UiConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.caps.validate()?;
        self.timings.validate(&self.button)
    }
}
