//! Board capability descriptor
//!
//! Resolved once at startup from the board variant. Everything that differs
//! between builds (buttons, buzzer, GPS, screen type) is a runtime branch on
//! this struct.

use super::{BatteryRange, ConfigError};

/// How the user drives the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputLayout {
    /// One button: click, multi-click and long press
    #[default]
    SingleButton,
    /// Enter plus left/right/back buttons
    Joystick,
}

/// Display technology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayTech {
    #[default]
    Oled,
    /// Keeps its image without power
    EInk,
    /// Colour TFT (ST7789 class); uses the compact large-text layout
    Tft,
}

impl DisplayTech {
    /// Whether the panel keeps showing the last frame when powered down
    pub fn retains_image(self) -> bool {
        matches!(self, DisplayTech::EInk)
    }
}

/// Board capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardCapabilities {
    pub input_layout: InputLayout,
    /// A user (or joystick centre) button is fitted
    pub user_button: bool,
    /// An analogue button sampled through the ADC is fitted
    pub analog_button: bool,
    pub buzzer: bool,
    pub vibration: bool,
    /// GPS receiver fitted; adds the GPS page
    pub gps: bool,
    /// Show the telemetry page
    pub sensors_page: bool,
    pub status_led: bool,
    /// Repeater build: Home is a single status page
    pub repeater_status: bool,
    pub display_tech: DisplayTech,
    /// Cell voltage range for the charge indicator
    pub battery: BatteryRange,
}

impl Default for BoardCapabilities {
    fn default() -> Self {
        Self {
            input_layout: InputLayout::SingleButton,
            user_button: true,
            analog_button: false,
            buzzer: false,
            vibration: false,
            gps: false,
            sensors_page: false,
            status_led: false,
            repeater_status: false,
            display_tech: DisplayTech::Oled,
            battery: BatteryRange::default(),
        }
    }
}

impl BoardCapabilities {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input_layout == InputLayout::Joystick && !self.user_button {
            return Err(ConfigError::JoystickWithoutEnter);
        }
        self.battery.validate()
    }

    /// Alert hint for the recent-contacts page
    pub fn send_hint(&self) -> &'static str {
        match self.input_layout {
            InputLayout::Joystick => "Send: press Enter",
            InputLayout::SingleButton => "Send: long press",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(BoardCapabilities::default().validate().is_ok());
    }

    #[test]
    fn test_joystick_needs_enter() {
        let caps = BoardCapabilities {
            input_layout: InputLayout::Joystick,
            user_button: false,
            ..Default::default()
        };
        assert_eq!(caps.validate(), Err(ConfigError::JoystickWithoutEnter));
    }

    #[test]
    fn test_only_eink_retains_image() {
        assert!(DisplayTech::EInk.retains_image());
        assert!(!DisplayTech::Oled.retains_image());
        assert!(!DisplayTech::Tft.retains_image());
    }
}
