//! Board abstraction
//!
//! A board is the node as a whole: it knows how to read its battery, what it
//! is called, and how to reboot or power itself off.

/// Chip-level power primitives (System OFF, deep sleep, software reset)
pub trait SystemControl {
    /// Reset the MCU
    fn reboot(&mut self);

    /// Enter the lowest power state; only a button or reset wakes the node
    fn power_off(&mut self);
}

/// A complete node board
pub trait Board {
    /// Battery voltage in millivolts, 0 when unknown
    fn batt_milli_volts(&mut self) -> u16;

    /// Human readable board name
    fn manufacturer_name(&self) -> &str;

    /// Reset the node
    fn reboot(&mut self);

    /// Power the node down (hibernate)
    fn power_off(&mut self);

    /// Override the battery divider multiplier; 0.0 restores the default
    ///
    /// Returns false when the board does not support calibration.
    fn set_adc_multiplier(&mut self, _multiplier: f32) -> bool {
        false
    }

    /// Current effective battery divider multiplier
    fn adc_multiplier(&self) -> f32 {
        1.0
    }
}

/// Divider multiplier with a board default and an optional user override
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdcMultiplier {
    default: f32,
    value: f32,
}

impl AdcMultiplier {
    /// Create with the board's factory multiplier
    pub const fn new(default: f32) -> Self {
        Self {
            default,
            value: default,
        }
    }

    /// Set an override; zero resets to the factory value
    pub fn set(&mut self, multiplier: f32) {
        self.value = if multiplier == 0.0 {
            self.default
        } else {
            multiplier
        };
    }

    /// Effective multiplier
    pub fn get(&self) -> f32 {
        if self.value == 0.0 {
            self.default
        } else {
            self.value
        }
    }
}
