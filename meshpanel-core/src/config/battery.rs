//! Battery voltage range for the charge indicator

use super::ConfigError;

/// Linear charge estimate between an empty and a full cell voltage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryRange {
    pub min_mv: u16,
    pub max_mv: u16,
}

impl Default for BatteryRange {
    fn default() -> Self {
        Self {
            min_mv: 3300,
            max_mv: 4200,
        }
    }
}

impl BatteryRange {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_mv >= self.max_mv {
            return Err(ConfigError::BatteryRange);
        }
        Ok(())
    }

    /// Charge percentage, clamped to 0..=100
    pub fn percent(&self, millivolts: u16) -> u8 {
        let span = self.max_mv.saturating_sub(self.min_mv) as i32;
        if span == 0 {
            return 0;
        }
        let pct = (millivolts as i32 - self.min_mv as i32) * 100 / span;
        pct.clamp(0, 100) as u8
    }
}
