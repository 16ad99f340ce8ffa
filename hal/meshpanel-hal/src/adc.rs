//! ADC sampling for battery sense
//!
//! Boards read the cell voltage through a resistor divider into one ADC
//! channel. The chip glue supplies raw counts; conversion to millivolts is
//! shared here.

/// A single-channel ADC the board can sample
pub trait AdcReader {
    /// Take one raw sample
    fn read_raw(&mut self) -> u16;

    /// Resolution in bits (12 on nRF52 / ESP32 as configured by the boards)
    fn resolution_bits(&self) -> u8;

    /// Full-scale reference in millivolts
    fn reference_mv(&self) -> u32;
}

/// Convert a raw sample to millivolts at the divider input
///
/// `multiplier` is the divider ratio (e.g. 4.9 for a 1:4.9 divider).
pub fn raw_to_millivolts(raw: u16, resolution_bits: u8, reference_mv: u32, multiplier: f32) -> u16 {
    let full_scale = (1u32 << resolution_bits.min(16)) as f32;
    let mv = raw as f32 * (reference_mv as f32 / full_scale) * multiplier;
    if mv <= 0.0 {
        0
    } else if mv >= u16::MAX as f32 {
        u16::MAX
    } else {
        mv as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_reading() {
        assert_eq!(raw_to_millivolts(0, 12, 3000, 4.9), 0);
    }

    #[test]
    fn test_divider_scaling() {
        // Half scale on a 3.0 V reference through 1:2 divider
        assert_eq!(raw_to_millivolts(2048, 12, 3000, 2.0), 3000);
    }

    #[test]
    fn test_saturates() {
        assert_eq!(raw_to_millivolts(4095, 12, 3300, 100.0), u16::MAX);
    }
}
