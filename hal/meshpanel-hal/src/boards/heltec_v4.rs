//! ESP32 board with a shared peripheral power rail
//!
//! Display, GPS and sensors hang off one VEXT switch. Every user claims the
//! rail and the last release cuts it.

use crate::adc::{raw_to_millivolts, AdcReader};
use crate::board::{AdcMultiplier, Board, SystemControl};
use crate::gpio::{OutputPin, RefCountedPin};

const DEFAULT_MULTIPLIER: f32 = 5.46;

/// Heltec V4
pub struct HeltecV4Board<A, P, S> {
    adc: A,
    periph_power: RefCountedPin<P>,
    sys: S,
    multiplier: AdcMultiplier,
}

impl<A, P, S> HeltecV4Board<A, P, S>
where
    A: AdcReader,
    P: OutputPin,
    S: SystemControl,
{
    /// `vext_active_high` is the rail switch polarity
    pub fn new(adc: A, vext: P, vext_active_high: bool, sys: S) -> Self {
        Self {
            adc,
            periph_power: RefCountedPin::new(vext, vext_active_high),
            sys,
            multiplier: AdcMultiplier::new(DEFAULT_MULTIPLIER),
        }
    }

    /// Shared peripheral rail
    pub fn periph_power(&mut self) -> &mut RefCountedPin<P> {
        &mut self.periph_power
    }
}

impl<A, P, S> Board for HeltecV4Board<A, P, S>
where
    A: AdcReader,
    P: OutputPin,
    S: SystemControl,
{
    fn batt_milli_volts(&mut self) -> u16 {
        let raw = self.adc.read_raw();
        raw_to_millivolts(
            raw,
            self.adc.resolution_bits(),
            self.adc.reference_mv(),
            self.multiplier.get(),
        )
    }

    fn manufacturer_name(&self) -> &str {
        "Heltec V4"
    }

    fn reboot(&mut self) {
        self.sys.reboot();
    }

    fn power_off(&mut self) {
        while self.periph_power.claims() > 0 {
            self.periph_power.release();
        }
        self.sys.power_off();
    }

    fn set_adc_multiplier(&mut self, multiplier: f32) -> bool {
        self.multiplier.set(multiplier);
        true
    }

    fn adc_multiplier(&self) -> f32 {
        self.multiplier.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpio::tests::FakeOutput;

    struct FakeAdc(u16);

    impl AdcReader for FakeAdc {
        fn read_raw(&mut self) -> u16 {
            self.0
        }
        fn resolution_bits(&self) -> u8 {
            12
        }
        fn reference_mv(&self) -> u32 {
            3300
        }
    }

    #[derive(Default)]
    struct FakeSys {
        power_offs: u8,
    }

    impl SystemControl for FakeSys {
        fn reboot(&mut self) {}
        fn power_off(&mut self) {
            self.power_offs += 1;
        }
    }

    #[test]
    fn test_battery_reading() {
        let mut b = HeltecV4Board::new(FakeAdc(900), FakeOutput::default(), true, FakeSys::default());
        // 900 * 3300/4096 * 5.46
        assert_eq!(b.batt_milli_volts(), 3959);
        assert_eq!(b.manufacturer_name(), "Heltec V4");
    }

    #[test]
    fn test_power_off_drops_rail() {
        let mut b = HeltecV4Board::new(FakeAdc(0), FakeOutput::default(), false, FakeSys::default());
        b.periph_power().claim();
        b.periph_power().claim();
        assert!(b.periph_power().is_on());

        b.power_off();
        assert!(!b.periph_power().is_on());
        assert_eq!(b.sys.power_offs, 1);
    }
}
