//! nRF52 board with a switched battery divider
//!
//! The divider only conducts while the control pin is high, so each reading
//! enables it, waits for the input to settle, samples and disables it again.

use embedded_hal::delay::DelayNs;

use crate::adc::{raw_to_millivolts, AdcReader};
use crate::board::{AdcMultiplier, Board, SystemControl};
use crate::gpio::{ActiveLevelPin, OutputPin};

const DEFAULT_MULTIPLIER: f32 = 4.9;
const SETTLE_MS: u32 = 10;

/// Heltec T114
pub struct T114Board<A, P, D, S> {
    adc: A,
    bat_ctl: P,
    gps_en: Option<ActiveLevelPin<P>>,
    delay: D,
    sys: S,
    multiplier: AdcMultiplier,
}

impl<A, P, D, S> T114Board<A, P, D, S>
where
    A: AdcReader,
    P: OutputPin,
    D: DelayNs,
    S: SystemControl,
{
    pub fn new(adc: A, mut bat_ctl: P, delay: D, sys: S) -> Self {
        bat_ctl.set_low();
        Self {
            adc,
            bat_ctl,
            gps_en: None,
            delay,
            sys,
            multiplier: AdcMultiplier::new(DEFAULT_MULTIPLIER),
        }
    }

    /// Attach the GPS enable line (active high on this board)
    pub fn with_gps_enable(mut self, pin: P) -> Self {
        self.gps_en = Some(ActiveLevelPin::new(pin, true));
        self
    }

    /// Drive the GPS power line, if fitted
    pub fn set_gps_power(&mut self, on: bool) {
        if let Some(pin) = self.gps_en.as_mut() {
            if on {
                pin.activate();
            } else {
                pin.deactivate();
            }
        }
    }

    pub fn gps_powered(&self) -> Option<bool> {
        self.gps_en.as_ref().map(|pin| pin.is_active())
    }
}

impl<A, P, D, S> Board for T114Board<A, P, D, S>
where
    A: AdcReader,
    P: OutputPin,
    D: DelayNs,
    S: SystemControl,
{
    fn batt_milli_volts(&mut self) -> u16 {
        self.bat_ctl.set_high();
        self.delay.delay_ms(SETTLE_MS);
        let raw = self.adc.read_raw();
        self.bat_ctl.set_low();

        raw_to_millivolts(
            raw,
            self.adc.resolution_bits(),
            self.adc.reference_mv(),
            self.multiplier.get(),
        )
    }

    fn manufacturer_name(&self) -> &str {
        "Heltec T114"
    }

    fn reboot(&mut self) {
        self.sys.reboot();
    }

    fn power_off(&mut self) {
        self.set_gps_power(false);
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

    struct FakeAdc {
        raw: u16,
    }

    impl AdcReader for FakeAdc {
        fn read_raw(&mut self) -> u16 {
            self.raw
        }
        fn resolution_bits(&self) -> u8 {
            12
        }
        fn reference_mv(&self) -> u32 {
            3000
        }
    }

    #[derive(Default)]
    struct FakeDelay {
        total_ns: u64,
    }

    impl DelayNs for FakeDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += ns as u64;
        }
    }

    #[derive(Default)]
    struct FakeSys {
        reboots: u8,
        power_offs: u8,
    }

    impl SystemControl for FakeSys {
        fn reboot(&mut self) {
            self.reboots += 1;
        }
        fn power_off(&mut self) {
            self.power_offs += 1;
        }
    }

    fn board(raw: u16) -> T114Board<FakeAdc, FakeOutput, FakeDelay, FakeSys> {
        T114Board::new(
            FakeAdc { raw },
            FakeOutput::default(),
            FakeDelay::default(),
            FakeSys::default(),
        )
    }

    #[test]
    fn test_battery_read_sequences_divider() {
        let mut b = board(1000);
        // 1000 * 3000/4096 * 4.9
        assert_eq!(b.batt_milli_volts(), 3588);
        assert!(!b.bat_ctl.high);
        assert_eq!(b.bat_ctl.writes, 3);
        assert!(b.delay.total_ns >= 10_000_000);
    }

    #[test]
    fn test_calibration_applies_to_reading() {
        let mut b = board(1000);
        assert!(b.set_adc_multiplier(5.0));
        assert_eq!(b.batt_milli_volts(), 3662);
        b.set_adc_multiplier(0.0);
        assert_eq!(b.adc_multiplier(), 4.9);
    }

    #[test]
    fn test_power_off_cuts_gps() {
        let mut b = board(0).with_gps_enable(FakeOutput::default());
        b.set_gps_power(true);
        assert_eq!(b.gps_powered(), Some(true));

        b.power_off();
        assert_eq!(b.gps_powered(), Some(false));
        assert_eq!(b.sys.power_offs, 1);
        assert_eq!(b.manufacturer_name(), "Heltec T114");
    }
}
