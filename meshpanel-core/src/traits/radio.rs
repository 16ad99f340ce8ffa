//! Radio status

/// Current LoRa modulation
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModulationParams {
    pub freq_mhz: f32,
    pub bw_khz: f32,
    pub sf: u8,
    pub cr: u8,
    pub tx_power_dbm: i8,
}

/// Read-only radio telemetry
pub trait RadioStatus {
    /// Most recent noise floor estimate in dB
    fn noise_floor(&self) -> i16;

    fn params(&self) -> ModulationParams;

    /// Put the transceiver to sleep before power-off
    fn power_off(&mut self);
}
