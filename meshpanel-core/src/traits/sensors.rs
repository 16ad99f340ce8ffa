//! Sensor manager

use crate::telemetry::LppWriter;

/// GPS position snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GpsFix {
    pub valid: bool,
    pub satellites: u8,
    /// Latitude in microdegrees
    pub lat_e6: i32,
    /// Longitude in microdegrees
    pub lon_e6: i32,
    /// Altitude in millimetres
    pub alt_mm: i32,
}

/// Environment and location sensors
pub trait SensorManager {
    /// Value of a named setting (e.g. `"gps"` is `"1"` or `"0"`)
    fn setting(&self, name: &str) -> Option<&str>;

    /// Change a named setting; false if the name is unknown
    fn set_setting(&mut self, name: &str, value: &str) -> bool;

    /// Append current readings to `out`
    fn query(&mut self, out: &mut LppWriter);

    /// Location provider, if a GPS is attached
    fn location(&self) -> Option<GpsFix>;
}
