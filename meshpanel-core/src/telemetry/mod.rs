//! Telemetry encoding
//!
//! Sensor readings travel as a Cayenne-LPP record sequence: the sensor
//! manager appends records, the sensors page reads them back one by one.

pub mod lpp;

pub use lpp::{LppError, LppReader, LppRecord, LppValue, LppWriter, LPP_CAPACITY};

/// Channel used for the node's own readings
pub const TELEM_CHANNEL_SELF: u8 = 1;
