//! Node preferences
//!
//! User-adjustable settings the UI reads and toggles. The platform's store
//! owns persistence; with the `serde` feature the struct round-trips through
//! postcard so a store can keep it in a flash page.

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum node name length in bytes
pub const MAX_NODE_NAME: usize = 32;

/// Preference (de)serialization errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PrefsError {
    /// Output buffer too small
    BufferFull,
    /// Stored bytes do not decode
    Corrupt,
}

/// Node preferences
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodePrefs {
    /// Advertised node name (UTF-8)
    pub node_name: String<MAX_NODE_NAME>,
    /// Radio frequency in MHz
    pub freq_mhz: f32,
    /// Bandwidth in kHz
    pub bw_khz: f32,
    /// Spreading factor
    pub sf: u8,
    /// Coding rate denominator (4/x)
    pub cr: u8,
    pub tx_power_dbm: i8,
    /// Enter the screensaver instead of switching the display off
    pub screensaver_enabled: bool,
    /// Screensaver runs at minimum contrast
    pub screensaver_dimmed: bool,
    pub buzzer_quiet: bool,
    pub gps_enabled: bool,
    /// GPS update interval in seconds, 0 leaves the driver default
    pub gps_interval_s: u32,
}

impl Default for NodePrefs {
    fn default() -> Self {
        Self {
            node_name: String::new(),
            freq_mhz: 869.525,
            bw_khz: 250.0,
            sf: 11,
            cr: 5,
            tx_power_dbm: 22,
            screensaver_enabled: false,
            screensaver_dimmed: false,
            buzzer_quiet: false,
            gps_enabled: false,
            gps_interval_s: 0,
        }
    }
}

#[cfg(feature = "serde")]
impl NodePrefs {
    /// Encode into `buf`, returning the used part
    pub fn to_slice<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], PrefsError> {
        postcard::to_slice(self, buf).map_err(|_| PrefsError::BufferFull)
    }

    /// Decode from stored bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrefsError> {
        postcard::from_bytes(bytes).map_err(|_| PrefsError::Corrupt)
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn test_postcard_persistence() {
        let mut prefs = NodePrefs::default();
        let _ = prefs.node_name.push_str("Hilltop");
        prefs.screensaver_enabled = true;
        prefs.gps_interval_s = 900;

        let mut buf = [0u8; 128];
        let used = prefs.to_slice(&mut buf).unwrap().len();
        assert_eq!(NodePrefs::from_bytes(&buf[..used]).unwrap(), prefs);
    }

    #[test]
    fn test_small_buffer_and_garbage() {
        let prefs = NodePrefs::default();
        let mut buf = [0u8; 4];
        assert_eq!(prefs.to_slice(&mut buf), Err(PrefsError::BufferFull));
        assert_eq!(NodePrefs::from_bytes(&[0xFF; 3]), Err(PrefsError::Corrupt));
    }
}
