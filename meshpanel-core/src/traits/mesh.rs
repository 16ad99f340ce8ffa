//! Mesh node actions and status

use heapless::String;

/// Longest contact name kept for the recent list
pub const MAX_CONTACT_NAME: usize = 32;

/// A recently heard advert
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdvertPath {
    /// Contact name; empty marks an unused slot
    pub name: String<MAX_CONTACT_NAME>,
    /// RTC time the advert was received, unix seconds
    pub recv_timestamp: u32,
    pub path_len: u8,
}

impl AdvertPath {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

/// Mesh stack operations the UI triggers or displays
pub trait MeshNode {
    /// Broadcast a self advert; false if it could not be queued
    fn advert(&mut self) -> bool;

    /// Enable the companion serial/BLE bridge
    fn enable_serial(&mut self);

    fn disable_serial(&mut self);

    fn is_serial_enabled(&self) -> bool;

    /// Drop into the maintenance CLI
    fn enter_cli_rescue(&mut self);

    /// A companion app is connected
    fn has_connection(&self) -> bool;

    /// BLE pairing PIN, 0 when none is shown
    fn ble_pin(&self) -> u32;

    /// Fill `out` with the most recently heard adverts, newest first
    ///
    /// Slots beyond the available entries are left empty.
    fn recently_heard(&self, out: &mut [AdvertPath]);
}
