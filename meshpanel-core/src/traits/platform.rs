//! Platform bundle
//!
//! Everything the UI task talks to, injected as one value at construction.
//! Optional peripherals return `None` and the matching behaviour is skipped.

use meshpanel_hal::{Board, OutputPin};

use super::{
    Buzzer, InputSources, MeshNode, PrefsStore, RadioStatus, RtcClock, SensorManager, Vibration,
};

pub trait Platform {
    type Board: Board;
    type Clock: RtcClock;
    type Mesh: MeshNode;
    type Radio: RadioStatus;
    type Sensors: SensorManager;
    type Store: PrefsStore;
    type Buzzer: Buzzer;
    type Vibration: Vibration;
    type Inputs: InputSources;
    type Led: OutputPin;

    fn board(&mut self) -> &mut Self::Board;

    fn clock(&self) -> &Self::Clock;

    fn mesh(&mut self) -> &mut Self::Mesh;

    fn radio(&mut self) -> &mut Self::Radio;

    fn sensors(&mut self) -> Option<&mut Self::Sensors>;

    fn store(&mut self) -> &mut Self::Store;

    fn buzzer(&mut self) -> Option<&mut Self::Buzzer>;

    fn vibration(&mut self) -> Option<&mut Self::Vibration>;

    fn inputs(&mut self) -> &mut Self::Inputs;

    fn status_led(&mut self) -> Option<&mut Self::Led>;

    /// Monotonic milliseconds, read while blocking on shutdown audio
    fn uptime_ms(&self) -> u32;

    /// Drive the GPS power/standby lines; no-op without GPS hardware
    fn set_gps_power(&mut self, on: bool);

    /// Read back the hardware GPS switch, if the board has one
    fn gps_switch_state(&self) -> Option<bool> {
        None
    }
}
