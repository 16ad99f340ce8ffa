//! Collaborator traits
//!
//! The UI core never touches hardware or the mesh stack directly. The
//! firmware implements these traits and hands them over through one
//! [`Platform`] value.

pub mod clock;
pub mod input;
pub mod mesh;
pub mod notify;
pub mod platform;
pub mod radio;
pub mod sensors;
pub mod store;

pub use clock::RtcClock;
pub use input::{InputSource, InputSources};
pub use mesh::{AdvertPath, MeshNode};
pub use notify::{Buzzer, Melody, UiEvent, Vibration};
pub use platform::Platform;
pub use radio::{ModulationParams, RadioStatus};
pub use sensors::{GpsFix, SensorManager};
pub use store::PrefsStore;
