//! UI state machines
//!
//! Small, deterministic machines driven by the UI tick. Each one takes the
//! current monotonic time as an argument and never reads a clock itself.

pub mod alert;
pub mod hibernate;
pub mod led;
pub mod power;

pub use alert::{Alert, MAX_ALERT};
pub use hibernate::{HoldAction, HoldMachine, HoldState};
pub use led::Heartbeat;
pub use power::AutoOff;

/// Whether `now` is strictly past `deadline`, tolerating counter wrap
pub(crate) fn is_after(now: u32, deadline: u32) -> bool {
    (now.wrapping_sub(deadline) as i32) > 0
}
