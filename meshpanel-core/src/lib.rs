//! Board-agnostic UI core for LoRa mesh node firmware
//!
//! This crate contains the application side of the node's user interface:
//!
//! - Configuration types (board capabilities, timings, node preferences)
//! - Collaborator traits the firmware implements (board, mesh, sensors, ...)
//! - Cayenne-LPP telemetry encoding for the sensors page
//! - State machines: press-and-hold hibernation, alert overlay, status LED
//! - Input classification into navigation keys
//! - The screens and the `UiTask` that drives them from a periodic tick

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod config;
pub mod input;
pub mod state;
pub mod telemetry;
pub mod traits;
pub mod ui;

#[cfg(test)]
mod testutil;

pub use ui::{ScreenId, UiTask};
