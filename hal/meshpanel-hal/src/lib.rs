//! meshpanel Hardware Abstraction Layer
//!
//! This crate defines the hardware-facing traits the UI core talks to and a
//! few thin, board-agnostic drivers built on top of them. Chip-specific code
//! (nRF52 SAADC, ESP32 ADC, GPIO registers) implements the traits; everything
//! above stays testable on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  meshpanel-core (UiTask, screens)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  meshpanel-hal (this crate)             │
//! │  traits · button classifier · boards    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  nRF52 glue   │       │  ESP32 glue   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Contents
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`], [`gpio::RefCountedPin`] - Digital I/O
//! - [`adc::AdcReader`] - Raw battery-sense sampling
//! - [`board::Board`] - Battery, identity and power control of a node
//! - [`button::MultiClickButton`] - Click / multi-click / long-press classification
//! - [`boards`] - The T114 and V4 board variants

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod board;
pub mod boards;
pub mod button;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use adc::AdcReader;
pub use board::{AdcMultiplier, Board, SystemControl};
pub use button::{ButtonEvent, MultiClickButton, PressSource};
pub use gpio::{InputPin, OutputPin, RefCountedPin};
