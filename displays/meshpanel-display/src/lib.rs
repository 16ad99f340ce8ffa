//! Display abstraction and shared text handling for meshpanel
//!
//! This crate provides:
//! - `DisplaySurface` trait for OLED, e-ink and TFT panels
//! - Text helpers: charset fallback, word wrapping, ellipsizing
//! - `TextCanvas`, a recording surface used by host tests and simulators
//! - `GraphicsSurface` (feature `graphics`), an adapter over any
//!   embedded-graphics `DrawTarget`
//!
//! # Frame model
//!
//! Screens draw between `start_frame` and `end_frame`. Everything in between
//! is buffered and presented at once when the frame ends, so a partially
//! drawn screen is never visible.

#![no_std]

pub mod canvas;
#[cfg(feature = "graphics")]
pub mod graphics;
pub mod surface;
pub mod text;

// Re-export key types
pub use canvas::TextCanvas;
pub use surface::{Color, DisplayError, DisplaySurface};
pub use text::translate_utf8_to_blocks;
