//! Board variants
//!
//! Each variant wires the shared traits to one hardware layout. Chip glue
//! supplies the pins, ADC channel and system control; the variant knows the
//! divider ratio, the sense sequencing and what to switch off before power
//! down.

mod heltec_v4;
mod t114;

pub use heltec_v4::HeltecV4Board;
pub use t114::T114Board;
