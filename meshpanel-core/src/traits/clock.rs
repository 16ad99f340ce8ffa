//! Real-time clock

/// Wall clock source
pub trait RtcClock {
    /// Current UTC time in unix seconds
    fn current_time(&self) -> u32;
}
