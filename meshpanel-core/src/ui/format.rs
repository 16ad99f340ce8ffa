//! Text formatting helpers for screens

use core::fmt::{self, Write};

use chrono::{DateTime, Datelike, Timelike};
use heapless::String;

/// Format into a fixed buffer, truncating silently on overflow
pub fn text<const N: usize>(args: fmt::Arguments<'_>) -> String<N> {
    let mut out = String::new();
    let _ = out.write_fmt(args);
    out
}

/// Compact age of a timestamp: `42s`, `7m`, `3h`
pub fn age_label(now_secs: u32, then_secs: u32) -> String<12> {
    let secs = now_secs.saturating_sub(then_secs);
    if secs < 60 {
        text(format_args!("{}s", secs))
    } else if secs < 60 * 60 {
        text(format_args!("{}m", secs / 60))
    } else {
        text(format_args!("{}h", secs / (60 * 60)))
    }
}

fn local(unix_secs: u32, offset_s: i32) -> Option<DateTime<chrono::Utc>> {
    DateTime::from_timestamp(unix_secs as i64 + offset_s as i64, 0)
}

/// `HH:MM` wall clock time
pub fn clock_hm(unix_secs: u32, offset_s: i32) -> String<8> {
    match local(unix_secs, offset_s) {
        Some(t) => text(format_args!("{:02}:{:02}", t.hour(), t.minute())),
        None => text(format_args!("--:--")),
    }
}

/// `DD.MM.YYYY` date
pub fn date_dmy(unix_secs: u32, offset_s: i32) -> String<12> {
    match local(unix_secs, offset_s) {
        Some(t) => text(format_args!("{:02}.{:02}.{:04}", t.day(), t.month(), t.year())),
        None => text(format_args!("--.--.----")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_units() {
        assert_eq!(age_label(1000, 958).as_str(), "42s");
        assert_eq!(age_label(1000, 580).as_str(), "7m");
        assert_eq!(age_label(20_000, 9000).as_str(), "3h");
        // Timestamps from the future read as fresh
        assert_eq!(age_label(100, 200).as_str(), "0s");
    }

    #[test]
    fn test_clock_applies_offset() {
        // 2024-03-01 21:30:00 UTC
        let t = 1_709_328_600;
        assert_eq!(clock_hm(t, 0).as_str(), "21:30");
        assert_eq!(clock_hm(t, 10_800).as_str(), "00:30");
        assert_eq!(date_dmy(t, 0).as_str(), "01.03.2024");
        assert_eq!(date_dmy(t, 10_800).as_str(), "02.03.2024");
    }

    #[test]
    fn test_text_truncates() {
        let s: String<4> = text(format_args!("{}", 123_456));
        assert!(s.len() <= 4);
    }
}
