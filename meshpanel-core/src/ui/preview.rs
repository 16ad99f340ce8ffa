//! Unread message preview
//!
//! Keeps the last [`MAX_UNREAD`] incoming messages in a ring. `head` points
//! at the newest entry; stepping through the preview walks backwards in
//! time and counts the unread number down.

use heapless::String;
use meshpanel_display::{translate_utf8_to_blocks, Color, DisplaySurface};

use super::format::{self, age_label};
use super::screen::{Screen, UiContext, UiRequest};
use crate::input::Key;
use crate::traits::Platform;

/// Ring capacity
pub const MAX_UNREAD: usize = 32;
/// Origin label length, `(D) name:`
pub const MAX_ORIGIN: usize = 62;
/// Stored message body length
pub const MAX_BODY: usize = 78;

/// Path length marking a direct (zero hop) message
pub const PATH_DIRECT: u8 = 0xFF;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewEntry {
    /// RTC time of arrival, unix seconds
    pub timestamp: u32,
    pub origin: String<MAX_ORIGIN>,
    pub text: String<MAX_BODY>,
}

pub struct MessagePreviewScreen {
    entries: [PreviewEntry; MAX_UNREAD],
    head: usize,
    unread: usize,
}

impl Default for MessagePreviewScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl MessagePreviewScreen {
    pub fn new() -> Self {
        Self {
            entries: core::array::from_fn(|_| PreviewEntry::default()),
            head: MAX_UNREAD - 1,
            unread: 0,
        }
    }

    /// Push a message as the newest entry
    pub fn add_preview(&mut self, now_secs: u32, path_len: u8, from: &str, text: &str) {
        self.head = (self.head + 1) % MAX_UNREAD;
        if self.unread < MAX_UNREAD {
            self.unread += 1;
        }

        let entry = &mut self.entries[self.head];
        entry.timestamp = now_secs;
        entry.origin = if path_len == PATH_DIRECT {
            format::text(format_args!("(D) {}:", from))
        } else {
            format::text(format_args!("({}) {}:", path_len, from))
        };
        entry.text.clear();
        meshpanel_display::text::push_truncated(&mut entry.text, text);
    }

    /// Entry under the cursor
    pub fn current(&self) -> &PreviewEntry {
        &self.entries[self.head]
    }

    pub fn unread(&self) -> usize {
        self.unread
    }

    pub fn clear(&mut self) {
        self.unread = 0;
    }
}

impl<P: Platform> Screen<P> for MessagePreviewScreen {
    fn render(&mut self, display: &mut dyn DisplaySurface, ctx: &mut UiContext<'_, P>) -> u32 {
        display.set_text_size(1);
        display.set_color(Color::Green);
        display.set_cursor(0, 0);
        let count: String<16> = format::text(format_args!("Unread: {}", self.unread));
        display.print(&count);

        let entry = &self.entries[self.head];
        let age = age_label(ctx.now_secs(), entry.timestamp);
        let w = display.width();
        display.set_cursor(w - display.text_width(&age) - 2, 0);
        display.print(&age);

        display.draw_rect(0, 11, w, 1);

        display.set_cursor(0, 14);
        display.set_color(Color::Yellow);
        let origin: String<MAX_ORIGIN> = translate_utf8_to_blocks(&entry.origin);
        display.print(&origin);

        display.set_cursor(0, 25);
        display.set_color(Color::Light);
        let body: String<{ MAX_BODY * 3 }> = translate_utf8_to_blocks(&entry.text);
        display.print_word_wrap(&body, w);

        // Panels without auto-off are usually e-ink; spare the refreshes
        if ctx.timings.auto_off_enabled() {
            1000
        } else {
            10_000
        }
    }

    fn handle_input(&mut self, key: Key, ctx: &mut UiContext<'_, P>) -> bool {
        match key {
            Key::Next | Key::Right => {
                self.head = (self.head + MAX_UNREAD - 1) % MAX_UNREAD;
                self.unread = self.unread.saturating_sub(1);
                if self.unread == 0 {
                    ctx.request(UiRequest::GotoHome);
                }
                true
            }
            Key::Enter => {
                self.clear();
                ctx.request(UiRequest::GotoHome);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    use crate::config::{BoardCapabilities, UiTimings};
    use crate::testutil::FakePlatform;

    #[test]
    fn test_origin_labels() {
        let mut preview = MessagePreviewScreen::new();
        preview.add_preview(100, PATH_DIRECT, "Alice", "hi");
        assert_eq!(preview.current().origin.as_str(), "(D) Alice:");
        preview.add_preview(101, 3, "Bob", "yo");
        assert_eq!(preview.current().origin.as_str(), "(3) Bob:");
        assert_eq!(preview.current().timestamp, 101);
        assert_eq!(preview.unread(), 2);
    }

    #[test]
    fn test_long_body_is_truncated() {
        let mut preview = MessagePreviewScreen::new();
        let long = "x".repeat(200);
        preview.add_preview(0, 1, "Carol", &long);
        assert_eq!(preview.current().text.len(), MAX_BODY);
    }

    #[test]
    fn test_ring_reads_back_newest_first() {
        let mut platform = FakePlatform::new();
        let caps = BoardCapabilities::default();
        let timings = UiTimings::default();
        let mut preview = MessagePreviewScreen::new();
        // One more than fits: the first message is overwritten
        for i in 0..=MAX_UNREAD as u32 {
            preview.add_preview(i, 1, "n", "m");
        }

        let mut ctx = UiContext::new(0, true, &mut platform, &caps, &timings, 0);
        let mut seen = std::vec::Vec::new();
        for _ in 0..MAX_UNREAD {
            seen.push(preview.current().timestamp);
            assert!(preview.handle_input(Key::Next, &mut ctx));
        }
        let expected: std::vec::Vec<u32> = (1..=MAX_UNREAD as u32).rev().collect();
        assert_eq!(seen, expected);
        assert_eq!(preview.unread(), 0);
        assert_eq!(ctx.into_requests().as_slice(), &[UiRequest::GotoHome]);
    }

    #[test]
    fn test_other_keys_not_consumed() {
        let mut platform = FakePlatform::new();
        let caps = BoardCapabilities::default();
        let timings = UiTimings::default();
        let mut preview = MessagePreviewScreen::new();
        preview.add_preview(5, 2, "Dave", "ping");

        let mut ctx = UiContext::new(0, true, &mut platform, &caps, &timings, 1);
        assert!(!preview.handle_input(Key::Left, &mut ctx));
        assert!(!preview.handle_input(Key::Prev, &mut ctx));
        assert_eq!(preview.unread(), 1);
        assert!(ctx.into_requests().is_empty());
    }

    proptest! {
        #[test]
        fn prop_unread_saturates(pushes in 0usize..100) {
            let mut preview = MessagePreviewScreen::new();
            for i in 0..pushes {
                preview.add_preview(i as u32, 1, "n", "m");
            }
            prop_assert_eq!(preview.unread(), pushes.min(MAX_UNREAD));
            if pushes > 0 {
                prop_assert_eq!(preview.head, (pushes - 1) % MAX_UNREAD);
                prop_assert_eq!(preview.current().timestamp, pushes as u32 - 1);
            }
        }
    }
}
