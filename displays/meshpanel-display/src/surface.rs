//! Display surface trait
//!
//! Defines the drawing interface screens render through. Coordinates are
//! pixels with the origin at the top left; text is positioned by the top of
//! its cell.

use heapless::String;

use crate::text::{self, MAX_LINE};

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with the panel
    Communication,
    /// Panel not initialized
    NotInitialized,
    /// Frame content did not fit the frame buffer
    BufferOverflow,
}

/// Drawing colour
///
/// Monochrome panels treat every colour except `Dark` as lit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    #[default]
    Dark,
    Light,
    Red,
    Green,
    Blue,
    Yellow,
    Orange,
}

impl Color {
    pub fn is_lit(self) -> bool {
        self != Color::Dark
    }
}

/// Display surface trait
///
/// Implementations buffer everything drawn between [`start_frame`] and
/// [`end_frame`] and present it atomically.
///
/// [`start_frame`]: DisplaySurface::start_frame
/// [`end_frame`]: DisplaySurface::end_frame
pub trait DisplaySurface {
    /// Width in pixels
    fn width(&self) -> i32;

    /// Height in pixels
    fn height(&self) -> i32;

    /// Whether the panel is powered
    fn is_on(&self) -> bool;

    fn turn_on(&mut self);

    fn turn_off(&mut self);

    /// Clear the panel immediately
    fn clear(&mut self);

    /// Begin a frame filled with `background`
    fn start_frame(&mut self, background: Color);

    /// Present the frame
    fn end_frame(&mut self) -> Result<(), DisplayError>;

    /// Text scale factor (1 = base font)
    fn set_text_size(&mut self, size: u8);

    /// Panel contrast, 0..=255
    fn set_contrast(&mut self, contrast: u8);

    fn set_color(&mut self, color: Color);

    fn set_cursor(&mut self, x: i32, y: i32);

    /// Current text cursor
    fn cursor(&self) -> (i32, i32);

    /// Draw text at the cursor and advance it
    fn print(&mut self, text: &str);

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32);

    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32);

    /// Draw an XBM bitmap (rows padded to whole bytes, LSB first)
    fn draw_bitmap(&mut self, x: i32, y: i32, bits: &[u8], w: i32, h: i32);

    /// Rendered width of `text` at the current text size
    fn text_width(&self, text: &str) -> i32;

    /// Height of one text line at the current text size
    fn line_height(&self) -> i32;

    /// Print `text` from the cursor, wrapping at word boundaries
    fn print_word_wrap(&mut self, text: &str, max_width: i32) {
        let (x, mut y) = self.cursor();
        let mut rest = text.trim_start_matches(' ');
        while !rest.is_empty() && y < self.height() {
            let (end, next) = text::line_break(rest, max_width, |s| self.text_width(s));
            self.set_cursor(x, y);
            self.print(&rest[..end]);
            y += self.line_height();
            rest = rest[next..].trim_start_matches(' ');
        }
    }

    /// Draw text horizontally centred on `mid_x`
    fn draw_text_centered(&mut self, mid_x: i32, y: i32, text: &str) {
        let w = self.text_width(text);
        self.set_cursor(mid_x - w / 2, y);
        self.print(text);
    }

    /// Draw text ending at `x_anchor`
    fn draw_text_right_align(&mut self, x_anchor: i32, y: i32, text: &str) {
        let w = self.text_width(text);
        self.set_cursor(x_anchor - w, y);
        self.print(text);
    }

    /// Draw text starting at `x_anchor`
    fn draw_text_left_align(&mut self, x_anchor: i32, y: i32, text: &str) {
        self.set_cursor(x_anchor, y);
        self.print(text);
    }

    /// Draw text, cutting it short with an ellipsis if wider than `max_width`
    ///
    /// Proportional fonts get a trailing space after the ellipsis; fixed
    /// width fonts keep it tight.
    fn draw_text_ellipsized(&mut self, x: i32, y: i32, max_width: i32, text: &str) {
        self.set_cursor(x, y);
        if self.text_width(text) <= max_width {
            self.print(text);
            return;
        }

        let ellipsis = if self.text_width("i") != self.text_width("l") {
            "... "
        } else {
            "..."
        };
        let room = max_width - self.text_width(ellipsis);
        let end = text::fit_prefix(text, room, |s| self.text_width(s));

        let mut line: String<MAX_LINE> = String::new();
        text::push_truncated(&mut line, &text[..end]);
        text::push_truncated(&mut line, ellipsis);
        self.print(&line);
    }
}
