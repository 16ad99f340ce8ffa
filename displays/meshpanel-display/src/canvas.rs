//! Recording surface
//!
//! `TextCanvas` implements [`DisplaySurface`] with a fixed 6x8 cell font and
//! records what each frame drew instead of rasterizing it. Host tests and
//! desktop simulators inspect the last presented frame.

use heapless::{String, Vec};

use crate::surface::{Color, DisplayError, DisplaySurface};

/// Glyph cell width at text size 1
pub const CHAR_WIDTH: i32 = 6;

/// Line height at text size 1
pub const CHAR_HEIGHT: i32 = 8;

/// Most text runs a frame can hold
pub const MAX_RUNS: usize = 48;

/// Most rectangles a frame can hold
pub const MAX_RECTS: usize = 48;

/// Longest recorded text run
pub const RUN_LEN: usize = 96;

/// One `print` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub x: i32,
    pub y: i32,
    pub size: u8,
    pub color: Color,
    pub text: String<RUN_LEN>,
}

/// One filled or outlined rectangle (bitmaps are recorded by their bounds)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectOp {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub filled: bool,
    pub color: Color,
}

#[derive(Debug, Default, Clone)]
struct Frame {
    background: Color,
    runs: Vec<TextRun, MAX_RUNS>,
    rects: Vec<RectOp, MAX_RECTS>,
    overflowed: bool,
}

impl Frame {
    fn reset(&mut self, background: Color) {
        self.background = background;
        self.runs.clear();
        self.rects.clear();
        self.overflowed = false;
    }
}

/// Recording display surface
#[derive(Debug, Clone)]
pub struct TextCanvas {
    width: i32,
    height: i32,
    on: bool,
    contrast: u8,
    color: Color,
    text_size: u8,
    cursor: (i32, i32),
    drawing: Frame,
    shown: Frame,
    frames: u32,
    fail_next_frame: bool,
}

impl TextCanvas {
    /// Create a canvas; it starts powered off
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            on: false,
            contrast: 255,
            color: Color::Light,
            text_size: 1,
            cursor: (0, 0),
            drawing: Frame::default(),
            shown: Frame::default(),
            frames: 0,
            fail_next_frame: false,
        }
    }

    /// Number of frames presented so far
    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn contrast(&self) -> u8 {
        self.contrast
    }

    /// Text runs of the last presented frame
    pub fn runs(&self) -> &[TextRun] {
        &self.shown.runs
    }

    /// Rectangles of the last presented frame
    pub fn rects(&self) -> &[RectOp] {
        &self.shown.rects
    }

    pub fn background(&self) -> Color {
        self.shown.background
    }

    /// Whether any text run of the last frame contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.shown.runs.iter().any(|run| run.text.contains(needle))
    }

    /// First text run of the last frame containing `needle`
    pub fn find(&self, needle: &str) -> Option<&TextRun> {
        self.shown.runs.iter().find(|run| run.text.contains(needle))
    }

    /// Make the next `end_frame` report a transfer failure
    pub fn fail_next_frame(&mut self) {
        self.fail_next_frame = true;
    }

    fn push_rect(&mut self, x: i32, y: i32, w: i32, h: i32, filled: bool) {
        let op = RectOp {
            x,
            y,
            w,
            h,
            filled,
            color: self.color,
        };
        if self.drawing.rects.push(op).is_err() {
            self.drawing.overflowed = true;
        }
    }
}

impl DisplaySurface for TextCanvas {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn is_on(&self) -> bool {
        self.on
    }

    fn turn_on(&mut self) {
        self.on = true;
    }

    fn turn_off(&mut self) {
        self.on = false;
    }

    fn clear(&mut self) {
        self.drawing.reset(Color::Dark);
        self.shown.reset(Color::Dark);
    }

    fn start_frame(&mut self, background: Color) {
        self.drawing.reset(background);
    }

    fn end_frame(&mut self) -> Result<(), DisplayError> {
        if core::mem::take(&mut self.fail_next_frame) {
            return Err(DisplayError::Communication);
        }
        let overflowed = self.drawing.overflowed;
        self.shown = self.drawing.clone();
        self.frames += 1;
        if overflowed {
            Err(DisplayError::BufferOverflow)
        } else {
            Ok(())
        }
    }

    fn set_text_size(&mut self, size: u8) {
        self.text_size = size.max(1);
    }

    fn set_contrast(&mut self, contrast: u8) {
        self.contrast = contrast;
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor = (x, y);
    }

    fn cursor(&self) -> (i32, i32) {
        self.cursor
    }

    fn print(&mut self, text: &str) {
        let mut run = TextRun {
            x: self.cursor.0,
            y: self.cursor.1,
            size: self.text_size,
            color: self.color,
            text: String::new(),
        };
        crate::text::push_truncated(&mut run.text, text);
        self.cursor.0 += self.text_width(text);
        if self.drawing.runs.push(run).is_err() {
            self.drawing.overflowed = true;
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.push_rect(x, y, w, h, true);
    }

    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.push_rect(x, y, w, h, false);
    }

    fn draw_bitmap(&mut self, x: i32, y: i32, _bits: &[u8], w: i32, h: i32) {
        self.push_rect(x, y, w, h, false);
    }

    fn text_width(&self, text: &str) -> i32 {
        text.chars().count() as i32 * CHAR_WIDTH * self.text_size as i32
    }

    fn line_height(&self) -> i32 {
        CHAR_HEIGHT * self.text_size as i32
    }
}
