//! embedded-graphics adapter
//!
//! Wraps a monochrome `DrawTarget` (an SSD1306/SH1106 buffered driver, an
//! e-ink framebuffer) as a [`DisplaySurface`]. Text uses the built-in mono
//! fonts: 6x10 at size 1, 10x20 from size 2 upwards.

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};

use crate::surface::{Color, DisplayError, DisplaySurface};

/// Panel operations outside of pixel drawing
pub trait Panel {
    /// Push the framebuffer to the panel
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Switch the panel (or its backlight) on or off
    fn set_power(&mut self, on: bool) -> Result<(), DisplayError>;

    fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError>;
}

/// [`DisplaySurface`] over an embedded-graphics target
pub struct GraphicsSurface<D> {
    target: D,
    on: bool,
    color: BinaryColor,
    text_size: u8,
    cursor: Point,
    /// Set when any draw or panel call failed during the current frame
    failed: bool,
}

impl<D> GraphicsSurface<D>
where
    D: DrawTarget<Color = BinaryColor> + OriginDimensions + Panel,
{
    pub fn new(target: D) -> Self {
        Self {
            target,
            on: false,
            color: BinaryColor::On,
            text_size: 1,
            cursor: Point::zero(),
            failed: false,
        }
    }

    pub fn into_inner(self) -> D {
        self.target
    }

    fn font(&self) -> &'static MonoFont<'static> {
        if self.text_size >= 2 {
            &FONT_10X20
        } else {
            &FONT_6X10
        }
    }

    fn fill(color: Color) -> BinaryColor {
        if color.is_lit() {
            BinaryColor::On
        } else {
            BinaryColor::Off
        }
    }

    fn rect(&mut self, x: i32, y: i32, w: i32, h: i32, style: PrimitiveStyle<BinaryColor>) {
        if w <= 0 || h <= 0 {
            return;
        }
        let shape = Rectangle::new(Point::new(x, y), Size::new(w as u32, h as u32));
        if shape.into_styled(style).draw(&mut self.target).is_err() {
            self.failed = true;
        }
    }
}

impl<D> DisplaySurface for GraphicsSurface<D>
where
    D: DrawTarget<Color = BinaryColor> + OriginDimensions + Panel,
{
    fn width(&self) -> i32 {
        self.target.size().width as i32
    }

    fn height(&self) -> i32 {
        self.target.size().height as i32
    }

    fn is_on(&self) -> bool {
        self.on
    }

    fn turn_on(&mut self) {
        if self.target.set_power(true).is_ok() {
            self.on = true;
        }
    }

    fn turn_off(&mut self) {
        if self.target.set_power(false).is_ok() {
            self.on = false;
        }
    }

    fn clear(&mut self) {
        let cleared = self.target.clear(BinaryColor::Off).is_ok();
        if !cleared || self.target.flush().is_err() {
            self.failed = true;
        }
    }

    fn start_frame(&mut self, background: Color) {
        self.failed = self.target.clear(Self::fill(background)).is_err();
    }

    fn end_frame(&mut self) -> Result<(), DisplayError> {
        if core::mem::take(&mut self.failed) {
            return Err(DisplayError::Communication);
        }
        self.target.flush()
    }

    fn set_text_size(&mut self, size: u8) {
        self.text_size = size.max(1);
    }

    fn set_contrast(&mut self, contrast: u8) {
        if self.target.set_contrast(contrast).is_err() {
            self.failed = true;
        }
    }

    fn set_color(&mut self, color: Color) {
        self.color = Self::fill(color);
    }

    fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor = Point::new(x, y);
    }

    fn cursor(&self) -> (i32, i32) {
        (self.cursor.x, self.cursor.y)
    }

    fn print(&mut self, text: &str) {
        let style = MonoTextStyle::new(self.font(), self.color);
        match Text::with_baseline(text, self.cursor, style, Baseline::Top).draw(&mut self.target) {
            Ok(next) => self.cursor = next,
            Err(_) => self.failed = true,
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        let style = PrimitiveStyle::with_fill(self.color);
        self.rect(x, y, w, h, style);
    }

    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        let style = PrimitiveStyle::with_stroke(self.color, 1);
        self.rect(x, y, w, h, style);
    }

    fn draw_bitmap(&mut self, x: i32, y: i32, bits: &[u8], w: i32, h: i32) {
        if w <= 0 || h <= 0 {
            return;
        }
        let stride = (w as usize).div_ceil(8);
        let color = self.color;
        let pixels = (0..h).flat_map(move |row| {
            (0..w).filter_map(move |col| {
                let byte = bits.get(row as usize * stride + col as usize / 8)?;
                let lit = byte & (1 << (col % 8)) != 0;
                lit.then_some(Pixel(Point::new(x + col, y + row), color))
            })
        });
        if self.target.draw_iter(pixels).is_err() {
            self.failed = true;
        }
    }

    fn text_width(&self, text: &str) -> i32 {
        let font = self.font();
        let count = text.chars().count() as i32;
        if count == 0 {
            return 0;
        }
        let advance = (font.character_size.width + font.character_spacing) as i32;
        count * advance - font.character_spacing as i32
    }

    fn line_height(&self) -> i32 {
        self.font().character_size.height as i32
    }
}
