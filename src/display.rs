//! # Display Service
//!
//! The game talks to the panel only through the [`Display`] trait. Device
//! coordinates follow the panel: origin at the bottom-left corner, `row`
//! growing upward, 160 × 160 pixels.
//!
//! [`GraphicsDisplay`] implements the trait on top of any
//! `embedded-graphics` monochrome draw target, and [`Framebuffer`] is a
//! 1-bpp RAM target the panel driver can flush from.

use core::convert::Infallible;

use embedded_graphics::{
    image::{Image, ImageRaw},
    mono_font::{ascii::FONT_10X20, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};

use crate::snake;

/// Panel width in pixels.
pub const HD_X_MAX: u32 = 160;
/// Panel height in pixels.
pub const HD_Y_MAX: u32 = 160;

/// Pixels between two grid cells.
pub const CELL_PITCH: i16 = 6;
/// Device column of grid column 0 (cell center).
pub const COL_ORIGIN: i16 = 10;
/// Device row of grid row 0 (cell center).
pub const ROW_ORIGIN: i16 = 13;
/// Side of a drawn segment, centered on the cell.
pub const SEGMENT_SIZE: u32 = 5;

/// How a point is drawn.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pen {
    /// A live body segment.
    Segment,
    /// Background fill.
    Erase,
}

/// Pre-rendered artwork.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageId {
    /// Snake picture on the title screen.
    Logo,
    /// "SNAKE" banner.
    Title,
}

/// Drawing services consumed by the game.
pub trait Display {
    type Error;

    fn clear(&mut self) -> Result<(), Self::Error>;

    fn set_backlight(&mut self, on: bool) -> Result<(), Self::Error>;

    /// Draw a segment-sized square centered on (`col`, `row`).
    fn draw_point(&mut self, col: i16, row: i16, pen: Pen) -> Result<(), Self::Error>;

    /// Blit `image` with its bottom-left corner at (`x`, `y`).
    fn draw_image(&mut self, image: ImageId, x: i16, y: i16) -> Result<(), Self::Error>;

    fn erase_point(&mut self, col: i16, row: i16) -> Result<(), Self::Error> {
        self.draw_point(col, row, Pen::Erase)
    }
}

/// Grid cell to device (`col`, `row`).
#[inline]
pub const fn to_device(p: snake::Point) -> (i16, i16) {
    (
        p.x as i16 * CELL_PITCH + COL_ORIGIN,
        p.y as i16 * CELL_PITCH + ROW_ORIGIN,
    )
}

// ---------------------------------------------------------------------------
// Artwork
// ---------------------------------------------------------------------------

const LOGO_WIDTH: u32 = 24;
const LOGO_HEIGHT: u32 = 8;

#[rustfmt::skip]
const LOGO: [u8; 24] = [
    0b00000000, 0b00000000, 0b00000000,
    0b00111100, 0b00000000, 0b00001110,
    0b01000010, 0b00111100, 0b00010101,
    0b01000010, 0b01000010, 0b00011111,
    0b00000010, 0b01000010, 0b00100000,
    0b00000100, 0b10000001, 0b01000000,
    0b00111000, 0b00000000, 0b10000000,
    0b00000000, 0b00000000, 0b00000000,
];

const TITLE_TEXT: &str = "SNAKE";
const TITLE_HEIGHT: u32 = 20;

// ---------------------------------------------------------------------------
// embedded-graphics adapter
// ---------------------------------------------------------------------------

/// [`Display`] over a monochrome `embedded-graphics` draw target.
///
/// The backlight is owned by the board; the adapter only records the
/// requested state for it.
pub struct GraphicsDisplay<T> {
    target: T,
    backlight: bool,
}

impl<T> GraphicsDisplay<T>
where
    T: DrawTarget<Color = BinaryColor> + OriginDimensions,
{
    pub fn new(target: T) -> Self {
        Self {
            target,
            backlight: false,
        }
    }

    pub fn backlight(&self) -> bool {
        self.backlight
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// Device point to draw-target point (flip the vertical axis).
    fn screen(&self, col: i16, row: i16) -> Point {
        let height = self.target.size().height as i32;
        Point::new(col as i32, height - 1 - row as i32)
    }
}

impl<T> Display for GraphicsDisplay<T>
where
    T: DrawTarget<Color = BinaryColor> + OriginDimensions,
{
    type Error = T::Error;

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.target.clear(BinaryColor::Off)
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), Self::Error> {
        self.backlight = on;
        Ok(())
    }

    fn draw_point(&mut self, col: i16, row: i16, pen: Pen) -> Result<(), Self::Error> {
        let color = match pen {
            Pen::Segment => BinaryColor::On,
            Pen::Erase => BinaryColor::Off,
        };
        let half = (SEGMENT_SIZE / 2) as i32;
        let center = self.screen(col, row);
        Rectangle::new(
            center - Point::new(half, half),
            Size::new(SEGMENT_SIZE, SEGMENT_SIZE),
        )
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(&mut self.target)
    }

    fn draw_image(&mut self, image: ImageId, x: i16, y: i16) -> Result<(), Self::Error> {
        match image {
            ImageId::Logo => {
                let top_left = self.screen(x, y + LOGO_HEIGHT as i16 - 1);
                let raw: ImageRaw<BinaryColor> = ImageRaw::new(&LOGO, LOGO_WIDTH);
                Image::new(&raw, top_left).draw(&mut self.target)
            }
            ImageId::Title => {
                let top_left = self.screen(x, y + TITLE_HEIGHT as i16 - 1);
                let style = MonoTextStyle::new(&FONT_10X20, BinaryColor::On);
                Text::with_baseline(TITLE_TEXT, top_left, style, Baseline::Top)
                    .draw(&mut self.target)
                    .map(|_| ())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// RAM framebuffer
// ---------------------------------------------------------------------------

const FB_STRIDE: usize = (HD_X_MAX as usize + 7) / 8;
const FB_SIZE: usize = FB_STRIDE * HD_Y_MAX as usize;

/// 1-bpp framebuffer, rows top to bottom, MSB first.
pub struct Framebuffer {
    bits: [u8; FB_SIZE],
}

impl Framebuffer {
    pub const fn new() -> Self {
        Self { bits: [0; FB_SIZE] }
    }

    /// Whether the pixel at draw-target (`x`, `y`) is set. Out of range reads
    /// as unset.
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        match Self::index(x, y) {
            Some((byte, mask)) => self.bits[byte] & mask != 0,
            None => false,
        }
    }

    /// Raw rows for the panel driver.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    fn index(x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x >= HD_X_MAX as i32 || y >= HD_Y_MAX as i32 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        Some((y * FB_STRIDE + x / 8, 0x80 >> (x % 8)))
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if let Some((byte, mask)) = Self::index(coord.x, coord.y) {
                match color {
                    BinaryColor::On => self.bits[byte] |= mask,
                    BinaryColor::Off => self.bits[byte] &= !mask,
                }
            }
        }
        Ok(())
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(HD_X_MAX, HD_Y_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{X_MAX, Y_MAX};

    fn lit_pixels(fb: &Framebuffer) -> usize {
        fb.as_bytes().iter().map(|b| b.count_ones() as usize).sum()
    }

    #[test]
    fn test_grid_mapping() {
        assert_eq!(to_device(snake::Point::new(0, 0)), (10, 13));
        assert_eq!(to_device(snake::Point::new(9, 0)), (64, 13));

        // Whole grid stays on the panel, with room for the segment square
        let (col, row) = to_device(snake::Point::new(X_MAX - 1, Y_MAX - 1));
        assert!(col + 2 < HD_X_MAX as i16);
        assert!(row + 2 < HD_Y_MAX as i16);
    }

    #[test]
    fn test_draw_point_fills_segment_square() {
        let mut display = GraphicsDisplay::new(Framebuffer::new());
        display.draw_point(10, 13, Pen::Segment).unwrap();

        assert_eq!(lit_pixels(display.target()), 25);
        // Device row 13 is draw-target row 146 on a 160-row panel
        assert!(display.target().pixel(10, 146));
        assert!(display.target().pixel(8, 144));
        assert!(display.target().pixel(12, 148));
        assert!(!display.target().pixel(13, 146));
    }

    #[test]
    fn test_erase_point_clears_square() {
        let mut display = GraphicsDisplay::new(Framebuffer::new());
        display.draw_point(40, 40, Pen::Segment).unwrap();
        display.draw_point(46, 40, Pen::Segment).unwrap();
        display.erase_point(40, 40).unwrap();

        assert_eq!(lit_pixels(display.target()), 25);
        assert!(display.target().pixel(46, 119));
    }

    #[test]
    fn test_images_and_clear() {
        let mut display = GraphicsDisplay::new(Framebuffer::new());
        display.set_backlight(true).unwrap();
        display.draw_image(ImageId::Logo, 49, 60).unwrap();
        display.draw_image(ImageId::Title, 24, 20).unwrap();

        assert!(display.backlight());
        assert!(lit_pixels(display.target()) > 0);

        display.clear().unwrap();
        assert_eq!(lit_pixels(display.target()), 0);
    }

    #[test]
    fn test_framebuffer_ignores_out_of_range() {
        let mut fb = Framebuffer::new();
        Pixel(Point::new(-1, 5), BinaryColor::On).draw(&mut fb).unwrap();
        Pixel(Point::new(160, 5), BinaryColor::On).draw(&mut fb).unwrap();
        assert_eq!(lit_pixels(&fb), 0);
        assert!(!fb.pixel(500, 500));
    }
}
