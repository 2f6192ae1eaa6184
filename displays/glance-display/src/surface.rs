//! Raster drawing surface
//!
//! A 1-bit framebuffer that apps draw into with `embedded-graphics`.
//! Pixels are packed eight to a byte, most significant bit leftmost, each
//! row padded to a whole byte.

use core::convert::Infallible;

use embedded_graphics::geometry::{Dimensions, OriginDimensions, Point, Size};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::{draw_target::DrawTarget, Pixel};
use glance_protocol::MAX_BUFFER_SIZE;
use heapless::Vec;

use crate::error::DisplayError;
use crate::geometry::row_stride;

/// Largest surface, in packed bytes, that still fits one device buffer
pub const MAX_SURFACE_BYTES: usize = MAX_BUFFER_SIZE;

/// Color every pixel holds after a clear
pub const BACKGROUND: BinaryColor = BinaryColor::Off;

/// Monochrome drawing surface
///
/// `BinaryColor::Off` is the unlit background, `BinaryColor::On` is ink.
#[derive(Clone, PartialEq, Eq)]
pub struct Surface {
    size: Size,
    stride: usize,
    pixels: Vec<u8, MAX_SURFACE_BYTES>,
}

impl Surface {
    /// Allocate a surface filled with background
    pub fn new(size: Size) -> Result<Self, DisplayError> {
        if size.width == 0 || size.height == 0 {
            return Err(DisplayError::InvalidDimensions);
        }
        let stride = row_stride(size.width);
        let len = stride
            .checked_mul(size.height as usize)
            .ok_or(DisplayError::SurfaceTooLarge)?;

        let mut pixels = Vec::new();
        pixels
            .resize(len, 0)
            .map_err(|_| DisplayError::SurfaceTooLarge)?;

        Ok(Self {
            size,
            stride,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// Bytes per packed row
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Reset every pixel to background
    pub fn clear_background(&mut self) {
        self.fill_with(BACKGROUND);
    }

    fn fill_with(&mut self, color: BinaryColor) {
        if color.is_off() {
            self.pixels.fill(0x00);
            return;
        }
        self.pixels.fill(0xFF);
        // Keep row padding unlit
        let tail = self.size.width % 8;
        if tail != 0 {
            let mask = 0xFFu8 << (8 - tail);
            for row in self.pixels.chunks_mut(self.stride) {
                if let Some(last) = row.last_mut() {
                    *last &= mask;
                }
            }
        }
    }

    /// Read a pixel, `None` when outside the surface
    pub fn pixel(&self, point: Point) -> Option<BinaryColor> {
        let (index, mask) = self.locate(point)?;
        Some(BinaryColor::from(self.pixels[index] & mask != 0))
    }

    /// Write a pixel; points outside the surface are clipped
    pub fn set_pixel(&mut self, point: Point, color: BinaryColor) {
        if let Some((index, mask)) = self.locate(point) {
            match color {
                BinaryColor::On => self.pixels[index] |= mask,
                BinaryColor::Off => self.pixels[index] &= !mask,
            }
        }
    }

    /// Number of inked pixels
    pub fn ink_count(&self) -> usize {
        self.pixels.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// True when nothing has been drawn since the last clear
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|&b| b == 0)
    }

    /// Packed rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.pixels.chunks(self.stride)
    }

    /// Byte index and bit mask for a point
    fn locate(&self, point: Point) -> Option<(usize, u8)> {
        if point.x < 0 || point.y < 0 {
            return None;
        }
        let (x, y) = (point.x as u32, point.y as u32);
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let index = y as usize * self.stride + (x / 8) as usize;
        Some((index, 0x80 >> (x % 8)))
    }
}

impl core::fmt::Debug for Surface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.size.width)
            .field("height", &self.size.height)
            .field("ink", &self.ink_count())
            .finish()
    }
}

impl OriginDimensions for Surface {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for Surface {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point, color);
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        if let Some(bottom_right) = area.bottom_right() {
            for y in area.top_left.y..=bottom_right.y {
                for x in area.top_left.x..=bottom_right.x {
                    self.set_pixel(Point::new(x, y), color);
                }
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_with(color);
        Ok(())
    }
}
