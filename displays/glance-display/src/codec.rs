//! Device buffer codec
//!
//! The watch expects frames row-major, each row padded to whole bytes, with
//! the least significant bit of every byte holding the leftmost pixel and a
//! set bit meaning ink.

use embedded_graphics::geometry::Point;
use embedded_graphics::pixelcolor::BinaryColor;
use glance_protocol::MAX_BUFFER_SIZE;
use heapless::Vec;

use crate::error::DisplayError;
use crate::geometry::row_stride;
use crate::surface::Surface;

/// Encoded device buffer
pub type DeviceBuffer = Vec<u8, MAX_BUFFER_SIZE>;

/// Flatten a surface into the device buffer format
///
/// `out` is cleared first. Fails only if the surface does not fit.
pub fn encode(surface: &Surface, out: &mut DeviceBuffer) -> Result<(), DisplayError> {
    out.clear();
    for row in surface.rows() {
        for &byte in row {
            // Surface rows are MSB-first, the device wants LSB-first
            out.push(byte.reverse_bits())
                .map_err(|_| DisplayError::BufferOverflow)?;
        }
    }
    Ok(())
}

/// Read back one pixel from an encoded buffer of the given width
///
/// Returns `None` when the point falls outside the buffer.
pub fn decode_pixel(buffer: &[u8], width: u32, point: Point) -> Option<BinaryColor> {
    if point.x < 0 || point.y < 0 || point.x as u32 >= width {
        return None;
    }
    let x = point.x as usize;
    let index = point.y as usize * row_stride(width) + x / 8;
    let byte = buffer.get(index)?;
    Some(BinaryColor::from(byte & (1 << (x % 8)) != 0))
}
