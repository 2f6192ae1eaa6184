//! Display geometry and per-mode surface sizes

use embedded_graphics::geometry::Size;
use glance_protocol::ActivationMode;

use crate::error::DisplayError;
use crate::surface::MAX_SURFACE_BYTES;

/// Native panel width of the reference watch
pub const DEFAULT_WIDTH: u16 = 96;

/// Native panel height of the reference watch
pub const DEFAULT_HEIGHT: u16 = 96;

/// Widgets get this fraction (1/N) of the display height
pub const WIDGET_HEIGHT_DIVISOR: u16 = 3;

/// Physical display dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayGeometry {
    width: u16,
    height: u16,
}

impl Default for DisplayGeometry {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl DisplayGeometry {
    /// Validate and build a geometry
    ///
    /// The full-screen surface must fit in one device buffer, and the
    /// display must be tall enough for a non-empty widget strip.
    pub fn new(width: u16, height: u16) -> Result<Self, DisplayError> {
        if width == 0 || height < WIDGET_HEIGHT_DIVISOR {
            return Err(DisplayError::InvalidDimensions);
        }
        let geometry = Self { width, height };
        if geometry.buffer_len(ActivationMode::App) > MAX_SURFACE_BYTES {
            return Err(DisplayError::SurfaceTooLarge);
        }
        Ok(geometry)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Surface size for a mode
    ///
    /// App mode gets the full display; widget mode gets a third of the
    /// height, rounded down.
    pub fn surface_size(&self, mode: ActivationMode) -> Size {
        let height = match mode {
            ActivationMode::App => self.height,
            ActivationMode::Widget => self.height / WIDGET_HEIGHT_DIVISOR,
        };
        Size::new(u32::from(self.width), u32::from(height))
    }

    /// Encoded buffer length for a mode, in bytes
    pub fn buffer_len(&self, mode: ActivationMode) -> usize {
        let size = self.surface_size(mode);
        row_stride(size.width) * size.height as usize
    }
}

/// Bytes per packed 1-bit row
pub const fn row_stride(width: u32) -> usize {
    (width as usize).div_ceil(8)
}
