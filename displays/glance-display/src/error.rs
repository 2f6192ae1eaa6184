//! Display errors

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Width or height is zero, or too small to hold a widget strip
    InvalidDimensions,
    /// Surface would not fit in a single device buffer
    SurfaceTooLarge,
    /// Output buffer cannot hold the encoded surface
    BufferOverflow,
}

impl core::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DisplayError::InvalidDimensions => f.write_str("invalid display dimensions"),
            DisplayError::SurfaceTooLarge => f.write_str("surface exceeds device buffer"),
            DisplayError::BufferOverflow => f.write_str("output buffer overflow"),
        }
    }
}
