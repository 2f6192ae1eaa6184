//! Surface ownership
//!
//! The surface is created lazily at the size the current mode needs, kept
//! across renders in that mode, and dropped whenever the mode changes or
//! the app is deactivated.

use glance_display::embedded_graphics::geometry::OriginDimensions;
use glance_display::{DisplayError, DisplayGeometry, Surface};
use glance_protocol::ActivationMode;

/// Owns the app's drawing surface
#[derive(Debug)]
pub struct SurfaceManager {
    geometry: DisplayGeometry,
    surface: Option<Surface>,
    allocations: u32,
}

impl SurfaceManager {
    pub fn new(geometry: DisplayGeometry) -> Self {
        Self {
            geometry,
            surface: None,
            allocations: 0,
        }
    }

    pub fn geometry(&self) -> DisplayGeometry {
        self.geometry
    }

    /// Surface sized for `mode`
    ///
    /// Returns the cached surface if it already has the right size,
    /// otherwise allocates a fresh one. Contents are not cleared here.
    pub fn ensure(&mut self, mode: ActivationMode) -> Result<&mut Surface, DisplayError> {
        let required = self.geometry.surface_size(mode);
        let surface = match self.surface.take() {
            Some(surface) if surface.size() == required => surface,
            _ => {
                self.allocations += 1;
                Surface::new(required)?
            }
        };
        Ok(self.surface.insert(surface))
    }

    /// Drop the surface; safe to call when none is held
    pub fn release(&mut self) {
        self.surface = None;
    }

    /// Surface currently held, if any
    pub fn current(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    /// Number of fresh surfaces allocated so far
    pub fn allocations(&self) -> u32 {
        self.allocations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glance_display::embedded_graphics::{
        geometry::{Point, Size},
        pixelcolor::BinaryColor,
    };

    #[test]
    fn test_lazy_allocation() {
        let mut manager = SurfaceManager::new(DisplayGeometry::default());
        assert!(manager.current().is_none());
        assert_eq!(manager.allocations(), 0);

        let surface = manager.ensure(ActivationMode::Widget).unwrap();
        assert_eq!(surface.size(), Size::new(96, 32));
        assert_eq!(manager.allocations(), 1);
    }

    #[test]
    fn test_same_mode_reuses_surface() {
        let mut manager = SurfaceManager::new(DisplayGeometry::default());
        manager
            .ensure(ActivationMode::App)
            .unwrap()
            .set_pixel(Point::new(1, 1), BinaryColor::On);

        let surface = manager.ensure(ActivationMode::App).unwrap();
        assert_eq!(surface.pixel(Point::new(1, 1)), Some(BinaryColor::On));
        assert_eq!(manager.allocations(), 1);
    }

    #[test]
    fn test_mode_change_reallocates() {
        let mut manager = SurfaceManager::new(DisplayGeometry::default());
        manager.ensure(ActivationMode::App).unwrap();
        let surface = manager.ensure(ActivationMode::Widget).unwrap();
        assert_eq!(surface.size(), Size::new(96, 32));
        assert_eq!(manager.allocations(), 2);
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut manager = SurfaceManager::new(DisplayGeometry::default());
        manager.ensure(ActivationMode::App).unwrap();
        manager.release();
        manager.release();
        assert!(manager.current().is_none());

        let surface = manager.ensure(ActivationMode::App).unwrap();
        assert!(surface.is_blank());
        assert_eq!(manager.allocations(), 2);
    }
}
