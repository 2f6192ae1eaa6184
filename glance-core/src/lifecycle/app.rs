//! App callback interface

use glance_display::Surface;
use glance_protocol::{ActivationMode, AppCapability, ButtonMask, Vibration};
use heapless::Vec;

use crate::error::{LifecycleError, Operation};

/// Vibration requests one callback may queue
pub const MAX_PENDING_VIBRATIONS: usize = 4;

/// Callbacks every app implements
///
/// All callbacks run synchronously on the controller's thread of control
/// and must return promptly: a slow `on_draw` stalls message processing.
pub trait App {
    /// Name sent with every frame and vibration
    fn name(&self) -> &str;

    /// Modes this app declares support for
    fn capability(&self) -> AppCapability;

    /// The host made the app visible in `mode`
    ///
    /// A render always follows, so there is no need to request one here.
    fn on_activate(&mut self, mode: ActivationMode, ctx: &mut AppContext);

    /// The host hid the app; abandon any work started for the display
    fn on_deactivate(&mut self);

    /// One or more buttons were pressed while the app is visible
    fn on_button_press(&mut self, buttons: ButtonMask, ctx: &mut AppContext);

    /// Draw the next frame onto a surface already cleared to background
    fn on_draw(&mut self, surface: &mut Surface);
}

/// Operations an app may call from inside a callback
///
/// Requests are queued and carried out by the controller once the callback
/// returns. Vibrations go out first, then at most one render no matter how
/// often `render` was called.
#[derive(Debug)]
pub struct AppContext {
    mode: Option<ActivationMode>,
    render_requested: bool,
    vibrations: Vec<Vibration, MAX_PENDING_VIBRATIONS>,
}

impl AppContext {
    /// Context for an activation in `mode`, or an inactive one for `None`
    ///
    /// The controller builds these itself; this is for driving app
    /// callbacks directly.
    pub fn new(mode: Option<ActivationMode>) -> Self {
        Self {
            mode,
            render_requested: false,
            vibrations: Vec::new(),
        }
    }

    /// Mode of the current activation, `None` when inactive
    pub fn mode(&self) -> Option<ActivationMode> {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.mode.is_some()
    }

    /// Ask for a new frame
    pub fn render(&mut self) -> Result<(), LifecycleError> {
        if !self.is_running() {
            return Err(LifecycleError::InvalidState(Operation::Render));
        }
        self.render_requested = true;
        Ok(())
    }

    /// Ask the host to vibrate the device
    pub fn request_vibration(
        &mut self,
        on_ms: u16,
        off_ms: u16,
        pulses: u8,
    ) -> Result<(), LifecycleError> {
        if !self.is_running() {
            return Err(LifecycleError::InvalidState(Operation::Vibrate));
        }
        if self
            .vibrations
            .push(Vibration::new(on_ms, off_ms, pulses))
            .is_err()
        {
            log::warn!("Vibration queue full, request dropped");
        }
        Ok(())
    }

    /// Check if a render is queued
    pub fn render_requested(&self) -> bool {
        self.render_requested
    }

    pub(crate) fn into_requests(self) -> (Vec<Vibration, MAX_PENDING_VIBRATIONS>, bool) {
        (self.vibrations, self.render_requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inactive_context_rejects_requests() {
        let mut ctx = AppContext::new(None);
        assert!(!ctx.is_running());
        assert_eq!(
            ctx.render(),
            Err(LifecycleError::InvalidState(Operation::Render))
        );
        assert_eq!(
            ctx.request_vibration(100, 100, 1),
            Err(LifecycleError::InvalidState(Operation::Vibrate))
        );
        assert!(!ctx.render_requested());
    }

    #[test]
    fn test_renders_coalesce() {
        let mut ctx = AppContext::new(Some(ActivationMode::Widget));
        ctx.render().unwrap();
        ctx.render().unwrap();

        let (vibrations, render) = ctx.into_requests();
        assert!(render);
        assert!(vibrations.is_empty());
    }

    #[test]
    fn test_vibration_overflow_is_dropped() {
        let mut ctx = AppContext::new(Some(ActivationMode::App));
        for pulses in 0..(MAX_PENDING_VIBRATIONS as u8 + 2) {
            ctx.request_vibration(50, 50, pulses).unwrap();
        }

        let (vibrations, _) = ctx.into_requests();
        assert_eq!(vibrations.len(), MAX_PENDING_VIBRATIONS);
        assert_eq!(vibrations[0].pulses, 0);
    }
}
