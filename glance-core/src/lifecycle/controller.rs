//! Lifecycle controller
//!
//! The single owner of activation state, the drawing surface and the
//! message gateway. Every host message and every app request passes
//! through here and runs to completion before the next one starts.

use glance_display::DisplayGeometry;
use glance_protocol::{
    ActivationMode, ButtonMask, HostMessage, SessionId, Vibration, MAX_APP_NAME_LEN,
};

use super::app::{App, AppContext};
use crate::error::{LifecycleError, Operation};
use crate::gateway::{Gateway, MessageGateway, OutboundFrame};
use crate::state::{ActivationState, LifecycleEvent};
use crate::surface::SurfaceManager;

/// Drives one app through activation, input and rendering
#[derive(Debug)]
pub struct Lifecycle<A, G> {
    app: A,
    state: ActivationState,
    session: SessionId,
    surfaces: SurfaceManager,
    gateway: MessageGateway<G>,
}

impl<A: App, G: Gateway> Lifecycle<A, G> {
    /// Fails if the app's name is too long to put on the wire
    pub fn new(app: A, transport: G, geometry: DisplayGeometry) -> Result<Self, LifecycleError> {
        let name_len = app.name().len();
        if name_len > MAX_APP_NAME_LEN {
            return Err(LifecycleError::NameTooLong(name_len));
        }

        Ok(Self {
            app,
            state: ActivationState::Inactive,
            session: SessionId::default(),
            surfaces: SurfaceManager::new(geometry),
            gateway: MessageGateway::new(transport),
        })
    }

    /// Show the app in `mode`
    ///
    /// Accepted from any state. The app's `on_activate` runs and a frame is
    /// rendered even when the app was already active in the same mode.
    pub fn activate(
        &mut self,
        mode: ActivationMode,
        session: SessionId,
    ) -> Result<(), LifecycleError> {
        let next = self.state.transition(LifecycleEvent::Activate(mode));

        if !self.app.capability().supports(mode) {
            log::warn!(
                "{} declares {:?} but was activated as {}",
                self.app.name(),
                self.app.capability(),
                mode.name()
            );
        }

        if self.state.invalidates_surface(next) {
            self.surfaces.release();
        }

        log::debug!("{:?} -> {:?} for {}", self.state, next, session);
        self.state = next;
        self.session = session;

        let mut ctx = AppContext::new(Some(mode));
        self.app.on_activate(mode, &mut ctx);
        self.apply(ctx, true)
    }

    /// Hide the app
    ///
    /// Always lands in `Inactive` and always notifies the app, even if it
    /// was not active.
    pub fn deactivate(&mut self) {
        let next = self.state.transition(LifecycleEvent::Deactivate);
        log::debug!("{:?} -> {:?}", self.state, next);

        self.state = next;
        self.surfaces.release();
        self.app.on_deactivate();
    }

    /// Forward a button press to the app
    ///
    /// Ignored while inactive. Never renders unless the app asks for it.
    pub fn dispatch_button_event(&mut self, buttons: ButtonMask) -> Result<(), LifecycleError> {
        if !self.is_running() {
            log::debug!("Ignoring buttons 0x{:02x} while inactive", buttons.bits());
            return Ok(());
        }

        let mut ctx = self.context();
        self.app.on_button_press(buttons, &mut ctx);
        self.apply(ctx, false)
    }

    /// Draw and push a frame
    ///
    /// The surface is cleared to background before the app draws, so no
    /// content carries over from an earlier frame.
    pub fn render(&mut self) -> Result<(), LifecycleError> {
        let mode = self
            .state
            .mode()
            .ok_or(LifecycleError::InvalidState(Operation::Render))?;

        let surface = self.surfaces.ensure(mode)?;
        surface.clear_background();
        self.app.on_draw(surface);

        self.gateway.send_frame(&OutboundFrame {
            surface,
            app_name: self.app.name(),
            session: self.session,
        });
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
        self.vibrate(&Vibration::new(on_ms, off_ms, pulses));
        Ok(())
    }

    /// Apply one host message
    pub fn handle(&mut self, message: HostMessage) -> Result<(), LifecycleError> {
        match message {
            HostMessage::Activate { mode, session } => self.activate(mode, session),
            HostMessage::Deactivate => {
                self.deactivate();
                Ok(())
            }
            HostMessage::ButtonEvent(buttons) => self.dispatch_button_event(buttons),
        }
    }

    /// Handle every message the gateway has pending
    ///
    /// Returns the number of messages handled. Errors are logged, never
    /// returned, since they cannot be answered on a fire-and-forget link.
    pub fn poll(&mut self) -> usize {
        let mut handled = 0;
        while let Some(message) = self.gateway.receive() {
            if let Err(e) = self.handle(message) {
                log::warn!("Host message {:?} failed: {}", message, e);
            }
            handled += 1;
        }
        handled
    }

    /// Run `f` against the app outside a callback, then carry out whatever
    /// it queued on the context
    pub fn update_app<R>(
        &mut self,
        f: impl FnOnce(&mut A, &mut AppContext) -> R,
    ) -> Result<R, LifecycleError> {
        let mut ctx = self.context();
        let result = f(&mut self.app, &mut ctx);
        self.apply(ctx, false)?;
        Ok(result)
    }

    pub fn current_mode(&self) -> Option<ActivationMode> {
        self.state.mode()
    }

    pub fn state(&self) -> ActivationState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_active()
    }

    /// Session of the most recent activation
    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn app(&self) -> &A {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut A {
        &mut self.app
    }

    pub fn gateway(&self) -> &MessageGateway<G> {
        &self.gateway
    }

    pub fn gateway_mut(&mut self) -> &mut MessageGateway<G> {
        &mut self.gateway
    }

    pub fn surfaces(&self) -> &SurfaceManager {
        &self.surfaces
    }

    fn context(&self) -> AppContext {
        AppContext::new(self.state.mode())
    }

    fn vibrate(&mut self, pattern: &Vibration) {
        self.gateway
            .send_vibration(pattern, self.app.name(), self.session);
    }

    fn apply(&mut self, ctx: AppContext, force_render: bool) -> Result<(), LifecycleError> {
        let (vibrations, render_requested) = ctx.into_requests();
        for pattern in &vibrations {
            self.vibrate(pattern);
        }
        if force_render || render_requested {
            self.render()?;
        }
        Ok(())
    }
}
