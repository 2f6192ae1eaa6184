//! App actor
//!
//! Owns the `Lifecycle` and processes one command at a time to completion.
//! Everything that touches activation state, the surface or the gateway
//! goes through here.

use core::ops::ControlFlow;

use glance_core::{App, AppContext, Gateway, Lifecycle};

use crate::channels::{Command, Mailbox};

/// An app that also reacts to its own internal events
///
/// Events are posted to the mailbox as `Command::App` by whatever work the
/// app started (a network fetch, a refresh timer) and delivered back on the
/// actor's thread.
pub trait EventApp: App {
    type Event;

    fn on_event(&mut self, event: Self::Event, ctx: &mut AppContext);
}

/// Single consumer of a `Mailbox`
#[derive(Debug)]
pub struct Actor<A, G> {
    lifecycle: Lifecycle<A, G>,
}

impl<A: EventApp, G: Gateway> Actor<A, G> {
    pub fn new(lifecycle: Lifecycle<A, G>) -> Self {
        Self { lifecycle }
    }

    /// Carry out one command
    ///
    /// Breaks after `Shutdown`. Lifecycle errors are logged; no caller could
    /// act on them.
    pub fn process(&mut self, command: Command<A::Event>) -> ControlFlow<()> {
        let result = match command {
            Command::Host(message) => self.lifecycle.handle(message),
            Command::Render => self.lifecycle.render(),
            Command::Vibrate(pattern) => {
                self.lifecycle
                    .request_vibration(pattern.on_ms, pattern.off_ms, pattern.pulses)
            }
            Command::App(event) => self
                .lifecycle
                .update_app(|app, ctx| app.on_event(event, ctx)),
            Command::Shutdown => {
                self.lifecycle.deactivate();
                log::info!("Actor for {} shut down", self.lifecycle.app().name());
                return ControlFlow::Break(());
            }
        };

        if let Err(e) = result {
            log::warn!("Command failed: {}", e);
        }
        ControlFlow::Continue(())
    }

    /// Handle every frame waiting on the gateway
    pub fn poll_gateway(&mut self) -> usize {
        self.lifecycle.poll()
    }

    /// Process every queued command without waiting
    pub fn drain(&mut self, mailbox: &Mailbox<A::Event>) -> ControlFlow<()> {
        while let Some(command) = mailbox.try_take() {
            self.process(command)?;
        }
        ControlFlow::Continue(())
    }

    /// Process commands as they arrive until `Shutdown`
    pub async fn run(&mut self, mailbox: &Mailbox<A::Event>) {
        log::info!("Actor for {} started", self.lifecycle.app().name());
        loop {
            let command = mailbox.take().await;
            if self.process(command).is_break() {
                break;
            }
        }
    }

    /// Blocking form of `run` for a dedicated thread
    ///
    /// The thread is parked while the mailbox is empty and woken by the
    /// next `post`.
    pub fn run_blocking(&mut self, mailbox: &Mailbox<A::Event>) {
        futures::executor::block_on(self.run(mailbox));
    }

    pub fn lifecycle(&self) -> &Lifecycle<A, G> {
        &self.lifecycle
    }

    pub fn lifecycle_mut(&mut self) -> &mut Lifecycle<A, G> {
        &mut self.lifecycle
    }

    pub fn into_inner(self) -> Lifecycle<A, G> {
        self.lifecycle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MemoryGateway;
    use glance_display::{DisplayGeometry, Surface};
    use glance_protocol::{ActivationMode, AppCapability, ButtonMask, HostMessage, SessionId};

    #[derive(Default)]
    struct Teardown {
        deactivations: usize,
    }

    impl App for Teardown {
        fn name(&self) -> &str {
            "teardown"
        }

        fn capability(&self) -> AppCapability {
            AppCapability::WidgetAndApp
        }

        fn on_activate(&mut self, _mode: ActivationMode, _ctx: &mut AppContext) {}

        fn on_deactivate(&mut self) {
            self.deactivations += 1;
        }

        fn on_button_press(&mut self, _buttons: ButtonMask, _ctx: &mut AppContext) {}

        fn on_draw(&mut self, _surface: &mut Surface) {}
    }

    impl EventApp for Teardown {
        type Event = ();

        fn on_event(&mut self, _event: (), _ctx: &mut AppContext) {}
    }

    fn actor() -> Actor<Teardown, MemoryGateway> {
        Actor::new(
            Lifecycle::new(
                Teardown::default(),
                MemoryGateway::new(),
                DisplayGeometry::default(),
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_shutdown_while_inactive_still_tears_down() {
        let mut actor = actor();
        assert!(actor.process(Command::Shutdown).is_break());
        assert_eq!(actor.lifecycle().app().deactivations, 1);
    }

    #[test]
    fn test_shutdown_deactivates_running_app() {
        let mut actor = actor();
        let activate = Command::Host(HostMessage::Activate {
            mode: ActivationMode::App,
            session: SessionId(2),
        });
        assert!(actor.process(activate).is_continue());
        assert!(actor.lifecycle().is_running());

        assert!(actor.process(Command::Shutdown).is_break());
        assert!(!actor.lifecycle().is_running());
        assert!(actor.lifecycle().surfaces().current().is_none());
        assert_eq!(actor.lifecycle().app().deactivations, 1);
    }
}
