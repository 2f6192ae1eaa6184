use glance_core::Lifecycle;
use glance_display::DisplayGeometry;
use glance_protocol::{
    ActivationMode, AppMessage, Button, ButtonMask, HostMessage, SessionId, Vibration,
};
use glance_runtime::sample::{NextStop, NextStopEvent, PredictionSet};
use glance_runtime::{Actor, Command, Mailbox, MemoryGateway, MAILBOX_DEPTH};
use proptest::prelude::*;

fn actor() -> Actor<NextStop, MemoryGateway> {
    Actor::new(
        Lifecycle::new(
            NextStop::default(),
            MemoryGateway::new(),
            DisplayGeometry::default(),
        )
        .unwrap(),
    )
}

fn mode() -> impl Strategy<Value = ActivationMode> {
    prop_oneof![Just(ActivationMode::Widget), Just(ActivationMode::App)]
}

fn command() -> impl Strategy<Value = Command<NextStopEvent>> {
    prop_oneof![
        (mode(), 0u32..8).prop_map(|(mode, session)| Command::Host(HostMessage::Activate {
            mode,
            session: SessionId(session),
        })),
        Just(Command::Host(HostMessage::Deactivate)),
        Just(Command::Host(HostMessage::ButtonEvent(ButtonMask::single(
            Button::Select
        )))),
        Just(Command::Render),
        (1u16..500, 1u8..4)
            .prop_map(|(on, pulses)| Command::Vibrate(Vibration::new(on, on, pulses))),
        proptest::option::of(0u32..30).prop_map(|minutes| {
            let result = minutes.map(|m| [("N", m)].into_iter().collect::<PredictionSet>());
            Command::App(NextStopEvent::FetchCompleted(result))
        }),
    ]
}

proptest! {
    #[test]
    fn nothing_reaches_the_host_while_inactive(
        commands in proptest::collection::vec(command(), 0..MAILBOX_DEPTH)
    ) {
        let geometry = DisplayGeometry::default();
        let mut stepped = actor();

        for command in commands.iter().cloned() {
            let before = stepped.lifecycle().gateway().transport().sent_frames().len();
            let activates = matches!(command, Command::Host(HostMessage::Activate { .. }));
            let was_running = stepped.lifecycle().is_running();

            prop_assert!(stepped.process(command).is_continue());

            let sent = stepped.lifecycle().gateway().transport().sent_messages();
            if !was_running && !activates {
                prop_assert_eq!(sent.len(), before);
            }

            // Anything new belongs to the current activation
            for message in &sent[before..] {
                let lifecycle = stepped.lifecycle();
                prop_assert!(lifecycle.is_running());
                match message {
                    AppMessage::PushFrame { buffer, session, .. } => {
                        let mode = lifecycle.current_mode().unwrap();
                        prop_assert_eq!(buffer.len(), geometry.buffer_len(mode));
                        prop_assert_eq!(*session, lifecycle.session());
                    }
                    AppMessage::Vibrate { session, .. } => {
                        prop_assert_eq!(*session, lifecycle.session());
                    }
                }
            }
        }

        // The same commands through the mailbox produce the same traffic
        let mailbox = Mailbox::new();
        for command in commands {
            prop_assert!(mailbox.post(command));
        }
        let mut drained = actor();
        prop_assert!(drained.drain(&mailbox).is_continue());
        prop_assert_eq!(
            drained.lifecycle().gateway().transport().sent_frames(),
            stepped.lifecycle().gateway().transport().sent_frames()
        );
    }
}
