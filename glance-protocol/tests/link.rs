use glance_protocol::{
    ActivationMode, Button, ButtonMask, Frame, FrameParser, HostMessage, SessionId, FRAME_START,
};
use proptest::prelude::*;

fn host_message() -> impl Strategy<Value = HostMessage> {
    prop_oneof![
        (any::<bool>(), any::<u32>()).prop_map(|(widget, session)| HostMessage::Activate {
            mode: if widget {
                ActivationMode::Widget
            } else {
                ActivationMode::App
            },
            session: SessionId(session),
        }),
        Just(HostMessage::Deactivate),
        (1u8..8).prop_map(|bits| HostMessage::ButtonEvent(
            ButtonMask::from_bits(bits).unwrap_or_default()
        )),
    ]
}

/// Feed a whole byte stream, collecting every frame that parses
fn parse_stream(bytes: &[u8]) -> Vec<Frame> {
    let mut parser = FrameParser::new();
    let mut frames = Vec::new();
    for &byte in bytes {
        if let Ok(Some(frame)) = parser.feed(byte) {
            frames.push(frame);
        }
    }
    frames
}

proptest! {
    #[test]
    fn parser_never_panics_on_noise(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        let _ = parse_stream(&bytes);
    }

    #[test]
    fn host_messages_survive_the_link(messages in proptest::collection::vec(host_message(), 1..8)) {
        let mut stream = Vec::new();
        for message in &messages {
            let frame = message.to_frame().unwrap();
            stream.extend_from_slice(&frame.encode_to_vec().unwrap());
        }

        let decoded: Vec<HostMessage> = parse_stream(&stream)
            .iter()
            .map(|frame| HostMessage::from_frame(frame).unwrap())
            .collect();
        prop_assert_eq!(decoded, messages);
    }

    #[test]
    fn parser_skips_leading_noise(
        garbage in proptest::collection::vec(
            any::<u8>().prop_filter("start byte", |b| *b != FRAME_START),
            0..64,
        )
    ) {
        let message = HostMessage::ButtonEvent(Button::Select.into());
        let encoded = message.to_frame().unwrap().encode_to_vec().unwrap();

        let mut stream = garbage.clone();
        stream.extend_from_slice(&encoded);
        let frames = parse_stream(&stream);
        prop_assert_eq!(frames.len(), 1);
        prop_assert_eq!(HostMessage::from_frame(&frames[0]).unwrap(), message);
    }
}
