//! Message gateway
//!
//! Sits between the lifecycle controller and a byte-level transport. Every
//! outbound message is fire-and-forget: failures are logged and counted,
//! never retried and never reported back to the controller. Inbound frames
//! that do not decode are dropped the same way.

use glance_display::{codec, DeviceBuffer, Surface};
use glance_protocol::{AppMessage, Frame, FrameError, HostMessage, SessionId, Vibration};

/// Errors reported by a transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// The other end went away
    Closed,
    /// Underlying read or write failed
    Io,
    /// Outgoing queue is full
    Busy,
    /// Bytes on the link did not form a valid frame
    Framing(FrameError),
}

impl From<FrameError> for TransportError {
    fn from(e: FrameError) -> Self {
        TransportError::Framing(e)
    }
}

impl core::fmt::Display for TransportError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TransportError::Closed => f.write_str("link closed"),
            TransportError::Io => f.write_str("link i/o error"),
            TransportError::Busy => f.write_str("link busy"),
            TransportError::Framing(e) => write!(f, "framing error: {e}"),
        }
    }
}

/// Frame transport between host and app
///
/// Implementations decide how frames travel (a serial stream, an in-memory
/// queue, an IPC pipe). Neither direction blocks on the other side.
pub trait Gateway {
    /// Send one frame
    fn send(&mut self, frame: &Frame) -> Result<(), TransportError>;

    /// Next complete frame from the host
    ///
    /// Returns `Ok(None)` when nothing is pending.
    fn receive(&mut self) -> Result<Option<Frame>, TransportError>;
}

impl<G: Gateway + ?Sized> Gateway for &mut G {
    fn send(&mut self, frame: &Frame) -> Result<(), TransportError> {
        (**self).send(frame)
    }

    fn receive(&mut self) -> Result<Option<Frame>, TransportError> {
        (**self).receive()
    }
}

/// A finished render pass on its way to the host
#[derive(Debug, Clone, Copy)]
pub struct OutboundFrame<'a> {
    pub surface: &'a Surface,
    pub app_name: &'a str,
    pub session: SessionId,
}

/// Gateway traffic counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GatewayStats {
    pub frames_sent: u32,
    pub vibrations_sent: u32,
    pub send_failures: u32,
    pub dropped_inbound: u32,
}

/// Translates controller actions to protocol frames and back
#[derive(Debug)]
pub struct MessageGateway<G> {
    transport: G,
    buffer: DeviceBuffer,
    stats: GatewayStats,
}

impl<G: Gateway> MessageGateway<G> {
    pub fn new(transport: G) -> Self {
        Self {
            transport,
            buffer: DeviceBuffer::new(),
            stats: GatewayStats::default(),
        }
    }

    /// Encode a rendered surface and push it to the host
    pub fn send_frame(&mut self, frame: &OutboundFrame<'_>) {
        if let Err(e) = codec::encode(frame.surface, &mut self.buffer) {
            log::warn!("Frame for {} dropped: {}", frame.session, e);
            self.stats.send_failures += 1;
            return;
        }

        let message = AppMessage::PushFrame {
            buffer: &self.buffer,
            app_name: frame.app_name,
            session: frame.session,
        };
        if Self::transmit(&mut self.transport, &mut self.stats, &message) {
            self.stats.frames_sent += 1;
            log::trace!(
                "Pushed {}x{} frame for {}",
                frame.surface.width(),
                frame.surface.height(),
                frame.session
            );
        }
    }

    /// Ask the host to vibrate the device
    pub fn send_vibration(&mut self, pattern: &Vibration, app_name: &str, session: SessionId) {
        let message = AppMessage::Vibrate {
            pattern: *pattern,
            app_name,
            session,
        };
        if Self::transmit(&mut self.transport, &mut self.stats, &message) {
            self.stats.vibrations_sent += 1;
        }
    }

    /// Next decodable message from the host
    ///
    /// Frames that fail to decode are skipped. Returns `None` once the
    /// transport has nothing pending or reports an error.
    pub fn receive(&mut self) -> Option<HostMessage> {
        loop {
            match self.transport.receive() {
                Ok(Some(frame)) => match HostMessage::from_frame(&frame) {
                    Ok(message) => return Some(message),
                    Err(e) => {
                        log::warn!("Dropping host frame 0x{:02x}: {}", frame.msg_type, e);
                        self.stats.dropped_inbound += 1;
                    }
                },
                Ok(None) => return None,
                Err(e) => {
                    log::warn!("Receive failed: {}", e);
                    return None;
                }
            }
        }
    }

    pub fn stats(&self) -> GatewayStats {
        self.stats
    }

    pub fn transport(&self) -> &G {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut G {
        &mut self.transport
    }

    pub fn into_inner(self) -> G {
        self.transport
    }

    fn transmit(transport: &mut G, stats: &mut GatewayStats, message: &AppMessage<'_>) -> bool {
        let result = message
            .to_frame()
            .map_err(TransportError::from)
            .and_then(|frame| transport.send(&frame));

        match result {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Send to host failed for {}: {}", message.session(), e);
                stats.send_failures += 1;
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glance_display::embedded_graphics::{
        geometry::{Point, Size},
        pixelcolor::BinaryColor,
    };
    use glance_protocol::messages::MSG_BUTTON;
    use glance_protocol::{ButtonMask, FrameParser};
    use heapless::{Deque, Vec};

    #[derive(Default)]
    struct Loopback {
        sent: Vec<Frame, 4>,
        inbound: Deque<Frame, 4>,
        fail_sends: bool,
    }

    impl Gateway for Loopback {
        fn send(&mut self, frame: &Frame) -> Result<(), TransportError> {
            if self.fail_sends {
                return Err(TransportError::Closed);
            }
            self.sent.push(frame.clone()).map_err(|_| TransportError::Busy)
        }

        fn receive(&mut self) -> Result<Option<Frame>, TransportError> {
            Ok(self.inbound.pop_front())
        }
    }

    #[test]
    fn test_send_frame_encodes_surface() {
        let mut surface = Surface::new(Size::new(16, 2)).unwrap();
        surface.set_pixel(Point::new(0, 0), BinaryColor::On);

        let mut gateway = MessageGateway::new(Loopback::default());
        gateway.send_frame(&OutboundFrame {
            surface: &surface,
            app_name: "clock",
            session: SessionId(9),
        });

        let sent = &gateway.transport().sent;
        assert_eq!(sent.len(), 1);
        match AppMessage::from_frame(&sent[0]).unwrap() {
            AppMessage::PushFrame {
                buffer,
                app_name,
                session,
            } => {
                assert_eq!(app_name, "clock");
                assert_eq!(session, SessionId(9));
                assert_eq!(buffer, &[0x01, 0x00, 0x00, 0x00]);
            }
            other => panic!("unexpected message {other:?}"),
        }
        assert_eq!(gateway.stats().frames_sent, 1);
    }

    #[test]
    fn test_send_vibration() {
        let mut gateway = MessageGateway::new(Loopback::default());
        gateway.send_vibration(&Vibration::new(200, 100, 3), "clock", SessionId(2));

        let frame = &gateway.transport().sent[0];
        assert_eq!(
            AppMessage::from_frame(frame).unwrap(),
            AppMessage::Vibrate {
                pattern: Vibration::new(200, 100, 3),
                app_name: "clock",
                session: SessionId(2),
            }
        );
        assert_eq!(gateway.stats().vibrations_sent, 1);
    }

    #[test]
    fn test_send_failure_is_counted_not_raised() {
        let mut gateway = MessageGateway::new(Loopback {
            fail_sends: true,
            ..Default::default()
        });
        gateway.send_vibration(&Vibration::new(1, 1, 1), "clock", SessionId(1));

        let stats = gateway.stats();
        assert_eq!(stats.send_failures, 1);
        assert_eq!(stats.vibrations_sent, 0);
    }

    #[test]
    fn test_receive_skips_undecodable_frames() {
        let mut transport = Loopback::default();
        // Unknown message type, then an empty button mask, then a valid one
        transport.inbound.push_back(Frame::empty(0x7F)).unwrap();
        transport
            .inbound
            .push_back(Frame::new(MSG_BUTTON, &[0x00]).unwrap())
            .unwrap();
        transport
            .inbound
            .push_back(HostMessage::Deactivate.to_frame().unwrap())
            .unwrap();

        let mut gateway = MessageGateway::new(transport);
        assert_eq!(gateway.receive(), Some(HostMessage::Deactivate));
        assert_eq!(gateway.receive(), None);
        assert_eq!(gateway.stats().dropped_inbound, 2);
    }

    #[test]
    fn test_receive_button_event() {
        let mut transport = Loopback::default();
        let message = HostMessage::ButtonEvent(ButtonMask::from_bits(0x05).unwrap());
        transport
            .inbound
            .push_back(message.to_frame().unwrap())
            .unwrap();

        let mut gateway = MessageGateway::new(transport);
        assert_eq!(gateway.receive(), Some(message));
    }

    #[test]
    fn test_frames_survive_the_parser() {
        let surface = Surface::new(Size::new(96, 32)).unwrap();
        let mut gateway = MessageGateway::new(Loopback::default());
        gateway.send_frame(&OutboundFrame {
            surface: &surface,
            app_name: "clock",
            session: SessionId(1),
        });

        let bytes = gateway.transport().sent[0].encode_to_vec().unwrap();
        let mut parser = FrameParser::new();
        let (consumed, result) = parser.feed_bytes(&bytes);
        assert_eq!(consumed, bytes.len());
        assert_eq!(result.unwrap().as_ref(), Some(&gateway.transport().sent[0]));
    }
}
