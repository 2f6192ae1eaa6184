//! In-process transport
//!
//! Stands in for the host when the app runs in the same process: inbound
//! frames are queued by the caller, outbound frames are recorded for
//! inspection.

use std::collections::VecDeque;

use glance_core::{Gateway, TransportError};
use glance_protocol::{AppMessage, Frame, FrameError, HostMessage};

/// `Gateway` backed by in-memory queues
#[derive(Debug, Default)]
pub struct MemoryGateway {
    inbound: VecDeque<Frame>,
    sent: Vec<Frame>,
    disconnected: bool,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw frame for the app
    pub fn queue_frame(&mut self, frame: Frame) {
        self.inbound.push_back(frame);
    }

    /// Queue a host message for the app
    pub fn queue_host(&mut self, message: HostMessage) -> Result<(), FrameError> {
        self.queue_frame(message.to_frame()?);
        Ok(())
    }

    pub fn pending_inbound(&self) -> usize {
        self.inbound.len()
    }

    /// Frames the app has sent, oldest first
    pub fn sent_frames(&self) -> &[Frame] {
        &self.sent
    }

    /// Sent frames decoded as app messages
    ///
    /// Frames that do not decode are skipped.
    pub fn sent_messages(&self) -> Vec<AppMessage<'_>> {
        self.sent
            .iter()
            .filter_map(|frame| AppMessage::from_frame(frame).ok())
            .collect()
    }

    /// Take and clear the record of sent frames
    pub fn take_sent(&mut self) -> Vec<Frame> {
        std::mem::take(&mut self.sent)
    }

    /// Make every send fail with `TransportError::Closed` until reconnected
    pub fn set_connected(&mut self, connected: bool) {
        self.disconnected = !connected;
    }
}

impl Gateway for MemoryGateway {
    fn send(&mut self, frame: &Frame) -> Result<(), TransportError> {
        if self.disconnected {
            return Err(TransportError::Closed);
        }
        self.sent.push(frame.clone());
        Ok(())
    }

    fn receive(&mut self) -> Result<Option<Frame>, TransportError> {
        Ok(self.inbound.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glance_protocol::{SessionId, Vibration};

    #[test]
    fn test_inbound_is_fifo() {
        let mut gateway = MemoryGateway::new();
        gateway.queue_host(HostMessage::Deactivate).unwrap();
        gateway.queue_frame(Frame::empty(0x7F));
        assert_eq!(gateway.pending_inbound(), 2);

        let first = gateway.receive().unwrap().unwrap();
        assert_eq!(HostMessage::from_frame(&first), Ok(HostMessage::Deactivate));
        assert_eq!(gateway.receive().unwrap().unwrap().msg_type, 0x7F);
        assert_eq!(gateway.receive(), Ok(None));
    }

    #[test]
    fn test_sent_messages_decode() {
        let mut gateway = MemoryGateway::new();
        let vibrate = AppMessage::Vibrate {
            pattern: Vibration::new(10, 20, 1),
            app_name: "clock",
            session: SessionId(5),
        };
        gateway.send(&vibrate.to_frame().unwrap()).unwrap();

        assert_eq!(gateway.sent_messages(), vec![vibrate]);
        assert_eq!(gateway.take_sent().len(), 1);
        assert!(gateway.sent_frames().is_empty());
    }

    #[test]
    fn test_disconnected_send_fails() {
        let mut gateway = MemoryGateway::new();
        gateway.set_connected(false);
        assert_eq!(
            gateway.send(&Frame::empty(0x20)),
            Err(TransportError::Closed)
        );
        assert!(gateway.sent_frames().is_empty());

        gateway.set_connected(true);
        assert!(gateway.send(&Frame::empty(0x20)).is_ok());
    }
}
