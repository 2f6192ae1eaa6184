//! Byte stream transport
//!
//! Frames travel over any `embedded-io` reader/writer pair: a serial port,
//! a pipe, a socket. Corrupt bytes on the inbound side are skipped and the
//! parser resynchronizes on the next start byte.
//!
//! The reader is only read when it reports `ReadReady`, so `receive` never
//! waits on the host. A frame that arrives in pieces is completed across
//! calls.

use embedded_io::{Read, ReadReady, Write};
use glance_core::{Gateway, TransportError};
use glance_protocol::{Frame, FrameParser};

/// Bytes read from the stream per call
pub const RX_CHUNK_SIZE: usize = 64;

/// `Gateway` over a byte stream
pub struct StreamGateway<R, W> {
    reader: R,
    writer: W,
    parser: FrameParser,
    rx: [u8; RX_CHUNK_SIZE],
    rx_start: usize,
    rx_end: usize,
}

impl<R: Read + ReadReady, W: Write> StreamGateway<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            parser: FrameParser::new(),
            rx: [0; RX_CHUNK_SIZE],
            rx_start: 0,
            rx_end: 0,
        }
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl<R: Read + ReadReady, W: Write> Gateway for StreamGateway<R, W> {
    fn send(&mut self, frame: &Frame) -> Result<(), TransportError> {
        let bytes = frame.encode_to_vec()?;
        self.writer.write_all(&bytes).map_err(|e| {
            log::warn!("Stream write failed: {:?}", e);
            TransportError::Io
        })?;
        self.writer.flush().map_err(|_| TransportError::Io)
    }

    /// Parse buffered and ready bytes into the next frame
    ///
    /// Returns `Ok(None)` once the reader has nothing ready or the stream
    /// has ended.
    fn receive(&mut self) -> Result<Option<Frame>, TransportError> {
        loop {
            if self.rx_start == self.rx_end {
                let ready = self.reader.read_ready().map_err(|e| {
                    log::warn!("Stream readiness check failed: {:?}", e);
                    TransportError::Io
                })?;
                if !ready {
                    return Ok(None);
                }

                let n = self.reader.read(&mut self.rx).map_err(|e| {
                    log::warn!("Stream read failed: {:?}", e);
                    TransportError::Io
                })?;
                if n == 0 {
                    return Ok(None);
                }
                log::trace!("RX: {} bytes", n);
                self.rx_start = 0;
                self.rx_end = n;
            }

            let (consumed, result) = self
                .parser
                .feed_bytes(&self.rx[self.rx_start..self.rx_end]);
            self.rx_start += consumed;

            match result {
                Ok(Some(frame)) => return Ok(Some(frame)),
                Ok(None) => {}
                Err(e) => log::warn!("Frame parse error: {}", e),
            }
        }
    }
}

impl<R, W> core::fmt::Debug for StreamGateway<R, W> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StreamGateway")
            .field("buffered", &(self.rx_end - self.rx_start))
            .field("parser_idle", &self.parser.is_idle())
            .finish()
    }
}
