//! Message types for the host link
//!
//! Message types are divided into two categories:
//! - Host → App: activation, deactivation, button events
//! - App → Host: rendered frames, vibration requests
//!
//! Every message is fire-and-forget; there are no acknowledgements.

use crate::buttons::ButtonMask;
use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};
use crate::session::{ActivationMode, SessionId};
use heapless::Vec;

// Message type IDs: Host → App
pub const MSG_ACTIVATE: u8 = 0x01;
pub const MSG_DEACTIVATE: u8 = 0x02;
pub const MSG_BUTTON: u8 = 0x03;

// Message type IDs: App → Host
pub const MSG_PUSH_FRAME: u8 = 0x20;
pub const MSG_VIBRATE: u8 = 0x21;

/// Longest app name carried on the wire
pub const MAX_APP_NAME_LEN: usize = 32;

/// Reasons an incoming frame does not decode into a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Message type id not defined for this direction
    UnknownMessage(u8),
    /// Payload ended before a required field
    Truncated,
    /// Mode name is not one of the known modes
    UnknownMode,
    /// Button mask empty or naming unknown buttons
    InvalidButtons(u8),
    /// App name longer than `MAX_APP_NAME_LEN`
    NameTooLong,
    /// Text field is not UTF-8
    InvalidUtf8,
    /// Payload continues past the last field
    TrailingBytes,
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DecodeError::UnknownMessage(id) => write!(f, "unknown message type 0x{id:02x}"),
            DecodeError::Truncated => f.write_str("payload truncated"),
            DecodeError::UnknownMode => f.write_str("unknown mode name"),
            DecodeError::InvalidButtons(bits) => write!(f, "invalid button mask 0x{bits:02x}"),
            DecodeError::NameTooLong => f.write_str("app name too long"),
            DecodeError::InvalidUtf8 => f.write_str("text field is not utf-8"),
            DecodeError::TrailingBytes => f.write_str("trailing bytes after last field"),
        }
    }
}

/// Messages from the host to the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostMessage {
    /// Show the app in `mode`; replies carry `session` until the next activation
    Activate {
        mode: ActivationMode,
        session: SessionId,
    },
    /// Stop showing the app
    Deactivate,
    /// One or more buttons were pressed
    ButtonEvent(ButtonMask),
}

impl HostMessage {
    /// Parse a message from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, DecodeError> {
        let mut reader = PayloadReader::new(&frame.payload);
        let message = match frame.msg_type {
            MSG_ACTIVATE => {
                let session = SessionId(reader.u32()?);
                let name = reader.short_str()?;
                // A missing mode means full app mode
                let mode = if name.is_empty() {
                    ActivationMode::App
                } else {
                    ActivationMode::from_name(name).ok_or(DecodeError::UnknownMode)?
                };
                HostMessage::Activate { mode, session }
            }
            MSG_DEACTIVATE => HostMessage::Deactivate,
            MSG_BUTTON => {
                let bits = reader.u8()?;
                let mask = ButtonMask::from_bits(bits)
                    .filter(|mask| !mask.is_empty())
                    .ok_or(DecodeError::InvalidButtons(bits))?;
                HostMessage::ButtonEvent(mask)
            }
            other => return Err(DecodeError::UnknownMessage(other)),
        };
        reader.finish()?;
        Ok(message)
    }

    /// Encode this message into a frame (for host simulation and tests)
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            HostMessage::Activate { mode, session } => {
                let mut payload = PayloadWriter::new();
                payload.u32(session.0)?;
                payload.short_str(mode.name())?;
                payload.into_frame(MSG_ACTIVATE)
            }
            HostMessage::Deactivate => Ok(Frame::empty(MSG_DEACTIVATE)),
            HostMessage::ButtonEvent(mask) => Frame::new(MSG_BUTTON, &[mask.bits()]),
        }
    }
}

/// Vibration pattern: `pulses` buzzes of `on_ms`, separated by `off_ms`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vibration {
    pub on_ms: u16,
    pub off_ms: u16,
    pub pulses: u8,
}

impl Vibration {
    pub const fn new(on_ms: u16, off_ms: u16, pulses: u8) -> Self {
        Self {
            on_ms,
            off_ms,
            pulses,
        }
    }
}

/// Messages from the app to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AppMessage<'a> {
    /// A finished frame in device buffer format
    PushFrame {
        buffer: &'a [u8],
        app_name: &'a str,
        session: SessionId,
    },
    /// Ask the device to vibrate
    Vibrate {
        pattern: Vibration,
        app_name: &'a str,
        session: SessionId,
    },
}

impl<'a> AppMessage<'a> {
    /// Encode this message into a frame
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        let mut payload = PayloadWriter::new();
        match self {
            AppMessage::PushFrame {
                buffer,
                app_name,
                session,
            } => {
                payload.u32(session.0)?;
                payload.short_str(app_name)?;
                payload.bytes(buffer)?;
                payload.into_frame(MSG_PUSH_FRAME)
            }
            AppMessage::Vibrate {
                pattern,
                app_name,
                session,
            } => {
                payload.u32(session.0)?;
                payload.u16(pattern.on_ms)?;
                payload.u16(pattern.off_ms)?;
                payload.bytes(&[pattern.pulses])?;
                payload.short_str(app_name)?;
                payload.into_frame(MSG_VIBRATE)
            }
        }
    }

    /// Parse a message from a frame (host side)
    pub fn from_frame(frame: &'a Frame) -> Result<Self, DecodeError> {
        let mut reader = PayloadReader::new(&frame.payload);
        let message = match frame.msg_type {
            MSG_PUSH_FRAME => {
                let session = SessionId(reader.u32()?);
                let app_name = reader.short_str()?;
                let buffer = reader.rest();
                AppMessage::PushFrame {
                    buffer,
                    app_name,
                    session,
                }
            }
            MSG_VIBRATE => {
                let session = SessionId(reader.u32()?);
                let pattern = Vibration::new(reader.u16()?, reader.u16()?, reader.u8()?);
                let app_name = reader.short_str()?;
                AppMessage::Vibrate {
                    pattern,
                    app_name,
                    session,
                }
            }
            other => return Err(DecodeError::UnknownMessage(other)),
        };
        reader.finish()?;
        Ok(message)
    }

    /// Session id echoed by this message
    pub fn session(&self) -> SessionId {
        match self {
            AppMessage::PushFrame { session, .. } | AppMessage::Vibrate { session, .. } => *session,
        }
    }
}

/// Cursor over a frame payload
struct PayloadReader<'a> {
    bytes: &'a [u8],
}

impl<'a> PayloadReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        if self.bytes.len() < n {
            return Err(DecodeError::Truncated);
        }
        let (head, tail) = self.bytes.split_at(n);
        self.bytes = tail;
        Ok(head)
    }

    fn u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> Result<u16, DecodeError> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    fn u32(&mut self) -> Result<u32, DecodeError> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Length-prefixed UTF-8 string
    fn short_str(&mut self) -> Result<&'a str, DecodeError> {
        let len = usize::from(self.u8()?);
        if len > MAX_APP_NAME_LEN {
            return Err(DecodeError::NameTooLong);
        }
        core::str::from_utf8(self.take(len)?).map_err(|_| DecodeError::InvalidUtf8)
    }

    fn rest(&mut self) -> &'a [u8] {
        core::mem::take(&mut self.bytes)
    }

    fn finish(&self) -> Result<(), DecodeError> {
        if self.bytes.is_empty() {
            Ok(())
        } else {
            Err(DecodeError::TrailingBytes)
        }
    }
}

/// Builder for a frame payload
struct PayloadWriter {
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl PayloadWriter {
    fn new() -> Self {
        Self {
            payload: Vec::new(),
        }
    }

    fn bytes(&mut self, bytes: &[u8]) -> Result<(), FrameError> {
        self.payload
            .extend_from_slice(bytes)
            .map_err(|_| FrameError::PayloadTooLarge)
    }

    fn u16(&mut self, value: u16) -> Result<(), FrameError> {
        self.bytes(&value.to_le_bytes())
    }

    fn u32(&mut self, value: u32) -> Result<(), FrameError> {
        self.bytes(&value.to_le_bytes())
    }

    fn short_str(&mut self, text: &str) -> Result<(), FrameError> {
        if text.len() > MAX_APP_NAME_LEN {
            return Err(FrameError::PayloadTooLarge);
        }
        self.bytes(&[text.len() as u8])?;
        self.bytes(text.as_bytes())
    }

    fn into_frame(self, msg_type: u8) -> Result<Frame, FrameError> {
        Ok(Frame {
            msg_type,
            payload: self.payload,
        })
    }
}
