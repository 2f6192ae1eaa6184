//! Glance Host Link Protocol
//!
//! This crate defines the message protocol between the host display service
//! and a Glance app. The host decides when an app is visible and in which
//! mode; the app answers with rendered frames and vibration requests.
//!
//! # Protocol Overview
//!
//! All messages use a simple binary frame format:
//! ```text
//! ┌───────┬────────┬──────┬─────────────┬──────────┐
//! │ START │ LENGTH │ TYPE │ PAYLOAD     │ CHECKSUM │
//! │ 1B    │ 2B LE  │ 1B   │ 0–2112B     │ 1B       │
//! └───────┴────────┴──────┴─────────────┴──────────┘
//! ```
//!
//! Every message is one-way. Nothing is acknowledged or retried: a frame
//! that is lost is simply superseded by the next one.

#![no_std]
#![deny(unsafe_code)]

pub mod buttons;
pub mod frame;
pub mod messages;
pub mod session;

pub use buttons::{Button, ButtonMask};
pub use frame::{
    Frame, FrameError, FrameParser, FRAME_START, MAX_BUFFER_SIZE, MAX_FRAME_SIZE,
    MAX_PAYLOAD_SIZE,
};
pub use messages::{AppMessage, DecodeError, HostMessage, Vibration, MAX_APP_NAME_LEN};
pub use session::{ActivationMode, AppCapability, SessionId};
