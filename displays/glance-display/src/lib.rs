//! Drawing surfaces and the device buffer codec for Glance apps
//!
//! This crate provides:
//! - `DisplayGeometry`, which turns the panel size and an activation mode
//!   into a surface size
//! - `Surface`, a 1-bit raster apps draw into through `embedded-graphics`
//! - `codec`, which flattens a surface into the buffer format the watch expects
//!
//! # Architecture
//!
//! Apps never see the wire format. They draw text, lines and rectangles on a
//! `Surface` with the ordinary `embedded-graphics` primitives; the core then
//! encodes the finished surface and hands it to the host link.

#![no_std]
#![deny(unsafe_code)]

pub mod codec;
pub mod error;
pub mod geometry;
pub mod surface;

// Re-export key types
pub use codec::DeviceBuffer;
pub use error::DisplayError;
pub use geometry::{DisplayGeometry, DEFAULT_HEIGHT, DEFAULT_WIDTH};
pub use surface::{Surface, BACKGROUND, MAX_SURFACE_BYTES};

/// Drawing types apps need alongside a `Surface`
pub use embedded_graphics;
