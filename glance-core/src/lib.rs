//! Transport-agnostic lifecycle core for Glance apps
//!
//! This crate contains everything between the host link and the app's own
//! drawing code:
//!
//! - Activation state machine (`Inactive`, `Widget`, `App`)
//! - Surface manager that sizes the drawing surface per mode
//! - Message gateway over a pluggable frame transport
//! - Lifecycle controller and the `App` callback interface
//! - Configuration type definitions
//!
//! Nothing here blocks or spawns work. The caller owns the loop and feeds
//! one host message at a time into a `Lifecycle`.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod gateway;
pub mod lifecycle;
pub mod state;
pub mod surface;

pub use error::{LifecycleError, Operation};
pub use gateway::{Gateway, GatewayStats, MessageGateway, OutboundFrame, TransportError};
pub use lifecycle::{App, AppContext, Lifecycle};
pub use state::{ActivationState, LifecycleEvent};
pub use surface::SurfaceManager;
