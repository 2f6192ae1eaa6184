//! Glance app runtime
//!
//! Hosts one app process on a std target:
//!
//! - `channels`: the mailbox every producer posts commands into
//! - `actor`: the single consumer that owns the app's `Lifecycle`
//! - `transport`: `Gateway` implementations over byte streams and memory
//! - `config`: runtime configuration from TOML or postcard data
//! - `sample`: the "next stop" arrivals app, used for conformance
//!
//! Messages may arrive on any thread. They are serialized through the
//! mailbox so lifecycle operations never interleave.

pub mod actor;
pub mod channels;
pub mod config;
pub mod sample;
pub mod transport;

pub use actor::{Actor, EventApp};
pub use channels::{Command, Mailbox, MAILBOX_DEPTH};
pub use config::{load_config, LoadError};
pub use transport::{MemoryGateway, StreamGateway};
