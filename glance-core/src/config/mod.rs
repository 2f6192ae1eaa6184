//! Configuration types
//!
//! Runtime configuration for an app process: who the app is, which modes it
//! supports and how large the display is. Loaded by the runtime from TOML or
//! postcard binary data.

pub mod types;

pub use types::*;
