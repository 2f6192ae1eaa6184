//! Configuration loading
//!
//! Reads a `RuntimeConfig` from TOML text or its postcard binary form.

pub mod loader;

pub use loader::{encode_binary, load_binary, load_config, load_toml, LoadError, DEFAULT_CONFIG};
