//! Configuration loader
//!
//! Tries TOML first and falls back to the postcard binary format. Whatever
//! the source, the result is version-checked and validated before use.

use core::str;

use glance_core::config::{ConfigError, RuntimeConfig, CONFIG_VERSION};

/// Configuration used when nothing else is supplied
pub const DEFAULT_CONFIG: &str = include_str!("../../glance.toml");

/// Configuration loading errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadError {
    /// TOML data is not UTF-8
    InvalidUtf8,
    /// TOML parsing failed
    TomlParse,
    /// Binary deserialization failed
    Deserialize,
    /// Config version mismatch
    VersionMismatch { found: u8, expected: u8 },
    /// Parsed but unusable
    Invalid(ConfigError),
}

impl From<ConfigError> for LoadError {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::VersionMismatch { found, expected } => {
                LoadError::VersionMismatch { found, expected }
            }
            other => LoadError::Invalid(other),
        }
    }
}

impl core::fmt::Display for LoadError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LoadError::InvalidUtf8 => f.write_str("config is not valid UTF-8"),
            LoadError::TomlParse => f.write_str("config is not valid TOML"),
            LoadError::Deserialize => f.write_str("binary config did not deserialize"),
            LoadError::VersionMismatch { found, expected } => {
                write!(f, "config version {found}, expected {expected}")
            }
            LoadError::Invalid(e) => write!(f, "invalid config: {e}"),
        }
    }
}

impl std::error::Error for LoadError {}

/// Load configuration from TOML or binary data
pub fn load_config(bytes: &[u8]) -> Result<RuntimeConfig, LoadError> {
    // Try TOML first
    let toml_error = match load_toml(bytes) {
        Ok(config) => return Ok(config),
        Err(e @ (LoadError::VersionMismatch { .. } | LoadError::Invalid(_))) => return Err(e),
        Err(e) => {
            log::debug!("Not a TOML config ({}), trying binary", e);
            e
        }
    };

    // Fall back to binary postcard format
    load_binary(bytes).map_err(|e| match (e, toml_error) {
        // Text that failed both ways was most likely meant as TOML
        (LoadError::Deserialize, LoadError::TomlParse) => LoadError::TomlParse,
        (e, _) => e,
    })
}

/// Load configuration from TOML text
pub fn load_toml(bytes: &[u8]) -> Result<RuntimeConfig, LoadError> {
    let text = str::from_utf8(bytes).map_err(|_| LoadError::InvalidUtf8)?;
    let config: RuntimeConfig = toml::from_str(text).map_err(|e| {
        log::warn!("TOML parse error: {}", e);
        LoadError::TomlParse
    })?;

    check(config)
}

/// Load configuration from postcard binary data
pub fn load_binary(bytes: &[u8]) -> Result<RuntimeConfig, LoadError> {
    let config: RuntimeConfig =
        postcard::from_bytes(bytes).map_err(|_| LoadError::Deserialize)?;

    check(config)
}

/// Encode configuration in the postcard binary format
pub fn encode_binary(config: &RuntimeConfig) -> Result<Vec<u8>, postcard::Error> {
    postcard::to_allocvec(config)
}

fn check(config: RuntimeConfig) -> Result<RuntimeConfig, LoadError> {
    if config.version != CONFIG_VERSION {
        log::warn!(
            "Config version mismatch: found {}, expected {}",
            config.version,
            CONFIG_VERSION
        );
        return Err(LoadError::VersionMismatch {
            found: config.version,
            expected: CONFIG_VERSION,
        });
    }
    config.validate()?;

    log_config_summary(&config);
    Ok(config)
}

/// Log a summary of the loaded configuration
fn log_config_summary(config: &RuntimeConfig) {
    log::info!("Configuration loaded for {}", config.app_name);
    log::debug!("  capability {:?}", config.capability);
    log::debug!(
        "  display {}x{}",
        config.display.width,
        config.display.height
    );
}
