//! Configuration type definitions

use glance_display::{DisplayError, DisplayGeometry, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use glance_protocol::{AppCapability, MAX_APP_NAME_LEN};
use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Current configuration format version
pub const CONFIG_VERSION: u8 = 1;

/// Name used when none is configured
pub const DEFAULT_APP_NAME: &str = "glance-app";

/// Display panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Panel width in pixels
    pub width: u16,
    /// Panel height in pixels
    pub height: u16,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

/// Complete runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RuntimeConfig {
    /// Format version
    pub version: u8,
    /// Name the app reports to the host with every frame
    pub app_name: String<MAX_APP_NAME_LEN>,
    /// Modes the app declares to the host
    #[cfg_attr(feature = "serde", serde(default))]
    pub capability: AppCapability,
    /// Display panel
    #[cfg_attr(feature = "serde", serde(default))]
    pub display: DisplayConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        let mut app_name = String::new();
        // Fits: the default name is shorter than MAX_APP_NAME_LEN
        let _ = app_name.push_str(DEFAULT_APP_NAME);

        Self {
            version: CONFIG_VERSION,
            app_name,
            capability: AppCapability::default(),
            display: DisplayConfig::default(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    VersionMismatch { found: u8, expected: u8 },
    EmptyName,
    Display(DisplayError),
}

impl From<DisplayError> for ConfigError {
    fn from(e: DisplayError) -> Self {
        ConfigError::Display(e)
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::VersionMismatch { found, expected } => {
                write!(f, "config version {found}, expected {expected}")
            }
            ConfigError::EmptyName => f.write_str("app name is empty"),
            ConfigError::Display(e) => write!(f, "display: {e}"),
        }
    }
}

impl RuntimeConfig {
    /// Check the configuration is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != CONFIG_VERSION {
            return Err(ConfigError::VersionMismatch {
                found: self.version,
                expected: CONFIG_VERSION,
            });
        }
        if self.app_name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        self.geometry()?;
        Ok(())
    }

    /// Display geometry for this configuration
    pub fn geometry(&self) -> Result<DisplayGeometry, DisplayError> {
        DisplayGeometry::new(self.display.width, self.display.height)
    }
}
