//! Lifecycle errors

use glance_display::DisplayError;
use glance_protocol::MAX_APP_NAME_LEN;

/// App-facing operations that need an active app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Operation {
    Render,
    Vibrate,
}

/// Errors returned to the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LifecycleError {
    /// Operation called while the app is not active
    InvalidState(Operation),
    /// Surface could not be allocated for the current mode
    Display(DisplayError),
    /// App name does not fit in a frame; carries the name length
    NameTooLong(usize),
}

impl From<DisplayError> for LifecycleError {
    fn from(e: DisplayError) -> Self {
        LifecycleError::Display(e)
    }
}

impl core::fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LifecycleError::InvalidState(Operation::Render) => {
                f.write_str("render requested while the app is not active")
            }
            LifecycleError::InvalidState(Operation::Vibrate) => {
                f.write_str("vibration requested while the app is not active")
            }
            LifecycleError::Display(e) => write!(f, "surface unavailable: {e}"),
            LifecycleError::NameTooLong(len) => write!(
                f,
                "app name is {len} bytes, limit is {MAX_APP_NAME_LEN}"
            ),
        }
    }
}
