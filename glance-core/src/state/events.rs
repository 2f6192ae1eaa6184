//! Events that drive the activation state machine

use glance_protocol::ActivationMode;

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LifecycleEvent {
    // Host events
    /// Host asked to show the app in a mode
    Activate(ActivationMode),
    /// Host asked to hide the app
    Deactivate,
    /// Host forwarded a button press
    ButtonPressed,

    // App requests
    /// App asked for a new frame
    RenderRequested,
    /// App asked for a vibration
    VibrationRequested,
}

impl LifecycleEvent {
    /// Check if this event originates from the host
    pub fn is_host_event(&self) -> bool {
        matches!(
            self,
            LifecycleEvent::Activate(_) | LifecycleEvent::Deactivate | LifecycleEvent::ButtonPressed
        )
    }

    /// Check if this event is only legal while active
    pub fn requires_active(&self) -> bool {
        matches!(
            self,
            LifecycleEvent::RenderRequested | LifecycleEvent::VibrationRequested
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_events() {
        assert!(LifecycleEvent::Activate(ActivationMode::App).is_host_event());
        assert!(LifecycleEvent::Deactivate.is_host_event());
        assert!(LifecycleEvent::ButtonPressed.is_host_event());
        assert!(!LifecycleEvent::RenderRequested.is_host_event());
    }

    #[test]
    fn test_requires_active() {
        assert!(LifecycleEvent::RenderRequested.requires_active());
        assert!(LifecycleEvent::VibrationRequested.requires_active());
        assert!(!LifecycleEvent::ButtonPressed.requires_active());
        assert!(!LifecycleEvent::Deactivate.requires_active());
    }
}
