//! Activation state machine
//!
//! Everything the controller does is a function of the current state and
//! an event. Exactly one state holds at a time.

use glance_protocol::ActivationMode;

use super::events::LifecycleEvent;

/// App activation states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActivationState {
    /// Not visible; initial state and the state entered on teardown
    #[default]
    Inactive,
    /// Visible as a widget strip
    Widget,
    /// Visible full screen
    App,
}

impl ActivationState {
    /// State entered when activated in `mode`
    pub fn from_mode(mode: ActivationMode) -> Self {
        match mode {
            ActivationMode::Widget => ActivationState::Widget,
            ActivationMode::App => ActivationState::App,
        }
    }

    /// Mode of the current activation, `None` when inactive
    pub fn mode(&self) -> Option<ActivationMode> {
        match self {
            ActivationState::Inactive => None,
            ActivationState::Widget => Some(ActivationMode::Widget),
            ActivationState::App => Some(ActivationMode::App),
        }
    }

    /// Check if the app may render and vibrate
    pub fn is_active(&self) -> bool {
        !matches!(self, ActivationState::Inactive)
    }

    /// Check if moving to `next` makes the current surface stale
    ///
    /// Surfaces are sized per mode, so any change of state (including
    /// dropping to inactive) invalidates the surface.
    pub fn invalidates_surface(&self, next: ActivationState) -> bool {
        *self != next
    }

    /// Process an event and return the next state
    pub fn transition(self, event: LifecycleEvent) -> Self {
        use LifecycleEvent::*;

        match (self, event) {
            // Activation is accepted from any state, including a repeat of
            // the current mode
            (_, Activate(mode)) => ActivationState::from_mode(mode),

            // Teardown from any state
            (_, Deactivate) => ActivationState::Inactive,

            // App requests and input never move the state
            (state, ButtonPressed | RenderRequested | VibrationRequested) => state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ActivationState; 3] = [
        ActivationState::Inactive,
        ActivationState::Widget,
        ActivationState::App,
    ];

    #[test]
    fn test_initial_state_is_inactive() {
        assert_eq!(ActivationState::default(), ActivationState::Inactive);
        assert!(!ActivationState::default().is_active());
    }

    #[test]
    fn test_activate_from_any_state() {
        for state in ALL {
            let next = state.transition(LifecycleEvent::Activate(ActivationMode::Widget));
            assert_eq!(next, ActivationState::Widget);

            let next = state.transition(LifecycleEvent::Activate(ActivationMode::App));
            assert_eq!(next, ActivationState::App);
        }
    }

    #[test]
    fn test_deactivate_from_any_state() {
        for state in ALL {
            assert_eq!(
                state.transition(LifecycleEvent::Deactivate),
                ActivationState::Inactive
            );
        }
    }

    #[test]
    fn test_requests_do_not_move_state() {
        for state in ALL {
            for event in [
                LifecycleEvent::ButtonPressed,
                LifecycleEvent::RenderRequested,
                LifecycleEvent::VibrationRequested,
            ] {
                assert_eq!(state.transition(event), state);
            }
        }
    }

    #[test]
    fn test_surface_invalidation() {
        use ActivationState::*;

        assert!(Widget.invalidates_surface(App));
        assert!(App.invalidates_surface(Widget));
        assert!(App.invalidates_surface(Inactive));
        assert!(!App.invalidates_surface(App));
        assert!(!Widget.invalidates_surface(Widget));
    }

    #[test]
    fn test_mode_mapping() {
        assert_eq!(ActivationState::Inactive.mode(), None);
        for mode in [ActivationMode::Widget, ActivationMode::App] {
            assert_eq!(ActivationState::from_mode(mode).mode(), Some(mode));
        }
    }
}
