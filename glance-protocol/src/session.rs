//! Display modes and session correlation

/// Mode the host activates an app in
///
/// Widget mode shares the screen with other widgets and gets a third of the
/// display height; app mode owns the whole screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActivationMode {
    Widget,
    #[default]
    App,
}

const MODE_WIDGET: &str = "WIDGET";
const MODE_APP: &str = "APP";

impl ActivationMode {
    /// Parse a mode from its wire name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            MODE_WIDGET => Some(ActivationMode::Widget),
            MODE_APP => Some(ActivationMode::App),
            _ => None,
        }
    }

    /// Wire name of this mode
    pub const fn name(self) -> &'static str {
        match self {
            ActivationMode::Widget => MODE_WIDGET,
            ActivationMode::App => MODE_APP,
        }
    }
}

/// Modes an app declares it can be shown in
///
/// This is a static property of the app, separate from the mode of the
/// current activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum AppCapability {
    Widget,
    App,
    #[default]
    WidgetAndApp,
}

impl AppCapability {
    /// Check whether an activation in `mode` matches this declaration
    pub fn supports(self, mode: ActivationMode) -> bool {
        matches!(
            (self, mode),
            (AppCapability::WidgetAndApp, _)
                | (AppCapability::Widget, ActivationMode::Widget)
                | (AppCapability::App, ActivationMode::App)
        )
    }
}

/// Host-assigned id correlating an activation with the app's replies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SessionId(pub u32);

impl core::fmt::Display for SessionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_names() {
        for mode in [ActivationMode::Widget, ActivationMode::App] {
            assert_eq!(ActivationMode::from_name(mode.name()), Some(mode));
        }
        assert_eq!(ActivationMode::from_name("widget"), None);
        assert_eq!(ActivationMode::from_name("WIDGET_AND_APP"), None);
    }

    #[test]
    fn test_default_mode_is_app() {
        assert_eq!(ActivationMode::default(), ActivationMode::App);
    }

    #[test]
    fn test_capability_supports() {
        assert!(AppCapability::WidgetAndApp.supports(ActivationMode::Widget));
        assert!(AppCapability::WidgetAndApp.supports(ActivationMode::App));
        assert!(AppCapability::Widget.supports(ActivationMode::Widget));
        assert!(!AppCapability::Widget.supports(ActivationMode::App));
        assert!(!AppCapability::App.supports(ActivationMode::Widget));
    }
}
