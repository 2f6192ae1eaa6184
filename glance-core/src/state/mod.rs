//! Activation state machine
//!
//! Defines which mode the app is shown in. The state machine is explicit,
//! finite, and deterministic; the lifecycle controller is its only driver.

pub mod events;
pub mod machine;

pub use events::LifecycleEvent;
pub use machine::ActivationState;
